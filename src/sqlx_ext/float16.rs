use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};

use crate::Half;

impl Type<Postgres> for Half {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("half")
    }
}

impl Encode<'_, Postgres> for Half {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        buf.extend(&self.to_be_bytes());
        Ok(IsNull::No)
    }
}

impl Decode<'_, Postgres> for Half {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        let buf = <&[u8] as Decode<Postgres>>::decode(value)?;
        Ok(Half::from_slice(buf)?)
    }
}

impl PgHasArrayType for Half {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_half")
    }
}
