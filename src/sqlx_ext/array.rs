use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::{Decode, Postgres, Type};

use crate::ArrayValue;

impl Type<Postgres> for ArrayValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_half")
    }
}

impl Decode<'_, Postgres> for ArrayValue {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        let buf = <&[u8] as Decode<Postgres>>::decode(value)?;
        Ok(ArrayValue::from_sql(buf)?)
    }
}
