use bytes::{BufMut, BytesMut};
use postgres_types::{to_sql_checked, FromSql, IsNull, ToSql, Type};
use std::error::Error;

use crate::Half;

impl<'a> FromSql<'a> for Half {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Half, Box<dyn Error + Sync + Send>> {
        Ok(Half::from_slice(raw)?)
    }

    fn accepts(ty: &Type) -> bool {
        ty.name() == "half"
    }
}

impl ToSql for Half {
    fn to_sql(&self, _ty: &Type, w: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        w.put_slice(&self.to_be_bytes());
        Ok(IsNull::No)
    }

    fn accepts(ty: &Type) -> bool {
        ty.name() == "half"
    }

    to_sql_checked!();
}
