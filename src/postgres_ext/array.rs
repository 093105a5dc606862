use postgres_types::{FromSql, Kind, Type};
use std::error::Error;

use crate::ArrayValue;

impl<'a> FromSql<'a> for ArrayValue {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<ArrayValue, Box<dyn Error + Sync + Send>> {
        Ok(ArrayValue::from_sql(raw)?)
    }

    fn accepts(ty: &Type) -> bool {
        match ty.kind() {
            Kind::Array(member) => member.name() == "half",
            _ => false,
        }
    }
}
