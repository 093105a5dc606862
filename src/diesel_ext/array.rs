use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::sql_types::Array;

use super::float16::HalfType;
use crate::ArrayValue;

impl FromSql<Array<HalfType>, Pg> for ArrayValue {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(ArrayValue::from_sql(value.as_bytes())?)
    }
}
