use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::query_builder::QueryId;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::SqlType;
use std::io::Write;

use crate::Half;

#[derive(SqlType, QueryId)]
#[diesel(postgres_type(name = "half"))]
pub struct HalfType;

impl ToSql<HalfType, Pg> for Half {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(&self.to_be_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<HalfType, Pg> for Half {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(Half::from_slice(value.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use crate::Half;
    use diesel::pg::PgConnection;
    use diesel::{Connection, ExpressionMethods, QueryDsl, RunQueryDsl};

    table! {
        use diesel::sql_types::*;

        diesel_half_values (id) {
            id -> Int4,
            value -> Nullable<crate::sql_types::Half>,
        }
    }

    use diesel_half_values as items;

    #[derive(Queryable)]
    #[diesel(table_name = items)]
    struct Item {
        pub id: i32,
        pub value: Option<Half>,
    }

    #[derive(Insertable)]
    #[diesel(table_name = items)]
    struct NewItem {
        pub value: Option<Half>,
    }

    #[test]
    fn it_works() -> Result<(), diesel::result::Error> {
        let mut conn = PgConnection::establish("postgres://localhost/pghalf_test").unwrap();
        diesel::sql_query("CREATE EXTENSION IF NOT EXISTS half").execute(&mut conn)?;
        diesel::sql_query("DROP TABLE IF EXISTS diesel_half_values").execute(&mut conn)?;
        diesel::sql_query("CREATE TABLE diesel_half_values (id serial PRIMARY KEY, value half)")
            .execute(&mut conn)?;

        let new_items = vec![
            NewItem {
                value: Some(Half::from_f32(2.0).unwrap()),
            },
            NewItem {
                value: Some(Half::from_f32(-1.5).unwrap()),
            },
            NewItem { value: None },
        ];

        diesel::insert_into(items::table)
            .values(&new_items)
            .get_results::<Item>(&mut conn)?;

        let all = items::table.order(items::id).load::<Item>(&mut conn)?;
        assert_eq!(3, all.len());
        assert_eq!(vec![1, 2, 3], all.iter().map(|v| v.id).collect::<Vec<i32>>());
        assert_eq!(
            vec![
                Some(Half::from_f32(2.0).unwrap()),
                Some(Half::from_f32(-1.5).unwrap()),
                None
            ],
            all.iter().map(|v| v.value).collect::<Vec<Option<Half>>>()
        );

        let matching = items::table
            .filter(items::value.eq(Half::from_f32(-1.5).unwrap()))
            .load::<Item>(&mut conn)?;
        assert_eq!(vec![2], matching.iter().map(|v| v.id).collect::<Vec<i32>>());

        Ok(())
    }
}
