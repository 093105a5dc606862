#[cfg(feature = "diesel")]
#[macro_use]
extern crate diesel;

mod array;
mod config;
mod convert;
mod distance;
mod error;
mod float16;
mod text;

pub use array::{check_dims, ArrayValue, HalfArray, HalfVector};
pub use config::OutputConfig;
pub use distance::{cosine_distance, inner_product, l2_distance, negative_inner_product};
pub use error::{Error, Result};
pub use float16::Half;

#[cfg(feature = "postgres")]
mod postgres_ext;

#[cfg(feature = "sqlx")]
mod sqlx_ext;

#[cfg(feature = "diesel")]
mod diesel_ext;

#[cfg(feature = "diesel")]
pub mod sql_types {
    pub use super::diesel_ext::float16::HalfType as Half;
}
