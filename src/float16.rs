use half::f16;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{Error, Result};

#[cfg(feature = "diesel")]
use crate::diesel_ext::float16::HalfType;

#[cfg(feature = "diesel")]
use diesel::{deserialize::FromSqlRow, expression::AsExpression};

/// A half-precision float.
///
/// Stored as the 16 bits of an IEEE 754 binary16 value. Arithmetic widens to
/// `f32` and rounds back to nearest-even, so results match native binary16.
/// Equality and ordering follow IEEE rules: `NaN` is unordered and `-0 == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "diesel", derive(FromSqlRow, AsExpression))]
#[cfg_attr(feature = "diesel", diesel(sql_type = HalfType))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Half(pub(crate) f16);

impl Half {
    /// Largest finite value, 65504.
    pub const MAX: Half = Half(f16::MAX);
    /// Smallest finite value, -65504.
    pub const MIN: Half = Half(f16::MIN);
    pub const ZERO: Half = Half(f16::ZERO);
    pub const NEG_ZERO: Half = Half(f16::NEG_ZERO);
    pub const ONE: Half = Half(f16::ONE);
    pub const INFINITY: Half = Half(f16::INFINITY);
    pub const NEG_INFINITY: Half = Half(f16::NEG_INFINITY);
    pub const NAN: Half = Half(f16::NAN);
    /// Smallest positive subnormal value.
    pub const MIN_POSITIVE_SUBNORMAL: Half = Half(f16::MIN_POSITIVE_SUBNORMAL);

    /// Creates a half from its raw bits.
    pub const fn from_bits(bits: u16) -> Half {
        Half(f16::from_bits(bits))
    }

    /// Returns the raw bits.
    pub const fn to_bits(self) -> u16 {
        self.0.to_bits()
    }

    /// Decodes the two-byte big-endian wire format. Every bit pattern is valid.
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Half {
        Half::from_bits(u16::from_be_bytes(bytes))
    }

    /// Encodes the two-byte big-endian wire format.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_bits().to_be_bytes()
    }

    /// Decodes a wire value from a buffer that must hold exactly two bytes.
    pub fn from_slice(buf: &[u8]) -> Result<Half> {
        let bytes: [u8; 2] = buf.try_into().map_err(|_| {
            Error::InvalidBinary(format!("expected 2 bytes for half, got {}", buf.len()))
        })?;
        Ok(Half::from_be_bytes(bytes))
    }

    /// Widens to `f32`. Exact.
    pub fn to_f32(self) -> f32 {
        self.0.to_f32()
    }

    /// Widens to `f64`. Exact.
    pub fn to_f64(self) -> f64 {
        self.0.to_f64()
    }

    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns true for negative values, `-0` and NaNs with the sign bit set.
    pub fn is_sign_negative(self) -> bool {
        self.0.is_sign_negative()
    }
}

impl From<f16> for Half {
    fn from(v: f16) -> Self {
        Half(v)
    }
}

impl From<Half> for f16 {
    fn from(val: Half) -> Self {
        val.0
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl $trait for Half {
            type Output = Half;

            #[inline]
            fn $method(self, rhs: Half) -> Half {
                Half(self.0.$method(rhs.0))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div);

impl Neg for Half {
    type Output = Half;

    #[inline]
    fn neg(self) -> Half {
        Half(-self.0)
    }
}
