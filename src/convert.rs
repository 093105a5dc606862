use half::f16;
use std::convert::TryFrom;

use crate::text::{scan_number, NumberKind};
use crate::{Error, Half, Result};

impl Half {
    /// Narrows an `f32` to half precision.
    ///
    /// Fails with [`Error::Overflow`] when a finite value becomes infinite and
    /// with [`Error::Underflow`] when a nonzero value becomes zero.
    pub fn from_f32(num: f32) -> Result<Half> {
        let result = f16::from_f32(num);
        if result.is_infinite() && !num.is_infinite() {
            tracing::debug!(value = num, "half overflow");
            return Err(Error::Overflow);
        }
        if result == f16::ZERO && num != 0.0 {
            tracing::debug!(value = num, "half underflow");
            return Err(Error::Underflow);
        }
        Ok(Half(result))
    }

    /// Converts an integer through `f32`.
    pub fn from_i32(num: i32) -> Result<Half> {
        Half::from_f32(num as f32)
    }

    /// Converts an arbitrary-precision decimal, given as its canonical text
    /// (`-12.5`, `1.5e-3`, `NaN`, `Infinity`), through `f32`.
    pub fn from_numeric(numeric: &str) -> Result<Half> {
        let trimmed = numeric.trim();
        let invalid = || Error::InvalidTextSyntax(numeric.to_string());

        let number = scan_number(trimmed.as_bytes()).ok_or_else(invalid)?;
        if number.len != trimmed.len() {
            return Err(invalid());
        }
        let num: f32 = trimmed.parse().map_err(|_| invalid())?;

        match number.kind {
            NumberKind::Finite { .. } if num.is_infinite() => {
                tracing::debug!(input = numeric, "numeric overflows f32");
                Err(Error::Overflow)
            }
            NumberKind::Finite { nonzero: true } if num == 0.0 => {
                tracing::debug!(input = numeric, "numeric underflows f32");
                Err(Error::Underflow)
            }
            _ => Half::from_f32(num),
        }
    }
}

impl TryFrom<f32> for Half {
    type Error = Error;

    fn try_from(num: f32) -> Result<Half> {
        Half::from_f32(num)
    }
}

impl TryFrom<i32> for Half {
    type Error = Error;

    fn try_from(num: i32) -> Result<Half> {
        Half::from_i32(num)
    }
}

impl From<Half> for f32 {
    fn from(val: Half) -> Self {
        val.to_f32()
    }
}

impl From<Half> for f64 {
    fn from(val: Half) -> Self {
        val.to_f64()
    }
}
