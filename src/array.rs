use half::f16;

use crate::{Error, Half, Result};

#[cfg(feature = "diesel")]
use diesel::deserialize::FromSqlRow;

/// Maximum number of array dimensions the database allows.
const MAXDIM: i32 = 6;

/// Maximum number of array elements the database allows.
const MAX_ARRAY_SIZE: usize = 0x7ffffff;

/// An array of halves as handed over by the host.
///
/// Distance functions only treat arrays that are one-dimensional and free
/// of nulls as vectors.
pub trait HalfArray {
    /// Number of dimensions.
    fn ndim(&self) -> usize;

    /// Length of the first dimension, or zero for an empty array.
    fn first_dim(&self) -> usize;

    /// Returns whether any element is null.
    fn contains_nulls(&self) -> bool;

    /// The non-null elements in storage order.
    fn data(&self) -> &[Half];
}

impl HalfArray for [Half] {
    fn ndim(&self) -> usize {
        1
    }

    fn first_dim(&self) -> usize {
        self.len()
    }

    fn contains_nulls(&self) -> bool {
        false
    }

    fn data(&self) -> &[Half] {
        self
    }
}

impl HalfArray for Vec<Half> {
    fn ndim(&self) -> usize {
        1
    }

    fn first_dim(&self) -> usize {
        self.len()
    }

    fn contains_nulls(&self) -> bool {
        false
    }

    fn data(&self) -> &[Half] {
        self
    }
}

#[inline]
fn is_vector<A: HalfArray + ?Sized>(a: &A) -> bool {
    a.ndim() == 1 && !a.contains_nulls()
}

/// Returns the shared length of two vectors, or `None` when they cannot be
/// compared: either is not one-dimensional, contains nulls, the lengths
/// differ, or both are empty.
pub fn check_dims<A, B>(a: &A, b: &B) -> Option<usize>
where
    A: HalfArray + ?Sized,
    B: HalfArray + ?Sized,
{
    if !is_vector(a) || !is_vector(b) {
        tracing::debug!(
            a_ndim = a.ndim(),
            a_nulls = a.contains_nulls(),
            b_ndim = b.ndim(),
            b_nulls = b.contains_nulls(),
            "arrays are not vectors"
        );
        return None;
    }

    let dima = a.first_dim();
    let dimb = b.first_dim();
    if dima != dimb || dima == 0 {
        tracing::debug!(dima, dimb, "vector dimensions are not comparable");
        return None;
    }

    Some(dima)
}

/// A half vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HalfVector(pub(crate) Vec<Half>);

impl From<Vec<Half>> for HalfVector {
    fn from(v: Vec<Half>) -> Self {
        HalfVector(v)
    }
}

impl From<HalfVector> for Vec<Half> {
    fn from(val: HalfVector) -> Self {
        val.0
    }
}

impl HalfVector {
    /// Creates a half vector from a `f32` slice, rounding each element.
    /// Out-of-range elements saturate to infinity and tiny ones to zero.
    pub fn from_f32_slice(slice: &[f32]) -> HalfVector {
        HalfVector(slice.iter().map(|v| Half(f16::from_f32(*v))).collect())
    }

    /// Creates a half vector from a `f32` slice, failing on the first element
    /// that overflows or underflows.
    pub fn try_from_f32_slice(slice: &[f32]) -> Result<HalfVector> {
        slice
            .iter()
            .map(|v| Half::from_f32(*v))
            .collect::<Result<Vec<Half>>>()
            .map(HalfVector)
    }

    /// Returns a copy of the half vector as a `Vec<Half>`.
    pub fn to_vec(&self) -> Vec<Half> {
        self.0.clone()
    }

    /// Returns the half vector as a slice.
    pub fn as_slice(&self) -> &[Half] {
        self.0.as_slice()
    }

    /// Returns the number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }
}

impl HalfArray for HalfVector {
    fn ndim(&self) -> usize {
        1
    }

    fn first_dim(&self) -> usize {
        self.0.len()
    }

    fn contains_nulls(&self) -> bool {
        false
    }

    fn data(&self) -> &[Half] {
        &self.0
    }
}

/// A `half[]` value in its full generality: any number of dimensions,
/// custom lower bounds and null elements.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "diesel", derive(FromSqlRow))]
pub struct ArrayValue {
    pub(crate) dims: Vec<usize>,
    pub(crate) lower_bounds: Vec<i32>,
    pub(crate) nulls: Vec<bool>,
    pub(crate) data: Vec<Half>,
}

impl ArrayValue {
    /// Creates an array with the given dimension lengths from elements in
    /// row-major order. Lower bounds start at 1.
    pub fn new(dims: Vec<usize>, elements: Vec<Option<Half>>) -> Result<ArrayValue> {
        let count = element_count(&dims)?;
        if count != elements.len() {
            return Err(Error::InvalidBinary(format!(
                "expected {} elements, got {}",
                count,
                elements.len()
            )));
        }

        let lower_bounds = vec![1; dims.len()];
        let nulls = elements.iter().map(Option::is_none).collect();
        let data = elements.into_iter().flatten().collect();
        Ok(ArrayValue {
            dims,
            lower_bounds,
            nulls,
            data,
        })
    }

    /// Returns the length of each dimension.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the lower bound of each dimension.
    pub fn lower_bounds(&self) -> &[i32] {
        &self.lower_bounds
    }

    /// Returns all elements in row-major order, with nulls as `None`.
    pub fn elements(&self) -> Vec<Option<Half>> {
        let mut data = self.data.iter();
        self.nulls
            .iter()
            .map(|null| if *null { None } else { data.next().copied() })
            .collect()
    }

    /// Decodes the binary array format sent by the database.
    pub fn from_sql(mut buf: &[u8]) -> Result<ArrayValue> {
        let ndim = read_i32(&mut buf)?;
        if !(0..=MAXDIM).contains(&ndim) {
            return Err(Error::InvalidBinary(format!(
                "invalid number of dimensions: {}",
                ndim
            )));
        }

        let flags = read_i32(&mut buf)?;
        if flags != 0 && flags != 1 {
            return Err(Error::InvalidBinary(format!("invalid array flags: {}", flags)));
        }

        // element type oid; extension types have no fixed oid
        read_i32(&mut buf)?;

        let mut dims = Vec::with_capacity(ndim as usize);
        let mut lower_bounds = Vec::with_capacity(ndim as usize);
        for _ in 0..ndim {
            let len = read_i32(&mut buf)?;
            let len = usize::try_from(len).map_err(|_| {
                Error::InvalidBinary(format!("invalid array dimension: {}", len))
            })?;
            dims.push(len);
            lower_bounds.push(read_i32(&mut buf)?);
        }

        let count = element_count(&dims)?;
        // every element carries at least a length word
        let capacity = count.min(buf.len() / 4);
        let mut nulls = Vec::with_capacity(capacity);
        let mut data = Vec::with_capacity(capacity);
        for _ in 0..count {
            match read_i32(&mut buf)? {
                -1 => nulls.push(true),
                2 => {
                    data.push(Half::from_slice(take(&mut buf, 2)?)?);
                    nulls.push(false);
                }
                len => {
                    return Err(Error::InvalidBinary(format!(
                        "expected 2 bytes for half, got {}",
                        len
                    )))
                }
            }
        }

        if !buf.is_empty() {
            return Err(Error::InvalidBinary(format!(
                "{} trailing bytes after array",
                buf.len()
            )));
        }

        Ok(ArrayValue {
            dims,
            lower_bounds,
            nulls,
            data,
        })
    }
}

impl From<Vec<Half>> for ArrayValue {
    fn from(v: Vec<Half>) -> Self {
        let dims = if v.is_empty() { vec![] } else { vec![v.len()] };
        ArrayValue {
            lower_bounds: vec![1; dims.len()],
            dims,
            nulls: vec![false; v.len()],
            data: v,
        }
    }
}

impl HalfArray for ArrayValue {
    fn ndim(&self) -> usize {
        self.dims.len()
    }

    fn first_dim(&self) -> usize {
        self.dims.first().copied().unwrap_or(0)
    }

    fn contains_nulls(&self) -> bool {
        self.nulls.iter().any(|null| *null)
    }

    fn data(&self) -> &[Half] {
        &self.data
    }
}

fn element_count(dims: &[usize]) -> Result<usize> {
    dims.iter()
        .try_fold(1_usize, |acc, d| acc.checked_mul(*d))
        .map(|count| if dims.is_empty() { 0 } else { count })
        .filter(|count| *count <= MAX_ARRAY_SIZE)
        .ok_or_else(|| Error::InvalidBinary("array size exceeds the maximum allowed".into()))
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if buf.len() < len {
        return Err(Error::InvalidBinary("unexpected end of array data".into()));
    }
    let (head, tail) = buf.split_at(len);
    *buf = tail;
    Ok(head)
}

fn read_i32(buf: &mut &[u8]) -> Result<i32> {
    let bytes = take(buf, 4)?;
    Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
