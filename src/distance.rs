use crate::{check_dims, Half, HalfArray};

#[inline]
fn vectors<'a, A, B>(a: &'a A, b: &'a B) -> Option<(&'a [Half], &'a [Half])>
where
    A: HalfArray + ?Sized,
    B: HalfArray + ?Sized,
{
    let dim = check_dims(a, b)?;
    Some((a.data().get(..dim)?, b.data().get(..dim)?))
}

#[inline]
fn inner_product_f32(ax: &[Half], bx: &[Half]) -> f32 {
    let mut distance: f32 = 0.0;
    for (x, y) in ax.iter().zip(bx) {
        distance += x.to_f32() * y.to_f32();
    }
    distance
}

/// Euclidean distance.
///
/// Like the other distance functions, returns `None` when the arguments are
/// not comparable (see [`check_dims`]). Elements are widened to `f32` and
/// summed in index order.
pub fn l2_distance<A, B>(a: &A, b: &B) -> Option<f64>
where
    A: HalfArray + ?Sized,
    B: HalfArray + ?Sized,
{
    let (ax, bx) = vectors(a, b)?;
    let mut distance: f32 = 0.0;
    for (x, y) in ax.iter().zip(bx) {
        let diff = x.to_f32() - y.to_f32();
        distance += diff * diff;
    }
    Some(f64::from(distance).sqrt())
}

/// Inner product.
pub fn inner_product<A, B>(a: &A, b: &B) -> Option<f64>
where
    A: HalfArray + ?Sized,
    B: HalfArray + ?Sized,
{
    let (ax, bx) = vectors(a, b)?;
    Some(f64::from(inner_product_f32(ax, bx)))
}

/// Negated inner product, so that smaller means more similar.
pub fn negative_inner_product<A, B>(a: &A, b: &B) -> Option<f64>
where
    A: HalfArray + ?Sized,
    B: HalfArray + ?Sized,
{
    let (ax, bx) = vectors(a, b)?;
    Some(-f64::from(inner_product_f32(ax, bx)))
}

/// Cosine distance, `1 - cos(a, b)`, in `[0, 2]`.
///
/// A zero vector on either side yields NaN.
pub fn cosine_distance<A, B>(a: &A, b: &B) -> Option<f64>
where
    A: HalfArray + ?Sized,
    B: HalfArray + ?Sized,
{
    let (ax, bx) = vectors(a, b)?;
    let mut distance: f32 = 0.0;
    let mut norma: f32 = 0.0;
    let mut normb: f32 = 0.0;
    for (x, y) in ax.iter().zip(bx) {
        let axi = x.to_f32();
        let bxi = y.to_f32();
        distance += axi * bxi;
        norma += axi * axi;
        normb += bxi * bxi;
    }

    // sqrt(a * b) over sqrt(a) * sqrt(b)
    let similarity = f64::from(distance) / (f64::from(norma) * f64::from(normb)).sqrt();
    if similarity.is_nan() {
        return Some(f64::NAN);
    }

    // rounding can leave [-1, 1]
    Some(1.0 - similarity.clamp(-1.0, 1.0))
}
