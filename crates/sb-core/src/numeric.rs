use crate::CoreError;

/// Floating point type used for all metric values.
pub type Real = f64;

/// Guard added to a standard deviation before dividing by it.
pub const STD_EPSILON: Real = 1e-6;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<Real>() / values.len() as Real)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std(values: &[Real]) -> Option<Real> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: Real = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as Real).sqrt())
}

/// Standard score of `value` against a baseline mean and deviation.
pub fn z_score(value: Real, mean: Real, std: Real) -> Real {
    (value - mean) / (std + STD_EPSILON)
}
