use num_traits::ToPrimitive;

/// Absolute tolerance below which a value is treated as exactly zero.
pub const EPSILON: f64 = 1e-6;

// Values that cannot be represented as f64 never compare as nearly equal.
pub fn nearly_equal<T: ToPrimitive>(a: T, b: T) -> bool {
    match (a.to_f64(), b.to_f64()) {
        (Some(a), Some(b)) => (a - b).abs() < EPSILON,
        _ => false,
    }
}

pub fn nearly_zero<T: ToPrimitive>(value: T) -> bool {
    match value.to_f64() {
        Some(v) => v.abs() < EPSILON,
        None => false,
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
