use crate::error::MatrixError;
use crate::matrix::element::Scalar;
use crate::utils::{nearly_equal, nearly_zero};
use itertools::Itertools;
use rand::Rng;
use std::fmt;
use std::ops;

/// Square matrix with a compile-time dimension, stored row-major.
/// Copies are deep; assigning or passing one duplicates all N*N cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T, const N: usize> {
    rows: [[T; N]; N],
}

impl<T: Scalar, const N: usize> SquareMatrix<T, N> {
    pub fn new() -> SquareMatrix<T, N> {
        SquareMatrix {
            rows: [[T::zero(); N]; N],
        }
    }

    pub fn identity() -> SquareMatrix<T, N> {
        let mut result = SquareMatrix::new();
        for i in 0..N {
            result.rows[i][i] = T::one();
        }
        result
    }

    /// Fills every cell with a uniformly-distributed integer in
    /// [min, max], drawn from the given generator.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, min: i32, max: i32) {
        for row in self.rows.iter_mut() {
            for cell in row.iter_mut() {
                let value = rng.gen_range(min..=max);
                *cell = T::from(value).unwrap_or_else(T::zero);
            }
        }
    }

    /// Gauss-Jordan elimination against an identity-initialized result.
    ///
    /// A zero pivot defers its column to a later pass, since eliminating
    /// another column can make it non-zero. A pass that defers every
    /// remaining column proves no pass ever makes progress again, and the
    /// matrix is reported singular.
    pub fn inverse(&self) -> Result<SquareMatrix<T, N>, MatrixError> {
        let mut work = self.clone();
        let mut result = SquareMatrix::identity();
        let mut processed = [false; N];
        let mut remaining = N;
        let mut pass = 0;

        while remaining > 0 {
            let before = remaining;
            pass += 1;

            for k in 0..N {
                if processed[k] {
                    continue;
                }
                if nearly_zero(work.rows[k][k]) {
                    log::trace!("pass {}: zero pivot at column {}, deferred", pass, k);
                    continue;
                }

                if !nearly_equal(work.rows[k][k], T::one()) {
                    let divisor = work.rows[k][k];
                    for j in 0..N {
                        work.rows[k][j] = work.rows[k][j] / divisor;
                        result.rows[k][j] = result.rows[k][j] / divisor;
                    }
                }

                for i in 0..N {
                    if i == k {
                        continue;
                    }
                    let multiplier = work.rows[i][k] / -work.rows[k][k];
                    for j in 0..N {
                        work.rows[i][j] = work.rows[i][j] + work.rows[k][j] * multiplier;
                        result.rows[i][j] = result.rows[i][j] + result.rows[k][j] * multiplier;
                    }
                }

                processed[k] = true;
                remaining -= 1;
            }

            if remaining == before {
                log::debug!("pass {} reduced no column, {} cannot be processed", pass, remaining);
                return Err(MatrixError::Singular);
            }
            log::debug!("elimination pass {}: {} columns left", pass, remaining);
        }

        Ok(result)
    }
}

impl<T: Scalar, const N: usize> Default for SquareMatrix<T, N> {
    fn default() -> SquareMatrix<T, N> {
        SquareMatrix::new()
    }
}

impl<T, const N: usize> From<[[T; N]; N]> for SquareMatrix<T, N> {
    fn from(rows: [[T; N]; N]) -> SquareMatrix<T, N> {
        SquareMatrix { rows }
    }
}

impl<T, const N: usize> ops::Index<usize> for SquareMatrix<T, N> {
    type Output = [T; N];

    fn index(&self, row: usize) -> &[T; N] {
        &self.rows[row]
    }
}

impl<T, const N: usize> ops::IndexMut<usize> for SquareMatrix<T, N> {
    fn index_mut(&mut self, row: usize) -> &mut [T; N] {
        &mut self.rows[row]
    }
}

impl<T: Scalar, const N: usize> ops::Mul<&SquareMatrix<T, N>> for &SquareMatrix<T, N> {
    type Output = SquareMatrix<T, N>;

    fn mul(self, rhs: &SquareMatrix<T, N>) -> SquareMatrix<T, N> {
        let mut result = SquareMatrix::new();

        for i in 0..N {
            for j in 0..N {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self.rows[i][k] * rhs.rows[k][j];
                }
                // Cancellation noise from float round trips snaps to 0.
                result.rows[i][j] = if nearly_zero(sum) { T::zero() } else { sum };
            }
        }

        result
    }
}

impl<T: Scalar, const N: usize> fmt::Display for SquareMatrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row.iter().map(|x| format!("{:12.2}", x)).join("\t"))?;
        }
        writeln!(f)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_nearly<const N: usize>(mat: &SquareMatrix<f64, N>, expected: [[f64; N]; N]) {
        for i in 0..N {
            for j in 0..N {
                assert!(
                    nearly_equal(mat[i][j], expected[i][j]),
                    "cell ({}, {}): {} != {}",
                    i,
                    j,
                    mat[i][j],
                    expected[i][j]
                );
            }
        }
    }

    #[test]
    fn test_new_is_zero() {
        let mat = SquareMatrix::<f64, 3>::new();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(mat[i][j], 0.0);
            }
        }
    }

    #[test]
    fn test_identity() {
        let id = SquareMatrix::<f64, 3>::identity();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[i][j], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn test_identity_mul() {
        let mat = SquareMatrix::from([[3.0, -1.0], [2.0, 5.0]]);
        let id = SquareMatrix::identity();
        assert_eq!(&mat * &id, mat);
        assert_eq!(&id * &mat, mat);
    }

    #[test]
    fn test_inverse_identity() {
        let id = SquareMatrix::<f64, 4>::identity();
        assert_eq!(id.inverse().unwrap(), id);
    }

    #[test]
    fn test_inverse_round_trip() {
        let mat = SquareMatrix::from([[2.0, 1.0, 1.0], [1.0, 3.0, 2.0], [1.0, 0.0, 0.0]]);
        let inverse = mat.inverse().unwrap();

        let expected = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_nearly(&(&mat * &inverse), expected);
        assert_nearly(&(&inverse * &mat), expected);
    }

    #[test]
    fn test_inverse_deferred_pivot() {
        // (0,0) starts at zero and only becomes usable once column 1 has
        // been eliminated.
        let mat = SquareMatrix::from([[0.0, 1.0], [1.0, 1.0]]);
        let inverse = mat.inverse().unwrap();
        assert_nearly(&inverse, [[-1.0, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_inverse_singular() {
        let mat = SquareMatrix::from([[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(mat.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn test_inverse_no_progress() {
        // A permutation matrix is invertible, but the algorithm never swaps
        // rows, so no pivot can ever become non-zero. Reported singular
        // instead of looping forever.
        let mat = SquareMatrix::from([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(mat.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn test_randomized_inverse_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut mat = SquareMatrix::<f64, 5>::new();
        mat.randomize(&mut rng, -9, 9);
        // Make it strictly diagonally dominant, so elimination never stalls.
        for i in 0..5 {
            mat[i][i] += 100.0;
        }

        let inverse = mat.inverse().unwrap();
        let mut expected = [[0.0; 5]; 5];
        for i in 0..5 {
            expected[i][i] = 1.0;
        }
        assert_nearly(&(&mat * &inverse), expected);
    }

    #[test]
    fn test_randomize_constant() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut mat = SquareMatrix::<f64, 3>::new();
        mat.randomize(&mut rng, 4, 4);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(mat[i][j], 4.0);
            }
        }
    }

    #[test]
    fn test_randomize_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut mat = SquareMatrix::<i32, 4>::new();
        mat.randomize(&mut rng, -9, 9);
        for i in 0..4 {
            for j in 0..4 {
                assert!((-9..=9).contains(&mat[i][j]));
            }
        }
    }

    #[test]
    fn test_mul_snaps_noise() {
        // 0.1 + 0.2 - 0.3 is not zero in f64, only close to it.
        assert_ne!(0.1 + 0.2 - 0.3, 0.0);

        let a = SquareMatrix::from([[0.1, 0.2, 0.3], [0.0; 3], [0.0; 3]]);
        let b = SquareMatrix::from([[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]]);
        let product = &a * &b;
        assert_eq!(product[0][0], 0.0);
    }

    #[test]
    fn test_display_format() {
        let mat = SquareMatrix::from([[1.0, -2.5], [3.25, 4.0]]);
        assert_eq!(
            format!("{}", mat),
            "        1.00\t       -2.50\n        3.25\t        4.00\n\n"
        );
    }
}
