use crate::error::MatrixError;
use crate::matrix::element::Element;
use itertools::{iproduct, Itertools};
use num_traits::NumCast;
use rand::Rng;
use std::fmt;
use std::ops;

/// Runtime-sized square matrix. The size and the cell buffer are private so
/// they can never fall out of sync.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDyn<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Element> MatrixDyn<T> {
    pub fn new(size: usize) -> MatrixDyn<T> {
        MatrixDyn {
            size,
            cells: (0..size * size).map(|_| T::zero()).collect(),
        }
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<MatrixDyn<T>, MatrixError> {
        let size = rows.len();
        for row in &rows {
            if row.len() != size {
                return Err(MatrixError::NotSquare {
                    rows: size,
                    cols: row.len(),
                });
            }
        }

        Ok(MatrixDyn {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.size == 0 {
            return vec![];
        }
        self.cells.chunks(self.size).map(|row| row.into()).collect()
    }

    pub fn identity(size: usize) -> MatrixDyn<T> {
        MatrixDyn {
            size,
            cells: iproduct!(0..size, 0..size)
                .map(|(i, j)| if i == j { T::one() } else { T::zero() })
                .collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.cells[row * self.size + col].clone()
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        self.cells[row * self.size + col] = value;
    }

    /// Copy of the matrix with one row and one column excluded, the
    /// remaining cells keeping their relative order.
    pub fn submatrix(&self, row: usize, col: usize) -> Result<MatrixDyn<T>, MatrixError> {
        if self.size == 0 {
            return Err(MatrixError::Empty);
        }
        if row >= self.size || col >= self.size {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }

        let mut cells = Vec::with_capacity((self.size - 1) * (self.size - 1));
        fill_minor(&self.cells, self.size, row, col, &mut cells);
        Ok(MatrixDyn {
            size: self.size - 1,
            cells,
        })
    }

    /// Determinant by first-row cofactor expansion. Factorial cost, kept
    /// that way on purpose: this is the textbook definition, the efficient
    /// route is the fixed-size Gauss-Jordan variant.
    pub fn determinant(&self) -> Result<T, MatrixError> {
        if self.size == 0 {
            return Err(MatrixError::Empty);
        }

        let mut pool = Vec::with_capacity(self.size);
        Ok(determinant_rec(&self.cells, self.size, &mut pool))
    }

    pub fn cofactor_matrix(&self) -> Result<MatrixDyn<T>, MatrixError> {
        if self.size == 0 {
            return Err(MatrixError::Empty);
        }

        let mut result = MatrixDyn::new(self.size);
        let mut pool = Vec::with_capacity(self.size);
        let mut minor = Vec::with_capacity((self.size - 1) * (self.size - 1));

        for (i, j) in iproduct!(0..self.size, 0..self.size) {
            fill_minor(&self.cells, self.size, i, j, &mut minor);
            let det = determinant_rec(&minor, self.size - 1, &mut pool);
            let sign = if (i + j) % 2 == 0 { T::one() } else { -T::one() };
            result.cells[i * self.size + j] = sign * det;
        }

        Ok(result)
    }

    pub fn adjugate_matrix(&self) -> Result<MatrixDyn<T>, MatrixError> {
        Ok(self.cofactor_matrix()?.transpose())
    }

    /// Classical-adjoint inversion: the adjugate scaled by the reciprocal
    /// determinant. Exact over field elements such as `Rational`.
    pub fn inverse(&self) -> Result<MatrixDyn<T>, MatrixError> {
        let det = self.determinant()?;
        if det == T::zero() {
            return Err(MatrixError::Singular);
        }
        Ok(self.adjugate_matrix()?.scale(&(T::one() / det)))
    }

    pub fn transpose(&self) -> MatrixDyn<T> {
        MatrixDyn {
            size: self.size,
            cells: iproduct!(0..self.size, 0..self.size)
                .map(|(i, j)| self.at(j, i))
                .collect(),
        }
    }

    pub fn scale(&self, factor: &T) -> MatrixDyn<T> {
        MatrixDyn {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|x| x.clone() * factor.clone())
                .collect(),
        }
    }
}

impl<T: Element + NumCast> MatrixDyn<T> {
    /// Fills every cell with a uniformly-distributed integer in
    /// [min, max], drawn from the given generator.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, min: i32, max: i32) {
        for cell in self.cells.iter_mut() {
            let value = rng.gen_range(min..=max);
            *cell = T::from(value).unwrap_or_else(T::zero);
        }
    }
}

impl<T: Element> ops::Mul<&MatrixDyn<T>> for &MatrixDyn<T> {
    type Output = Result<MatrixDyn<T>, MatrixError>;

    fn mul(self, rhs: &MatrixDyn<T>) -> Result<MatrixDyn<T>, MatrixError> {
        if self.size != rhs.size {
            return Err(MatrixError::DimensionMismatch {
                left: self.size,
                right: rhs.size,
            });
        }

        Ok(MatrixDyn {
            size: self.size,
            cells: iproduct!(0..self.size, 0..self.size)
                .map(|(i, j)| (0..self.size).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                .collect(),
        })
    }
}

impl<T: Element> fmt::Display for MatrixDyn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size > 0 {
            for row in self.cells.chunks(self.size) {
                writeln!(f, "{}", row.iter().map(|x| format!("{}", x)).join("\t"))?;
            }
        }
        writeln!(f)
    }
}

// Copies every cell except the excluded row/column into `out`, preserving
// the relative order of the rest.
fn fill_minor<T: Element>(cells: &[T], size: usize, row: usize, col: usize, out: &mut Vec<T>) {
    out.clear();
    for i in 0..size {
        if i == row {
            continue;
        }
        for j in 0..size {
            if j == col {
                continue;
            }
            out.push(cells[i * size + j].clone());
        }
    }
}

// Recursive expansion along the first row. Each depth takes one scratch
// buffer from `pool` and returns it afterwards, so the whole recursion
// allocates at most `size` buffers no matter how many minors it visits.
fn determinant_rec<T: Element>(cells: &[T], size: usize, pool: &mut Vec<Vec<T>>) -> T {
    if size == 0 {
        // Empty minor of a 1x1 matrix; by convention its determinant is 1,
        // which keeps M * adjugate(M) == det(M) * I true down to size 1.
        return T::one();
    }
    if size == 1 {
        return cells[0].clone();
    }

    let mut minor = pool.pop().unwrap_or_default();
    let mut sum = T::zero();
    let mut sign = T::one();

    for j in 0..size {
        fill_minor(cells, size, 0, j, &mut minor);
        let det = determinant_rec(&minor, size - 1, pool);
        sum = sum + sign.clone() * cells[j].clone() * det;
        sign = -sign;
    }

    pool.push(minor);
    sum
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
