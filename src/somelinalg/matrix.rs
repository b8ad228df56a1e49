//! Dense row-major matrix used by the calculator's matrix and linear-system screens.
//!
//! Shape invariant: `rows >= 1`, `cols >= 1`, `data.len() == rows * cols`. It is
//! checked by every constructor, so the algebra in `matrix_algebra` never sees a
//! ragged or empty grid.
use crate::calc_errors::MatrixError;
use nalgebra::DMatrix;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

fn check_shape(operation: &'static str, rows: usize, cols: usize) -> Result<(), MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::dimension(
            operation,
            "at least 1x1",
            format!("{}x{}", rows, cols),
        ));
    }
    Ok(())
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        check_shape("zeros", rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    pub fn identity(n: usize) -> Result<Matrix, MatrixError> {
        let mut m = Matrix::zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Build from nested rows; every row must have the same non-zero length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Matrix, MatrixError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        check_shape("from_rows", n_rows, n_cols)?;
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::dimension(
                    "from_rows",
                    format!("{} columns in every row", n_cols),
                    format!("{} columns in row {}", row.len(), i),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Build from a flat row-major slice.
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Matrix, MatrixError> {
        check_shape("from_row_slice", rows, cols)?;
        if values.len() != rows * cols {
            return Err(MatrixError::dimension(
                "from_row_slice",
                format!("{} values", rows * cols),
                format!("{} values", values.len()),
            ));
        }
        Ok(Matrix {
            rows,
            cols,
            data: values.to_vec(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), MatrixError> {
        if i >= self.rows || j >= self.cols {
            return Err(MatrixError::dimension(
                "set",
                format!("index inside {}x{}", self.rows, self.cols),
                format!("({}, {})", i, j),
            ));
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// New matrix of the given shape keeping the overlapping cells; new cells are 0.
    pub fn resized(&self, rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        let mut m = Matrix::zeros(rows, cols)?;
        for i in 0..rows.min(self.rows) {
            for j in 0..cols.min(self.cols) {
                m[(i, j)] = self[(i, j)];
            }
        }
        Ok(m)
    }

    /// `cols x rows` matrix with `t[(j, i)] == self[(i, j)]`
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.rows, self.cols, &self.data)
    }

    pub fn from_dmatrix(m: &DMatrix<f64>) -> Result<Matrix, MatrixError> {
        let (rows, cols) = m.shape();
        check_shape("from_dmatrix", rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(m[(i, j)]);
            }
        }
        Ok(Matrix { rows, cols, data })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.rows && j < self.cols, "matrix index out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(i < self.rows && j < self.cols, "matrix index out of bounds");
        &mut self.data[i * self.cols + j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let cells: Vec<String> = self.row(i).iter().map(|v| format!("{}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
