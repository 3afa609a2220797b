use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::AddAssign;

/// Dense row-major matrix. A layer's weights are stored with one row per
/// destination unit and one column per source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Fills a (rows, cols) matrix with N(0, 1) samples multiplied by `scale`.
    ///
    /// Use `scale = 1.0` for plain standard-normal weights, or
    /// `1 / sqrt(cols)` to keep the variance of the weighted input sum
    /// independent of fan-in.
    pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for w in row.iter_mut() {
                *w = Matrix::sample_standard_normal(rng) * scale;
            }
        }
        res
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.cols, v.len(), "matrix has {} columns, vector has {} entries", self.cols, v.len());
        self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Transposed product `selfᵀ · v`, without materialising the transpose.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.rows, v.len(), "matrix has {} rows, vector has {} entries", self.rows, v.len());
        let mut res = vec![0.0; self.cols];
        for (row, &d) in self.data.iter().zip(v) {
            for (r, w) in res.iter_mut().zip(row) {
                *r += w * d;
            }
        }
        res
    }

    /// Outer product `u · vᵀ`, shape (u.len(), v.len()).
    pub fn outer(u: &[f64], v: &[f64]) -> Matrix {
        Matrix {
            rows: u.len(),
            cols: v.len(),
            data: u.iter().map(|&a| v.iter().map(|&b| a * b).collect()).collect(),
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, Vec::len),
            data
        }
    }

    /// True when `data` really has `rows` rows of `cols` entries each.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().flatten().map(|w| w * w).sum()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += y;
            }
        }
    }
}
