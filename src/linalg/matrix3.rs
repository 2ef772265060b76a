//! 3x3 matrix.
//!
//! Fields are named after the pose-matrix convention: row 0 is
//! `(xx, yx, zx)`, row 1 is `(xy, yy, zy)`, row 2 is `(xz, yz, zz)`.
//! Columns are therefore the images of the basis vectors.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::Vector3;
use crate::precision;

/// 3x3 matrix, row-major over the labeled triples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    xx: f64,
    yx: f64,
    zx: f64,
    xy: f64,
    yy: f64,
    zy: f64,
    xz: f64,
    yz: f64,
    zz: f64,
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    /// Creates a matrix from nine values in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        xx: f64, yx: f64, zx: f64,
        xy: f64, yy: f64, zy: f64,
        xz: f64, yz: f64, zz: f64,
    ) -> Self {
        Self { xx, yx, zx, xy, yy, zy, xz, yz, zz }
    }

    /// Creates identity matrix.
    pub const fn identity() -> Self {
        Self::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Creates zero matrix.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Creates a matrix from `m[row][col]`.
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self::new(
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        )
    }

    /// Creates a matrix whose columns are the given axis vectors.
    pub fn from_columns(x_axis: &Vector3, y_axis: &Vector3, z_axis: &Vector3) -> Self {
        Self::new(
            x_axis.x(), y_axis.x(), z_axis.x(),
            x_axis.y(), y_axis.y(), z_axis.y(),
            x_axis.z(), y_axis.z(), z_axis.z(),
        )
    }

    /// Returns the entries as `m[row][col]`.
    pub const fn rows(&self) -> [[f64; 3]; 3] {
        [
            [self.xx, self.yx, self.zx],
            [self.xy, self.yy, self.zy],
            [self.xz, self.yz, self.zz],
        ]
    }

    /// Gets value at (row, col), 0-indexed.
    /// Panics if either index is not in {0, 1, 2}.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.rows()[row][col]
    }

    /// Sets value at (row, col), 0-indexed.
    /// Panics if either index is not in {0, 1, 2}.
    pub fn set_value(&mut self, row: usize, col: usize, value: f64) {
        let mut m = self.rows();
        m[row][col] = value;
        *self = Self::from_rows(m);
    }

    /// Returns row `index` as a vector.
    pub fn row(&self, index: usize) -> Vector3 {
        Vector3::from(self.rows()[index])
    }

    /// Returns column `index` as a vector.
    pub fn column(&self, index: usize) -> Vector3 {
        let m = self.rows();
        Vector3::from_coords(m[0][index], m[1][index], m[2][index])
    }

    /// Computes determinant by cofactor expansion along row 0.
    pub fn determinant(&self) -> f64 {
        self.xx * (self.yy * self.zz - self.zy * self.yz)
            - self.yx * (self.xy * self.zz - self.zy * self.xz)
            + self.zx * (self.xy * self.yz - self.yy * self.xz)
    }

    /// Returns transposed matrix (xy<->yx, xz<->zx, yz<->zy).
    pub fn transpose(&self) -> Matrix3 {
        Matrix3 {
            yx: self.xy,
            xy: self.yx,
            zx: self.xz,
            xz: self.zx,
            zy: self.yz,
            yz: self.zy,
            ..*self
        }
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix3) -> Matrix3 {
        let a = self.rows();
        let b = other.rows();
        let mut m = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    m[i][j] += a[i][k] * b[k][j];
                }
            }
        }
        Matrix3::from_rows(m)
    }

    /// Multiplies matrix by a column vector.
    pub fn multiply_vector(&self, v: &Vector3) -> Vector3 {
        Vector3::from_coords(
            self.xx * v.x() + self.yx * v.y() + self.zx * v.z(),
            self.xy * v.x() + self.yy * v.y() + self.zy * v.z(),
            self.xz * v.x() + self.yz * v.y() + self.zz * v.z(),
        )
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// Inverse via the adjugate.
    ///
    /// Returns None if the matrix is singular (|det| < `precision::SINGULAR`).
    pub fn inverted(&self) -> Option<Matrix3> {
        let det = self.determinant();
        if det.abs() < precision::SINGULAR {
            return None;
        }

        let m = self.rows();
        let inv_det = 1.0 / det;

        let m00 = (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det;
        let m01 = -(m[0][1] * m[2][2] - m[0][2] * m[2][1]) * inv_det;
        let m02 = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;

        let m10 = -(m[1][0] * m[2][2] - m[1][2] * m[2][0]) * inv_det;
        let m11 = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
        let m12 = -(m[0][0] * m[1][2] - m[0][2] * m[1][0]) * inv_det;

        let m20 = (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det;
        let m21 = -(m[0][0] * m[2][1] - m[0][1] * m[2][0]) * inv_det;
        let m22 = (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det;

        Some(Matrix3::from_rows([
            [m00, m01, m02],
            [m10, m11, m12],
            [m20, m21, m22],
        ]))
    }

    /// Returns true if every entry is within `tolerance` of the identity.
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.abs_diff_eq(&Matrix3::identity(), tolerance)
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, other: Matrix3) -> Matrix3 {
        self.multiply(&other)
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.multiply_vector(&v)
    }
}

impl AbsDiffEq for Matrix3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        precision::COMPUTATIONAL
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        let (a, b) = (self.rows(), other.rows());
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| x.abs_diff_eq(y, epsilon))
    }
}

impl RelativeEq for Matrix3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        let (a, b) = (self.rows(), other.rows());
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| x.relative_eq(y, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat_identity() {
        let m = Matrix3::identity();
        assert_eq!(m.value(0, 0), 1.0);
        assert_eq!(m.value(1, 1), 1.0);
        assert_eq!(m.value(2, 2), 1.0);
        assert_eq!(m.value(0, 1), 0.0);
        assert_eq!(Matrix3::default(), m);
    }

    #[test]
    fn test_mat_determinant() {
        assert_eq!(Matrix3::identity().determinant(), 1.0);

        let singular = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(singular.determinant(), 0.0);

        let m = Matrix3::new(2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 1.0);
        // 2*(3-2) - 0 + 1*(1-3)
        assert_eq!(m.determinant(), 0.0);

        let m = Matrix3::new(6.0, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0);
        assert!((m.determinant() - -306.0).abs() < 1e-10);
    }

    #[test]
    fn test_mat_determinant_zero_row() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0);
        assert_eq!(m.determinant(), 0.0);
    }

    #[test]
    fn test_mat_transpose() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let t = m.transpose();
        assert_eq!(t.rows(), [[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]]);
        assert_eq!(t.transpose(), m);
        assert_eq!(t.determinant(), m.determinant());
    }

    #[test]
    fn test_mat_multiply() {
        let a = Matrix3::new(1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0);
        let b = Matrix3::new(1.0, 0.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let ab = a * b;
        assert_eq!(ab.rows(), [[7.0, 2.0, 0.0], [3.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_eq!(a.multiply(&Matrix3::identity()), a);
        assert_eq!(Matrix3::identity().multiply(&a), a);
    }

    #[test]
    fn test_mat_columns_are_axes() {
        let x = Vector3::from_coords(0.0, 1.0, 0.0);
        let y = Vector3::from_coords(-1.0, 0.0, 0.0);
        let z = Vector3::unit_z();
        let m = Matrix3::from_columns(&x, &y, &z);
        assert_eq!(m.column(0), x);
        assert_eq!(m.column(1), y);
        assert_eq!(m.row(0), Vector3::from_coords(0.0, -1.0, 0.0));
        assert_eq!(m * Vector3::unit_x(), x);
        assert_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn test_mat_set_value() {
        let mut m = Matrix3::zero();
        m.set_value(1, 2, 4.0);
        assert_eq!(m.value(1, 2), 4.0);
        assert_eq!(m.column(2), Vector3::from_coords(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_mat_inverse() {
        let m = Matrix3::new(2.0, 0.0, 0.0, 0.0, 4.0, 0.0, 1.0, 0.0, 1.0);
        let inv = m.inverted().unwrap();
        assert_abs_diff_eq!(m * inv, Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(inv * m, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_mat_singular_has_no_inverse() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert!(m.inverted().is_none());
    }

    #[test]
    fn test_mat_trace() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.trace(), 15.0);
    }
}
