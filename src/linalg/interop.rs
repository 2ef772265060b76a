//! Conversions to and from nalgebra.

use nalgebra as na;

use super::{Matrix3, Matrix4, Vector3};

impl From<Vector3> for na::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        na::Vector3::new(v.x(), v.y(), v.z())
    }
}

impl From<na::Vector3<f64>> for Vector3 {
    fn from(v: na::Vector3<f64>) -> Self {
        Vector3::from_coords(v.x, v.y, v.z)
    }
}

impl From<Vector3> for na::Point3<f64> {
    fn from(v: Vector3) -> Self {
        na::Point3::new(v.x(), v.y(), v.z())
    }
}

impl From<Matrix3> for na::Matrix3<f64> {
    fn from(m: Matrix3) -> Self {
        let r = m.rows();
        na::Matrix3::new(
            r[0][0], r[0][1], r[0][2],
            r[1][0], r[1][1], r[1][2],
            r[2][0], r[2][1], r[2][2],
        )
    }
}

impl From<na::Matrix3<f64>> for Matrix3 {
    fn from(m: na::Matrix3<f64>) -> Self {
        Matrix3::from_rows([
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ])
    }
}

impl From<Matrix4> for na::Matrix4<f64> {
    fn from(m: Matrix4) -> Self {
        let r = m.rows();
        na::Matrix4::from_fn(|i, j| r[i][j])
    }
}

impl From<na::Matrix4<f64>> for Matrix4 {
    fn from(m: na::Matrix4<f64>) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = m[(i, j)];
            }
        }
        Matrix4::from_rows(rows)
    }
}
