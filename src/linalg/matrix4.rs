//! Pose matrix.
//!
//! A 4x4 homogeneous transform stored as a 3x4 affine block plus a bottom
//! row `(ox, oy, oz, scale)`, with a cached identity flag. The affine block
//! uses the same row layout as [`Matrix3`] with the translation
//! `(xt, yt, zt)` as the fourth column:
//!
//! ```text
//! | xx yx zx xt |
//! | xy yy zy yt |
//! | xz yz zz zt |
//! | ox oy oz scale |
//! ```
//!
//! The identity flag is never set by hand. Every constructor and operation
//! recomputes it before returning.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::{CoordinateSystem, Matrix3, Vector3};
use crate::precision;

/// Homogeneous 4x4 transform with a cached identity flag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoseFields", into = "PoseFields")]
pub struct Matrix4 {
    identity: bool,
    xx: f64,
    yx: f64,
    zx: f64,
    xt: f64,
    xy: f64,
    yy: f64,
    zy: f64,
    yt: f64,
    xz: f64,
    yz: f64,
    zz: f64,
    zt: f64,
    ox: f64,
    oy: f64,
    oz: f64,
    scale: f64,
}

/// Serialized form of [`Matrix4`]; the identity flag is not part of it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct PoseFields {
    rotation: Matrix3,
    translation: Vector3,
    #[serde(default = "affine_bottom_row")]
    bottom: [f64; 4],
}

const fn affine_bottom_row() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl From<PoseFields> for Matrix4 {
    fn from(fields: PoseFields) -> Self {
        let mut m = Matrix4::from_parts(&fields.rotation, &fields.translation);
        m.set_bottom_row(fields.bottom);
        m
    }
}

impl From<Matrix4> for PoseFields {
    fn from(m: Matrix4) -> Self {
        PoseFields {
            rotation: m.rotation_part(),
            translation: m.translation_part(),
            bottom: m.bottom_row(),
        }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    /// Creates the identity transform.
    pub const fn identity() -> Self {
        Self {
            identity: true,
            xx: 1.0,
            yx: 0.0,
            zx: 0.0,
            xt: 0.0,
            xy: 0.0,
            yy: 1.0,
            zy: 0.0,
            yt: 0.0,
            xz: 0.0,
            yz: 0.0,
            zz: 1.0,
            zt: 0.0,
            ox: 0.0,
            oy: 0.0,
            oz: 0.0,
            scale: 1.0,
        }
    }

    /// Pure translation by (dx, dy, dz) with an identity rotation part.
    pub fn identity_by_translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            xt: dx,
            yt: dy,
            zt: dz,
            ..Self::identity()
        }
        .identity_flag_refresh()
    }

    /// Creates an affine transform from a rotation part and a translation.
    pub fn from_parts(rotation: &Matrix3, translation: &Vector3) -> Self {
        let r = rotation.rows();
        Self::from_rows([
            [r[0][0], r[0][1], r[0][2], translation.x()],
            [r[1][0], r[1][1], r[1][2], translation.y()],
            [r[2][0], r[2][1], r[2][2], translation.z()],
            affine_bottom_row(),
        ])
    }

    /// Creates an affine transform from the twelve upper fields in
    /// row-major order: `[xx, yx, zx, xt, xy, yy, zy, yt, xz, yz, zz, zt]`.
    pub fn from_fields(f: [f64; 12]) -> Self {
        Self::from_rows([
            [f[0], f[1], f[2], f[3]],
            [f[4], f[5], f[6], f[7]],
            [f[8], f[9], f[10], f[11]],
            affine_bottom_row(),
        ])
    }

    /// Returns the twelve upper fields in the order taken by [`Matrix4::from_fields`].
    pub const fn fields(&self) -> [f64; 12] {
        [
            self.xx, self.yx, self.zx, self.xt,
            self.xy, self.yy, self.zy, self.yt,
            self.xz, self.yz, self.zz, self.zt,
        ]
    }

    /// Creates a transform from all sixteen entries, `m[row][col]`.
    pub fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self {
            identity: false,
            xx: m[0][0],
            yx: m[0][1],
            zx: m[0][2],
            xt: m[0][3],
            xy: m[1][0],
            yy: m[1][1],
            zy: m[1][2],
            yt: m[1][3],
            xz: m[2][0],
            yz: m[2][1],
            zz: m[2][2],
            zt: m[2][3],
            ox: m[3][0],
            oy: m[3][1],
            oz: m[3][2],
            scale: m[3][3],
        }
        .identity_flag_refresh()
    }

    /// Returns all sixteen entries as `m[row][col]`.
    pub const fn rows(&self) -> [[f64; 4]; 4] {
        [
            [self.xx, self.yx, self.zx, self.xt],
            [self.xy, self.yy, self.zy, self.yt],
            [self.xz, self.yz, self.zz, self.zt],
            [self.ox, self.oy, self.oz, self.scale],
        ]
    }

    /// Returns the cached identity flag.
    #[inline]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    /// Returns the 3x3 rotation/scale part.
    pub const fn rotation_part(&self) -> Matrix3 {
        Matrix3::new(
            self.xx, self.yx, self.zx,
            self.xy, self.yy, self.zy,
            self.xz, self.yz, self.zz,
        )
    }

    /// Returns the translation part.
    #[inline]
    pub const fn translation_part(&self) -> Vector3 {
        Vector3::from_coords(self.xt, self.yt, self.zt)
    }

    /// Returns the bottom row `(ox, oy, oz, scale)`.
    #[inline]
    pub const fn bottom_row(&self) -> [f64; 4] {
        [self.ox, self.oy, self.oz, self.scale]
    }

    /// Returns the scale entry of the bottom row.
    #[inline]
    pub const fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Replaces the rotation part.
    pub fn set_rotation_part(&mut self, rotation: &Matrix3) {
        let r = rotation.rows();
        let mut m = self.rows();
        for (row, src) in m.iter_mut().zip(r.iter()) {
            row[..3].copy_from_slice(src);
        }
        *self = Self::from_rows(m);
    }

    /// Replaces the translation part.
    pub fn set_translation(&mut self, translation: &Vector3) {
        self.xt = translation.x();
        self.yt = translation.y();
        self.zt = translation.z();
        *self = self.identity_flag_refresh();
    }

    /// Replaces the bottom row `(ox, oy, oz, scale)`.
    pub fn set_bottom_row(&mut self, bottom: [f64; 4]) {
        self.ox = bottom[0];
        self.oy = bottom[1];
        self.oz = bottom[2];
        self.scale = bottom[3];
        *self = self.identity_flag_refresh();
    }

    /// Recomputes the identity flag from the numeric fields.
    ///
    /// The flag is true iff the rotation part is the identity, the
    /// translation is zero and the bottom row is `(0, 0, 0, 1)`, all within
    /// `precision::IDENTITY`.
    #[must_use]
    pub fn identity_flag_refresh(mut self) -> Matrix4 {
        let tol = precision::IDENTITY;
        self.identity = self.rotation_part().is_identity(tol)
            && [self.xt, self.yt, self.zt, self.ox, self.oy, self.oz]
                .iter()
                .all(|v| precision::is_zero(*v, tol))
            && precision::is_zero(self.scale - 1.0, tol);
        self
    }

    /// Composes two transforms as `self · other`: `other` is applied first,
    /// then `self`.
    ///
    /// For affine inputs the rotation part is `R(self)·R(other)` and the
    /// translation is `R(self)·t(other) + t(self)`.
    pub fn cross_product(&self, other: &Matrix4) -> Matrix4 {
        if other.identity {
            return *self;
        }
        if self.identity {
            return *other;
        }

        let a = self.rows();
        let b = other.rows();
        let mut m = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    m[i][j] += a[i][k] * b[k][j];
                }
            }
        }
        Matrix4::from_rows(m)
    }

    /// Transposes the rotation part only. Translation and bottom row are
    /// carried through unchanged.
    pub fn transpose(&self) -> Matrix4 {
        let mut result = *self;
        result.set_rotation_part(&self.rotation_part().transpose());
        result
    }

    /// Field-by-field sum of the twelve upper entries.
    ///
    /// This is not a composition: adding two identities gives a rotation
    /// diagonal of 2. The bottom row of the result is `(0, 0, 0, 1)`.
    pub fn add(&self, other: &Matrix4) -> Matrix4 {
        let a = self.fields();
        let b = other.fields();
        let mut sum = [0.0; 12];
        for (s, (x, y)) in sum.iter_mut().zip(a.iter().zip(b.iter())) {
            *s = x + y;
        }
        Matrix4::from_fields(sum)
    }

    /// Extracts origin and axes: the translation and the three columns of
    /// the rotation part. Axes are returned as stored, not normalized.
    pub fn coordinate_system_get(&self) -> CoordinateSystem {
        CoordinateSystem {
            origin: self.translation_part(),
            x_axis: Vector3::from_coords(self.xx, self.xy, self.xz),
            y_axis: Vector3::from_coords(self.yx, self.yy, self.yz),
            z_axis: Vector3::from_coords(self.zx, self.zy, self.zz),
        }
    }

    /// Transforms a point, dividing by the homogeneous weight when the
    /// bottom row is not affine.
    pub fn transform_point(&self, p: &Vector3) -> Vector3 {
        if self.identity {
            return *p;
        }
        let moved = self.rotation_part().multiply_vector(p).add(&self.translation_part());
        let w = self.ox * p.x() + self.oy * p.y() + self.oz * p.z() + self.scale;
        if precision::is_zero(w, precision::SINGULAR) || w == 1.0 {
            moved
        } else {
            moved.scale(1.0 / w)
        }
    }

    /// Transforms a direction: rotation part only, no translation.
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        self.rotation_part().multiply_vector(v)
    }

    /// Determinant of the full 4x4 matrix.
    pub fn determinant(&self) -> f64 {
        let m = self.rows();
        let mut det = 0.0;
        for (col, value) in m[0].iter().enumerate() {
            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            det += sign * value * minor3(&m, 0, col);
        }
        det
    }

    /// Inverse transform.
    ///
    /// Returns None if the matrix is singular. Affine matrices take the
    /// rotation-inverse path; anything else goes through Gauss-Jordan
    /// elimination with partial pivoting.
    pub fn inverted(&self) -> Option<Matrix4> {
        if self.identity {
            return Some(*self);
        }

        if self.is_affine() {
            let rot_inv = self.rotation_part().inverted()?;
            let trans = rot_inv.multiply_vector(&self.translation_part()).negate();
            return Some(Matrix4::from_parts(&rot_inv, &trans));
        }

        let mut a = self.rows();
        let mut inv = Matrix4::identity().rows();
        for col in 0..4 {
            let pivot = (col..4)
                .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
                .unwrap_or(col);
            if a[pivot][col].abs() < precision::SINGULAR {
                return None;
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);

            let p = a[col][col];
            for k in 0..4 {
                a[col][k] /= p;
                inv[col][k] /= p;
            }
            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }
        Some(Matrix4::from_rows(inv))
    }

    /// Returns true if the bottom row is exactly `(0, 0, 0, 1)`.
    fn is_affine(&self) -> bool {
        self.bottom_row() == affine_bottom_row()
    }
}

/// Determinant of the 3x3 minor obtained by removing `skip_row` and `skip_col`.
fn minor3(m: &[[f64; 4]; 4], skip_row: usize, skip_col: usize) -> f64 {
    let mut sub = [[0.0; 3]; 3];
    let rows = (0..4).filter(|&r| r != skip_row);
    for (i, r) in rows.enumerate() {
        let cols = (0..4).filter(|&c| c != skip_col);
        for (j, c) in cols.enumerate() {
            sub[i][j] = m[r][c];
        }
    }
    Matrix3::from_rows(sub).determinant()
}

impl std::ops::Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, other: Matrix4) -> Matrix4 {
        self.cross_product(&other)
    }
}

impl AbsDiffEq for Matrix4 {
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

impl RelativeEq for Matrix4 {
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
