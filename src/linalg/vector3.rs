//! 3D vector.
//!
//! The value type read from and written to three form fields. All
//! operations are pure and return new values.

use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::{precision, MatopsError, Result};

/// A 3D vector {X, Y, Z}.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    /// Creates a null vector (0, 0, 0).
    #[inline]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Creates a vector with given coordinates.
    #[inline]
    pub const fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Unit vector along X.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::from_coords(1.0, 0.0, 0.0)
    }

    /// Unit vector along Y.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::from_coords(0.0, 1.0, 0.0)
    }

    /// Unit vector along Z.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::from_coords(0.0, 0.0, 1.0)
    }

    /// Sets all three coordinates.
    #[inline]
    pub fn set_coord(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Returns the X coordinate.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the Y coordinate.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the Z coordinate.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Returns all three coordinates as a tuple.
    #[inline]
    pub const fn coords(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Componentwise sum.
    #[inline]
    pub fn add(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Componentwise difference `self - other`.
    #[inline]
    pub fn subtract(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Multiplies every component by `k`.
    #[inline]
    pub fn scale(&self, k: f64) -> Vector3 {
        Vector3 {
            x: self.x * k,
            y: self.y * k,
            z: self.z * k,
        }
    }

    /// Returns the reversed vector.
    #[inline]
    pub fn negate(&self) -> Vector3 {
        Vector3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Computes dot product.
    #[inline]
    pub const fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product `self × other`.
    #[inline]
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns the magnitude (length).
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns square of magnitude.
    #[inline]
    pub const fn square_magnitude(&self) -> f64 {
        self.dot(self)
    }

    /// Returns the unit vector with the same direction.
    ///
    /// Fails with `DegenerateInput` when the magnitude is below
    /// `precision::DEGENERATE_LENGTH`.
    pub fn normalize(&self) -> Result<Vector3> {
        let d = self.magnitude();
        if d < precision::DEGENERATE_LENGTH {
            return Err(MatopsError::DegenerateInput {
                operation: "normalize",
                magnitude: d,
            });
        }
        Ok(self.scale(1.0 / d))
    }

    /// Returns the angle to `other` in radians, in `[0, PI]`.
    ///
    /// Fails with `DegenerateInput` if either vector is near zero length.
    pub fn angle_between(&self, other: &Vector3) -> Result<f64> {
        let a = self.normalize()?;
        let b = other.normalize()?;
        Ok(a.dot(&b).clamp(-1.0, 1.0).acos())
    }

    /// Returns true if the distance to `other` is within `tolerance`.
    #[inline]
    pub fn is_equal(&self, other: &Vector3, tolerance: f64) -> bool {
        self.subtract(other).magnitude() <= tolerance
    }
}

impl std::ops::Add for Vector3 {
    type Output = Vector3;
    #[inline]
    fn add(self, other: Vector3) -> Vector3 {
        Vector3::add(&self, &other)
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Vector3;
    #[inline]
    fn sub(self, other: Vector3) -> Vector3 {
        self.subtract(&other)
    }
}

impl std::ops::Mul<f64> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, scalar: f64) -> Vector3 {
        self.scale(scalar)
    }
}

impl std::ops::Mul<Vector3> for f64 {
    type Output = Vector3;
    #[inline]
    fn mul(self, v: Vector3) -> Vector3 {
        v.scale(self)
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Vector3;
    #[inline]
    fn neg(self) -> Vector3 {
        self.negate()
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of bounds: {}", index),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of bounds: {}", index),
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3::from_coords(arr[0], arr[1], arr[2])
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    #[inline]
    fn from(tuple: (f64, f64, f64)) -> Self {
        Vector3::from_coords(tuple.0, tuple.1, tuple.2)
    }
}

impl From<Vector3> for [f64; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        precision::COMPUTATIONAL
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
