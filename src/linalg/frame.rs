//! Coordinate system extracted from a pose matrix.

use serde::{Deserialize, Serialize};

use super::{Matrix3, Matrix4, Vector3};
use crate::Result;

/// Origin plus the three axis vectors of a pose.
///
/// Axes are stored as extracted; use [`CoordinateSystem::normalized`] when
/// unit axes are needed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub z_axis: Vector3,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::standard()
    }
}

impl CoordinateSystem {
    /// Standard right-handed coordinate system at origin.
    pub const fn standard() -> Self {
        Self {
            origin: Vector3::new(),
            x_axis: Vector3::unit_x(),
            y_axis: Vector3::unit_y(),
            z_axis: Vector3::unit_z(),
        }
    }

    /// Returns the X, Y and Z axes in order.
    pub const fn axes(&self) -> [Vector3; 3] {
        [self.x_axis, self.y_axis, self.z_axis]
    }

    /// Returns the same frame with every axis scaled to unit length.
    ///
    /// Fails with `DegenerateInput` if any axis is near zero length.
    pub fn normalized(&self) -> Result<CoordinateSystem> {
        Ok(CoordinateSystem {
            origin: self.origin,
            x_axis: self.x_axis.normalize()?,
            y_axis: self.y_axis.normalize()?,
            z_axis: self.z_axis.normalize()?,
        })
    }

    /// Returns true if the axes are right-handed (positive triple product).
    pub fn is_direct(&self) -> bool {
        self.x_axis.cross(&self.y_axis).dot(&self.z_axis) > 0.0
    }

    /// Rebuilds the pose matrix whose columns are these axes.
    pub fn to_matrix(&self) -> Matrix4 {
        let rotation = Matrix3::from_columns(&self.x_axis, &self.y_axis, &self.z_axis);
        Matrix4::from_parts(&rotation, &self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_standard() {
        let cs = CoordinateSystem::standard();
        assert!(cs.is_direct());
        assert!(cs.to_matrix().is_identity());
    }

    #[test]
    fn test_frame_round_trip() {
        let m = Matrix4::from_fields([0.0, -1.0, 0.0, 4.0, 1.0, 0.0, 0.0, 5.0, 0.0, 0.0, 1.0, 6.0]);
        let cs = m.coordinate_system_get();
        assert_eq!(cs.origin, Vector3::from_coords(4.0, 5.0, 6.0));
        assert_eq!(cs.x_axis, Vector3::unit_y());
        assert_eq!(cs.to_matrix(), m);
    }

    #[test]
    fn test_frame_normalized() {
        let cs = CoordinateSystem {
            origin: Vector3::new(),
            x_axis: Vector3::from_coords(2.0, 0.0, 0.0),
            y_axis: Vector3::from_coords(0.0, 3.0, 0.0),
            z_axis: Vector3::from_coords(0.0, 0.0, -4.0),
        };
        let unit = cs.normalized().unwrap();
        assert_eq!(unit.axes(), [Vector3::unit_x(), Vector3::unit_y(), -Vector3::unit_z()]);
        assert!(!unit.is_direct());
    }

    #[test]
    fn test_frame_normalized_degenerate() {
        let cs = Matrix4::from_fields([0.0; 12]).coordinate_system_get();
        assert!(cs.normalized().is_err());
    }
}
