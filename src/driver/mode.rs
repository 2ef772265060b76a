//! Operation modes and the data shapes they read and write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::linalg::{Matrix3, Matrix4, Vector3};
use crate::{MatopsError, Result};

/// Number of slots in one field group of the form grid (3 rows of 4).
pub const GRID_SLOTS: usize = 12;

/// Operation selected in the dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Compose two pose matrices.
    #[default]
    Multiply,
    /// Field-by-field sum of two pose matrices.
    Add,
    /// Determinant of a 3x3 matrix.
    Determinant,
    /// Transpose the rotation part of a pose matrix.
    Transpose,
    /// Cross product of two vectors.
    VectorCrossProduct,
    /// X axis of a pose matrix.
    XDirection,
    /// Y axis of a pose matrix.
    YDirection,
    /// Z axis of a pose matrix.
    ZDirection,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::Multiply,
        Mode::Add,
        Mode::Determinant,
        Mode::Transpose,
        Mode::VectorCrossProduct,
        Mode::XDirection,
        Mode::YDirection,
        Mode::ZDirection,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Multiply => "multiply",
            Mode::Add => "add",
            Mode::Determinant => "determinant",
            Mode::Transpose => "transpose",
            Mode::VectorCrossProduct => "vector-cross-product",
            Mode::XDirection => "x-direction",
            Mode::YDirection => "y-direction",
            Mode::ZDirection => "z-direction",
        }
    }

    /// Input and output shapes for this mode.
    pub const fn layout(self) -> ModeLayout {
        match self {
            Mode::Multiply | Mode::Add => {
                ModeLayout::binary(DataShape::Matrix4, DataShape::Matrix4, DataShape::Matrix4)
            }
            Mode::Determinant => ModeLayout::unary(DataShape::Matrix3, DataShape::Scalar),
            Mode::Transpose => ModeLayout::unary(DataShape::Matrix4, DataShape::Matrix4),
            Mode::VectorCrossProduct => {
                ModeLayout::binary(DataShape::Vector3, DataShape::Vector3, DataShape::Vector3)
            }
            Mode::XDirection | Mode::YDirection | Mode::ZDirection => {
                ModeLayout::unary(DataShape::Matrix4, DataShape::Vector3)
            }
        }
    }

    /// Axis index for the direction modes.
    pub const fn axis(self) -> Option<usize> {
        match self {
            Mode::XDirection => Some(0),
            Mode::YDirection => Some(1),
            Mode::ZDirection => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown mode {0:?}")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Shape of the data held by one field group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataShape {
    /// Twelve fields, the upper 3x4 block.
    Matrix4,
    /// Nine fields in the 12-slot grid; every 4th slot is blank.
    Matrix3,
    /// Three fields.
    Vector3,
    /// One field.
    Scalar,
}

impl DataShape {
    /// Grid slots used by this shape, in value order.
    pub const fn slots(self) -> &'static [usize] {
        match self {
            DataShape::Matrix4 => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            DataShape::Matrix3 => &[0, 1, 2, 4, 5, 6, 8, 9, 10],
            DataShape::Vector3 => &[0, 1, 2],
            DataShape::Scalar => &[0],
        }
    }

    /// Number of values in this shape.
    pub const fn len(self) -> usize {
        self.slots().len()
    }

    /// Returns true if `slot` is part of this shape.
    pub fn uses_slot(self, slot: usize) -> bool {
        self.slots().contains(&slot)
    }
}

impl fmt::Display for DataShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataShape::Matrix4 => "matrix4",
            DataShape::Matrix3 => "matrix3",
            DataShape::Vector3 => "vector3",
            DataShape::Scalar => "scalar",
        })
    }
}

/// Shapes of the two input groups and the result group for a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeLayout {
    pub first: DataShape,
    pub second: Option<DataShape>,
    pub result: DataShape,
}

impl ModeLayout {
    const fn unary(first: DataShape, result: DataShape) -> Self {
        Self { first, second: None, result }
    }

    const fn binary(first: DataShape, second: DataShape, result: DataShape) -> Self {
        Self { first, second: Some(second), result }
    }

    /// Shape shown in `group`, or None if the group is unused.
    pub const fn shape(&self, group: FieldGroup) -> Option<DataShape> {
        match group {
            FieldGroup::First => Some(self.first),
            FieldGroup::Second => self.second,
            FieldGroup::Result => Some(self.result),
        }
    }
}

/// One 12-slot group of fields on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGroup {
    First,
    Second,
    Result,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 3] = [FieldGroup::First, FieldGroup::Second, FieldGroup::Result];

    pub(crate) const fn index(self) -> usize {
        match self {
            FieldGroup::First => 0,
            FieldGroup::Second => 1,
            FieldGroup::Result => 2,
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldGroup::First => "first",
            FieldGroup::Second => "second",
            FieldGroup::Result => "result",
        })
    }
}

/// A value read from or written to a field group.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Value {
    Matrix4(Matrix4),
    Matrix3(Matrix3),
    Vector3(Vector3),
    Scalar(f64),
}

impl Value {
    pub const fn shape(&self) -> DataShape {
        match self {
            Value::Matrix4(_) => DataShape::Matrix4,
            Value::Matrix3(_) => DataShape::Matrix3,
            Value::Vector3(_) => DataShape::Vector3,
            Value::Scalar(_) => DataShape::Scalar,
        }
    }

    /// Values in the order of `self.shape().slots()`.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Value::Matrix4(m) => m.fields().to_vec(),
            Value::Matrix3(m) => m.rows().iter().flatten().copied().collect(),
            Value::Vector3(v) => <[f64; 3]>::from(*v).to_vec(),
            Value::Scalar(s) => vec![*s],
        }
    }

    /// Lays the value out on the 12-slot grid; unused slots are None.
    pub fn to_slots(&self) -> [Option<f64>; GRID_SLOTS] {
        let mut slots = [None; GRID_SLOTS];
        for (&slot, value) in self.shape().slots().iter().zip(self.values()) {
            slots[slot] = Some(value);
        }
        slots
    }

    /// Builds a value of `shape` from its values in slot order.
    pub fn from_values(shape: DataShape, values: &[f64]) -> Result<Value> {
        if values.len() != shape.len() {
            return Err(MatopsError::ShapeMismatch {
                shape,
                expected: shape.len(),
                found: values.len(),
            });
        }
        let v = values;
        Ok(match shape {
            DataShape::Matrix4 => {
                let mut fields = [0.0; 12];
                fields.copy_from_slice(v);
                Value::Matrix4(Matrix4::from_fields(fields))
            }
            DataShape::Matrix3 => Value::Matrix3(Matrix3::new(v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8])),
            DataShape::Vector3 => Value::Vector3(Vector3::from_coords(v[0], v[1], v[2])),
            DataShape::Scalar => Value::Scalar(v[0]),
        })
    }
}
