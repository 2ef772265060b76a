//! Session state shared by the configure and execute steps.

use tracing::{debug, warn};

use super::form::Form;
use super::mode::{DataShape, FieldGroup, Mode, ModeLayout, Value, GRID_SLOTS};
use crate::config::Settings;
use crate::{MatopsError, Result};

/// Evaluates `mode` on already-read input values.
///
/// `second` is ignored by unary modes. Fails with `ShapeMismatch` when an
/// input does not have the shape the mode expects, and with
/// `DegenerateInput` when `settings.normalize_axes` is set and the
/// requested axis has zero length.
pub fn evaluate(mode: Mode, first: &Value, second: Option<&Value>, settings: &Settings) -> Result<Value> {
    let value = match (mode, first, second) {
        (Mode::Multiply, Value::Matrix4(a), Some(Value::Matrix4(b))) => Value::Matrix4(a.cross_product(b)),
        (Mode::Add, Value::Matrix4(a), Some(Value::Matrix4(b))) => Value::Matrix4(a.add(b)),
        (Mode::Determinant, Value::Matrix3(m), _) => Value::Scalar(m.determinant()),
        (Mode::Transpose, Value::Matrix4(m), _) => Value::Matrix4(m.transpose()),
        (Mode::VectorCrossProduct, Value::Vector3(a), Some(Value::Vector3(b))) => Value::Vector3(a.cross(b)),
        (Mode::XDirection | Mode::YDirection | Mode::ZDirection, Value::Matrix4(m), _) => {
            let axes = m.coordinate_system_get().axes();
            let axis = axes[mode.axis().unwrap_or(0)];
            if settings.normalize_axes {
                Value::Vector3(axis.normalize()?)
            } else {
                Value::Vector3(axis)
            }
        }
        _ => return Err(shape_mismatch(mode.layout(), first, second)),
    };
    Ok(value)
}

fn shape_mismatch(layout: ModeLayout, first: &Value, second: Option<&Value>) -> MatopsError {
    let (shape, found) = if first.shape() != layout.first {
        (layout.first, first.shape().len())
    } else {
        let shape = layout.second.unwrap_or(layout.first);
        (shape, second.map_or(0, |v| v.shape().len()))
    };
    MatopsError::ShapeMismatch {
        shape,
        expected: shape.len(),
        found,
    }
}

/// The currently selected mode and the shapes it shows on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    mode: Mode,
    layout: ModeLayout,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl SessionState {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            layout: mode.layout(),
        }
    }

    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub const fn layout(&self) -> ModeLayout {
        self.layout
    }

    /// Input-configuration step: records `mode`, shows the slots each
    /// group needs, hides the rest, and clears any previous result.
    pub fn configure<F: Form + ?Sized>(&mut self, mode: Mode, form: &mut F, settings: &Settings) {
        self.mode = mode;
        self.layout = mode.layout();

        for group in FieldGroup::ALL {
            let shape = self.layout.shape(group);
            for slot in 0..GRID_SLOTS {
                let used = shape.is_some_and(|s| s.uses_slot(slot));
                form.set_visible(group, slot, used || !settings.hide_unused);
            }
        }
        for slot in 0..GRID_SLOTS {
            form.clear(FieldGroup::Result, slot);
        }

        debug!(
            %mode,
            first = %self.layout.first,
            second = ?self.layout.second.map(|s| s.to_string()),
            result = %self.layout.result,
            "configured form"
        );
    }

    /// Execute step: reads the inputs for the current mode, evaluates, and
    /// writes the result group.
    ///
    /// On failure the result group is left empty and the error is
    /// returned for the caller to show via [`MatopsError::user_message`].
    pub fn execute<F: Form + ?Sized>(&self, form: &mut F, settings: &Settings) -> Result<Value> {
        let result = self.read_and_evaluate(&*form, settings);
        match &result {
            Ok(value) => {
                form.write_value(FieldGroup::Result, value);
                debug!(mode = %self.mode, result = %value.shape(), "executed");
            }
            Err(err) => {
                for slot in 0..GRID_SLOTS {
                    form.clear(FieldGroup::Result, slot);
                }
                warn!(mode = %self.mode, %err, "operation failed");
            }
        }
        result
    }

    fn read_and_evaluate<F: Form + ?Sized>(&self, form: &F, settings: &Settings) -> Result<Value> {
        let first = form.read_value(FieldGroup::First, self.layout.first)?;
        let second = self
            .layout
            .second
            .map(|shape: DataShape| form.read_value(FieldGroup::Second, shape))
            .transpose()?;
        evaluate(self.mode, &first, second.as_ref(), settings)
    }
}
