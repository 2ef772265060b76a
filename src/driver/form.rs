//! Field-based form access.
//!
//! A host dialog exposes three groups of twelve numeric fields. The
//! [`Form`] trait is the boundary to that host: the driver only reads and
//! writes numbers and toggles visibility, and text parsing and formatting
//! stay on the host side. [`MemoryForm`] is the in-process host used by the
//! command-line front end and by tests.

use super::mode::{DataShape, FieldGroup, Value, GRID_SLOTS};
use crate::{MatopsError, Result};

/// Numeric field access provided by the host dialog.
pub trait Form {
    /// Reads the number in `slot` of `group`.
    fn read_real(&self, group: FieldGroup, slot: usize) -> Result<f64>;

    /// Writes `value` into `slot` of `group`. Result fields are rounded for
    /// display; input fields keep every digit so they read back unchanged.
    fn write_real(&mut self, group: FieldGroup, slot: usize, value: f64);

    /// Empties `slot` of `group`.
    fn clear(&mut self, group: FieldGroup, slot: usize);

    /// Shows or hides `slot` of `group`.
    fn set_visible(&mut self, group: FieldGroup, slot: usize, visible: bool);

    /// Reads a value of `shape` from `group`.
    fn read_value(&self, group: FieldGroup, shape: DataShape) -> Result<Value> {
        let values = shape
            .slots()
            .iter()
            .map(|&slot| self.read_real(group, slot))
            .collect::<Result<Vec<_>>>()?;
        Value::from_values(shape, &values)
    }

    /// Writes `value` into `group`, clearing the slots it does not use.
    fn write_value(&mut self, group: FieldGroup, value: &Value) {
        for (slot, entry) in value.to_slots().into_iter().enumerate() {
            match entry {
                Some(v) => self.write_real(group, slot, v),
                None => self.clear(group, slot),
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Field {
    text: String,
    visible: bool,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: true,
        }
    }
}

/// Most decimal places a result field is written with.
pub const MAX_DECIMALS: usize = 17;

/// In-memory form holding field text. Result fields use fixed decimals.
#[derive(Clone, Debug)]
pub struct MemoryForm {
    groups: [[Field; GRID_SLOTS]; 3],
    decimals: usize,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new(6)
    }
}

impl MemoryForm {
    /// Creates an empty form writing results with `decimals` places,
    /// capped at [`MAX_DECIMALS`].
    pub fn new(decimals: usize) -> Self {
        Self {
            groups: Default::default(),
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    fn field(&self, group: FieldGroup, slot: usize) -> &Field {
        &self.groups[group.index()][slot]
    }

    fn field_mut(&mut self, group: FieldGroup, slot: usize) -> &mut Field {
        &mut self.groups[group.index()][slot]
    }

    /// Returns the raw text of a field.
    pub fn text(&self, group: FieldGroup, slot: usize) -> &str {
        &self.field(group, slot).text
    }

    /// Types `text` into a field, as a user would.
    pub fn set_text(&mut self, group: FieldGroup, slot: usize, text: impl Into<String>) {
        self.field_mut(group, slot).text = text.into();
    }

    /// Types the values of `shape` into `group` in slot order.
    pub fn fill(&mut self, group: FieldGroup, shape: DataShape, values: &[f64]) -> Result<()> {
        let value = Value::from_values(shape, values)?;
        self.write_value(group, &value);
        Ok(())
    }

    pub fn is_visible(&self, group: FieldGroup, slot: usize) -> bool {
        self.field(group, slot).visible
    }

    /// Texts of the visible fields of `group`, in slot order.
    pub fn visible_texts(&self, group: FieldGroup) -> Vec<&str> {
        self.groups[group.index()]
            .iter()
            .filter(|f| f.visible)
            .map(|f| f.text.as_str())
            .collect()
    }

    /// Renders `group` as a grid of three rows of four columns. Hidden
    /// fields render as blanks; rows with nothing visible are skipped.
    pub fn render(&self, group: FieldGroup) -> String {
        let fields = &self.groups[group.index()];
        let width = fields.iter().map(|f| f.text.len()).max().unwrap_or(0);
        let mut out = String::new();
        for row in fields.chunks(4) {
            if !row.iter().any(|f| f.visible) {
                continue;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|f| {
                    let text = if f.visible { f.text.as_str() } else { "" };
                    format!("{text:>width$}")
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

impl Form for MemoryForm {
    fn read_real(&self, group: FieldGroup, slot: usize) -> Result<f64> {
        let text = self.text(group, slot);
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MatopsError::InvalidField {
                group,
                slot,
                text: text.to_string(),
            }),
        }
    }

    fn write_real(&mut self, group: FieldGroup, slot: usize, value: f64) {
        let text = match group {
            FieldGroup::Result => format!("{:.*}", self.decimals, value),
            FieldGroup::First | FieldGroup::Second => value.to_string(),
        };
        self.set_text(group, slot, text);
    }

    fn clear(&mut self, group: FieldGroup, slot: usize) {
        self.field_mut(group, slot).text.clear();
    }

    fn set_visible(&mut self, group: FieldGroup, slot: usize, visible: bool) {
        self.field_mut(group, slot).visible = visible;
    }
}
