//! Dialog driver for the matrix operations.
//!
//! A configure step picks a [`Mode`] and lays out the form, then an
//! execute step reads the inputs, evaluates and writes the result. The
//! selected mode lives in a [`SessionState`] owned by the caller.

mod mode;
mod form;
mod session;

pub use mode::{DataShape, FieldGroup, Mode, ModeLayout, ParseModeError, Value, GRID_SLOTS};
pub use form::{Form, MemoryForm, MAX_DECIMALS};
pub use session::{evaluate, SessionState};
