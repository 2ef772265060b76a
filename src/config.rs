//! Driver settings and job files.
//!
//! Both are TOML. Every settings key is optional:
//!
//! ```toml
//! mode = "multiply"
//! first = [1, 0, 0, 1,  0, 1, 0, 0,  0, 0, 1, 0]
//! second = [1, 0, 0, 0,  0, 1, 0, 2,  0, 0, 1, 0]
//!
//! [settings]
//! decimals = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::driver::{DataShape, FieldGroup, MemoryForm, Mode, MAX_DECIMALS};
use crate::{MatopsError, Result};

/// Options that change how the driver reads, evaluates and displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Decimal places written to result fields (`%f` uses 6), at most
    /// [`MAX_DECIMALS`].
    #[serde(deserialize_with = "bounded_decimals")]
    pub decimals: usize,
    /// Normalize the axis returned by the direction modes.
    pub normalize_axes: bool,
    /// Hide the slots a mode does not use.
    pub hide_unused: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decimals: 6,
            normalize_axes: false,
            hide_unused: true,
        }
    }
}

fn bounded_decimals<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<usize, D::Error> {
    let decimals = usize::deserialize(deserializer)?;
    if decimals > MAX_DECIMALS {
        return Err(serde::de::Error::custom(format!(
            "decimals must be at most {MAX_DECIMALS}, got {decimals}"
        )));
    }
    Ok(decimals)
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Settings> {
        Ok(toml::from_str(text)?)
    }
}

/// One run of the driver: a mode and the input values for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub mode: Mode,
    /// Values of the first input, in slot order of its shape.
    pub first: Vec<f64>,
    /// Values of the second input, if the mode takes one.
    #[serde(default)]
    pub second: Vec<f64>,
}

impl Job {
    pub fn from_toml_str(text: &str) -> Result<Job> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Job> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Types the job's inputs into `form` using the shapes of `mode`.
    pub fn fill_form(&self, mode: Mode, form: &mut MemoryForm) -> Result<()> {
        let layout = mode.layout();
        form.fill(FieldGroup::First, layout.first, &self.first)?;
        match layout.second {
            Some(shape) => form.fill(FieldGroup::Second, shape, &self.second)?,
            None if !self.second.is_empty() => {
                tracing::debug!(%mode, "ignoring second input for unary mode");
            }
            None => {}
        }
        Ok(())
    }

    /// Shape the first input must have for this job's mode.
    pub fn first_shape(&self) -> DataShape {
        self.mode.layout().first
    }
}

impl std::str::FromStr for Settings {
    type Err = MatopsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let s = Settings::from_toml_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.decimals, 6);
        assert!(s.hide_unused);
        assert!(!s.normalize_axes);
    }

    #[test]
    fn test_settings_partial() {
        let s: Settings = "decimals = 3\nnormalize_axes = true".parse().unwrap();
        assert_eq!(s.decimals, 3);
        assert!(s.normalize_axes);
        assert!(s.hide_unused);
    }

    #[test]
    fn test_settings_unknown_key() {
        let err = Settings::from_toml_str("precision = 3").unwrap_err();
        assert!(matches!(err, MatopsError::Config(_)));
    }

    #[test]
    fn test_settings_decimals_bounded() {
        let err = Settings::from_toml_str("decimals = 70000").unwrap_err();
        assert!(matches!(err, MatopsError::Config(_)));
        assert!(err.to_string().contains("at most 17"));

        let s = Settings::from_toml_str(&format!("decimals = {MAX_DECIMALS}")).unwrap();
        assert_eq!(s.decimals, MAX_DECIMALS);
    }

    #[test]
    fn test_job_parse() {
        let job = Job::from_toml_str(
            r#"
            mode = "vector-cross-product"
            first = [1.0, 0.0, 0.0]
            second = [0.0, 1.0, 0.0]

            [settings]
            decimals = 2
            "#,
        )
        .unwrap();
        assert_eq!(job.mode, Mode::VectorCrossProduct);
        assert_eq!(job.settings.decimals, 2);
        assert_eq!(job.first_shape(), DataShape::Vector3);
    }

    #[test]
    fn test_job_defaults_to_multiply() {
        let job = Job::from_toml_str("first = [1.0]").unwrap();
        assert_eq!(job.mode, Mode::Multiply);
        assert!(job.second.is_empty());
    }

    #[test]
    fn test_job_fill_form_checks_length() {
        let job = Job::from_toml_str("mode = \"transpose\"\nfirst = [1.0, 2.0]").unwrap();
        let mut form = MemoryForm::default();
        let err = job.fill_form(job.mode, &mut form).unwrap_err();
        assert!(matches!(err, MatopsError::ShapeMismatch { expected: 12, found: 2, .. }));
    }
}
