use serde::{Deserialize, Serialize};

/// A user-entered value to be checked
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Constraints applied to a single field. Length bounds only apply to text,
/// numeric bounds only to numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Constraints {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// Checks `value` against every constraint that is present
pub fn validate(value: &FieldValue, constraints: &Constraints) -> bool {
    match value {
        FieldValue::Text(text) => {
            let length = text.chars().count();
            !(constraints.required && text.trim().is_empty())
                && constraints.min_length.map_or(true, |min| length >= min)
                && constraints.max_length.map_or(true, |max| length <= max)
        }
        // NaN fails every numeric bound
        FieldValue::Number(number) => {
            constraints.min.map_or(true, |min| *number >= min)
                && constraints.max.map_or(true, |max| *number <= max)
        }
    }
}
