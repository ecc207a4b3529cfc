//! Cell values and data rows

use std::fmt;

/// A single cell of the data section
///
/// The token text is always kept so that printing reproduces the input.
/// Numeric columns also carry the parsed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CgatsValue {
    /// Token text as read (or as formatted, for computed values)
    pub text: String,
    /// Parsed value for numeric columns
    pub float: Option<f64>,
}

impl CgatsValue {
    /// Value for a column; numeric columns attempt a float parse
    pub fn from_token(token: &str, numeric: bool) -> Self {
        let float = if numeric { token.parse::<f64>().ok() } else { None };
        Self {
            text: token.to_string(),
            float,
        }
    }

    /// Text-only value
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            float: None,
        }
    }

    /// Computed numeric value, rounded to 4 decimal places
    ///
    /// Negative zero is stored as `0` so it never prints as `-0`.
    pub fn from_float(float: f64) -> Self {
        let rounded = round_to(float, 4) + 0.0;
        Self {
            text: rounded.to_string(),
            float: Some(rounded),
        }
    }

    /// Whether the value is numeric
    #[inline]
    pub fn is_float(&self) -> bool {
        self.float.is_some()
    }
}

impl fmt::Display for CgatsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn round_to(float: f64, places: i32) -> f64 {
    let mult = 10f64.powi(places);
    (float * mult).round() / mult
}

/// One data row, in DATA_FORMAT order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    pub values: Vec<CgatsValue>,
}

impl Sample {
    pub fn new(values: Vec<CgatsValue>) -> Self {
        Self { values }
    }

    /// Number of cells
    pub fn n_values(&self) -> usize {
        self.values.len()
    }

    /// Cell at a column position
    pub fn get(&self, index: usize) -> Option<&CgatsValue> {
        self.values.get(index)
    }

    /// Cell texts, in order
    pub fn tokens(&self) -> Vec<String> {
        self.values.iter().map(|v| v.text.clone()).collect()
    }
}

impl FromIterator<CgatsValue> for Sample {
    fn from_iter<I: IntoIterator<Item = CgatsValue>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
