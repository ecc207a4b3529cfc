//! CGATS file dialects
//!
//! The dialect is inferred from the first line of a file. ColorBurst
//! linearization files carry no `DATA_FORMAT` block and use a fixed layout
//! instead.

use std::fmt;
use std::str::FromStr;

use crate::error::CgatsError;
use crate::format::{DataFormat, color_burst_format};

/// File dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CgatsType {
    /// Standard CGATS.17 / IT8 file
    Cgats,
    /// ColorBurst linearization file
    ColorBurst,
    /// File written by Curve
    Curve,
}

impl CgatsType {
    /// Dialects in marker-matching order
    pub const ALL: [CgatsType; 3] = [CgatsType::Cgats, CgatsType::ColorBurst, CgatsType::Curve];

    /// Lowercase marker searched for in the header line
    pub fn marker(&self) -> &'static str {
        match self {
            CgatsType::Cgats => "cgats",
            CgatsType::ColorBurst => "colorburst",
            CgatsType::Curve => "curve",
        }
    }

    /// Find the first dialect whose marker appears in `header`
    pub fn detect(header: &str) -> Option<Self> {
        let header = header.to_lowercase();
        Self::ALL.into_iter().find(|t| header.contains(t.marker()))
    }

    /// Column layout implied by the dialect, if it has one
    pub fn implicit_format(&self) -> Option<DataFormat> {
        match self {
            CgatsType::ColorBurst => Some(color_burst_format()),
            _ => None,
        }
    }
}

impl FromStr for CgatsType {
    type Err = CgatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::detect(s).ok_or_else(|| CgatsError::UnknownFormatType(s.to_string()))
    }
}

impl fmt::Display for CgatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
