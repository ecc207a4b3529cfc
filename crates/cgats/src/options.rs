//! Parse configuration

use crate::dialect::CgatsType;

/// Options controlling how a CGATS source is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Dialect to use instead of inferring it from the first line
    pub cgats_type: Option<CgatsType>,
    /// Reject numeric cells that do not parse as numbers
    ///
    /// When false such cells are kept as text and a warning is logged.
    pub strict_values: bool,
}

impl ReadOptions {
    /// Create options with an explicit dialect
    pub fn with_type(mut self, cgats_type: CgatsType) -> Self {
        self.cgats_type = Some(cgats_type);
        self
    }

    /// Set strict numeric parsing
    pub fn with_strict_values(mut self, strict: bool) -> Self {
        self.strict_values = strict;
        self
    }
}
