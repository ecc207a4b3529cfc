//! Error types for cgats

use thiserror::Error;

use crate::format::DataFormatType;

/// Result type for cgats operations
pub type CgatsResult<T> = std::result::Result<T, CgatsError>;

/// Errors that can occur while reading, resolving or comparing CGATS data
///
/// Every parsing stage returns the first error it hits unchanged, so callers
/// can match on the variant to decide what to do next.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CgatsError {
    /// No `BEGIN_DATA` section, or the section holds no rows
    #[error("DATA not found")]
    NoData,

    /// No `DATA_FORMAT` declaration and no implicit layout for the dialect
    #[error("DATA_FORMAT tag not found")]
    NoDataFormat,

    /// A data row does not match the declared column layout
    #[error("DATA length does not match DATA_FORMAT length")]
    FormatDataMismatch,

    /// A `DATA_FORMAT` token (or the file dialect) is not recognized
    #[error("Unknown data format type: {0:?}")]
    UnknownFormatType(String),

    /// The same column tag is declared twice
    #[error("Data format type declared more than once: {0}")]
    DuplicateFormatType(DataFormatType),

    /// Reading or writing the file failed
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// The input holds no non-blank lines
    #[error("File is empty")]
    EmptyFile,

    /// A SAMPLE_ID cell is not an integer, or SAMPLE_ID is missing
    #[error("SAMPLE_ID is not an integer")]
    InvalidID,

    /// Data sets differ in layout or size and cannot be combined
    #[error("Cannot compare data sets")]
    CannotCompare,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(CgatsError::NoData.to_string(), "DATA not found");
        assert_eq!(
            CgatsError::NoDataFormat.to_string(),
            "DATA_FORMAT tag not found"
        );
        assert_eq!(
            CgatsError::UnknownFormatType("LAB_Q".into()).to_string(),
            "Unknown data format type: \"LAB_Q\""
        );
        assert_eq!(
            CgatsError::DuplicateFormatType(DataFormatType::LAB_L).to_string(),
            "Data format type declared more than once: LAB_L"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CgatsError = io.into();
        assert!(matches!(err, CgatsError::FileError(_)));
    }
}
