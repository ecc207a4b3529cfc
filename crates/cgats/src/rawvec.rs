//! Raw line reading and section resolution
//!
//! A [`RawVec`] is the uninterpreted token view of a CGATS file: one entry
//! per non-blank line, each split into tokens. Dialect detection, the
//! `DATA_FORMAT` declaration, the `DATA` section and the surrounding metadata
//! are all resolved from it.
//!
//! # Tokenizing
//!
//! - A line containing a tab is split on tabs, so fields may contain spaces
//!   and empty fields are kept.
//! - Any other line is split on whitespace, except inside double quotes.
//!   Quotes stay part of the token.
//! - A line mixing both separators is split on tabs only, so `2 60.0\t1.0`
//!   yields the two tokens `2 60.0` and `1.0`.
//! - Lines are trimmed before splitting. Empty trailing fields of a tab
//!   delimited row (`2\t60.0\t`) are dropped with the trailing tab.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::{debug, trace};

use crate::dialect::CgatsType;
use crate::error::{CgatsError, CgatsResult};
use crate::format::{DataFormat, DataFormatType};

/// Tokens of a single line
pub type DataLine = Vec<String>;

pub(crate) const BEGIN_DATA_FORMAT: &str = "BEGIN_DATA_FORMAT";
pub(crate) const END_DATA_FORMAT: &str = "END_DATA_FORMAT";
pub(crate) const BEGIN_DATA: &str = "BEGIN_DATA";
pub(crate) const END_DATA: &str = "END_DATA";

/// Ordered token rows of a CGATS source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVec {
    lines: Vec<DataLine>,
}

impl RawVec {
    /// Create an empty RawVec
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file into token rows
    pub fn from_file<P: AsRef<Path>>(path: P) -> CgatsResult<Self> {
        let path = path.as_ref();
        trace!("reading {}", path.display());
        Self::from_reader(File::open(path)?)
    }

    /// Read any byte stream into token rows
    ///
    /// Invalid UTF-8 is replaced rather than rejected; measurement files
    /// from older instruments are often Latin-1.
    pub fn from_reader<R: Read>(mut reader: R) -> CgatsResult<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8_lossy(&bytes);

        let lines: Vec<DataLine> = text
            .trim_start_matches('\u{feff}')
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(tokenize)
            .collect();

        if lines.is_empty() {
            return Err(CgatsError::EmptyFile);
        }

        trace!("read {} non-blank lines", lines.len());
        Ok(Self { lines })
    }

    /// All lines
    pub fn lines(&self) -> &[DataLine] {
        &self.lines
    }

    /// Get a line by index
    pub fn get(&self, index: usize) -> Option<&DataLine> {
        self.lines.get(index)
    }

    /// Iterate over lines
    pub fn iter(&self) -> std::slice::Iter<'_, DataLine> {
        self.lines.iter()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn push(&mut self, line: DataLine) {
        self.lines.push(line);
    }

    pub(crate) fn extend(&mut self, other: &RawVec) {
        self.lines.extend(other.lines.iter().cloned());
    }

    /// Copy with the keyword line `key` set to `value`
    ///
    /// The first line starting with `key` is replaced; if there is none, the
    /// keyword is appended.
    pub fn with_keyword(&self, key: &str, value: &str) -> Self {
        let mut copy = self.clone();
        let line = vec![key.to_string(), value.to_string()];

        match copy.lines.iter_mut().find(|l| first_token(l) == key) {
            Some(existing) => *existing = line,
            None => copy.lines.push(line),
        }

        copy
    }

    /// Dialect named by the first line
    pub fn get_cgats_type(&self) -> Option<CgatsType> {
        let header = self.lines.first()?.join(" ");
        CgatsType::detect(&header)
    }

    /// Resolve the column layout, inferring the dialect from the first line
    pub fn extract_data_format(&self) -> CgatsResult<DataFormat> {
        self.extract_data_format_for(self.get_cgats_type())
    }

    /// Resolve the column layout for an explicit dialect
    ///
    /// Dialects with an implicit layout return it without scanning.
    /// Otherwise every token between `BEGIN_DATA_FORMAT` and
    /// `END_DATA_FORMAT` is parsed into a tag. The first unknown token
    /// aborts resolution.
    pub fn extract_data_format_for(&self, cgats_type: Option<CgatsType>) -> CgatsResult<DataFormat> {
        if let Some(format) = cgats_type.and_then(|t| t.implicit_format()) {
            debug!("using implicit {} DATA_FORMAT", cgats_type.map_or("", |t| t.marker()));
            return Ok(format);
        }

        let start = self
            .lines
            .iter()
            .position(|line| first_token(line) == BEGIN_DATA_FORMAT)
            .ok_or(CgatsError::NoDataFormat)?;

        let mut format = DataFormat::new();
        let mut seen = HashSet::new();

        for line in &self.lines[start + 1..] {
            let first = first_token(line);
            if first == END_DATA_FORMAT || first == BEGIN_DATA {
                break;
            }

            for token in line {
                let tag: DataFormatType = token.parse()?;
                if tag != DataFormatType::BLANK && !seen.insert(tag) {
                    return Err(CgatsError::DuplicateFormatType(tag));
                }
                format.push(tag);
            }
        }

        if format.is_empty() {
            return Err(CgatsError::NoDataFormat);
        }

        debug!("resolved DATA_FORMAT with {} fields", format.len());
        Ok(format)
    }

    /// Lines between `BEGIN_DATA` and `END_DATA` (or end of input)
    pub fn extract_data(&self) -> CgatsResult<Self> {
        let start = self
            .lines
            .iter()
            .position(|line| first_token(line) == BEGIN_DATA)
            .ok_or(CgatsError::NoData)?;

        let lines: Vec<DataLine> = self.lines[start + 1..]
            .iter()
            .take_while(|line| first_token(line) != END_DATA)
            .cloned()
            .collect();

        if lines.is_empty() {
            return Err(CgatsError::NoData);
        }

        debug!("extracted {} DATA rows", lines.len());
        Ok(Self { lines })
    }

    /// Every line outside the DATA_FORMAT and DATA blocks
    pub fn extract_meta_data(&self) -> Self {
        let mut inside = false;
        let mut meta = Self::new();

        for line in &self.lines {
            match first_token(line) {
                BEGIN_DATA_FORMAT | BEGIN_DATA => inside = true,
                END_DATA_FORMAT | END_DATA => inside = false,
                _ if !inside => meta.push(line.clone()),
                _ => {}
            }
        }

        meta
    }
}

/// Read a file into a [`RawVec`]
pub fn read_file_to_raw_vec<P: AsRef<Path>>(path: P) -> CgatsResult<RawVec> {
    RawVec::from_file(path)
}

/// Dialect named by the first line of `raw_vec`
pub fn get_cgats_type(raw_vec: &RawVec) -> Option<CgatsType> {
    raw_vec.get_cgats_type()
}

/// Resolve the column layout of `raw_vec`
pub fn extract_data_format(raw_vec: &RawVec) -> CgatsResult<DataFormat> {
    raw_vec.extract_data_format()
}

/// Isolate the data rows of `raw_vec`
pub fn extract_data(raw_vec: &RawVec) -> CgatsResult<RawVec> {
    raw_vec.extract_data()
}

fn first_token(line: &DataLine) -> &str {
    line.first().map(String::as_str).unwrap_or("")
}

fn tokenize(line: &str) -> DataLine {
    if line.contains('\t') {
        return line.split('\t').map(|token| token.trim().to_string()).collect();
    }

    let mut tokens = DataLine::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        if c == '"' {
            quoted = !quoted;
            current.push(c);
        } else if c.is_whitespace() && !quoted {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

impl FromStr for RawVec {
    type Err = CgatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

impl From<Vec<DataLine>> for RawVec {
    fn from(lines: Vec<DataLine>) -> Self {
        Self { lines }
    }
}

impl<'a> IntoIterator for &'a RawVec {
    type Item = &'a DataLine;
    type IntoIter = std::slice::Iter<'a, DataLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for RawVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAB: &str = "CGATS.17\n\
        ORIGINATOR\t\"Test Lab\"\n\
        NUMBER_OF_FIELDS 4\n\
        BEGIN_DATA_FORMAT\n\
        SAMPLE_ID LAB_L LAB_A LAB_B\n\
        END_DATA_FORMAT\n\
        NUMBER_OF_SETS 2\n\
        BEGIN_DATA\n\
        1 50.0 0.0 0.0\n\
        2 95.1 -0.5 2.25\n\
        END_DATA\n";

    #[test]
    fn test_empty_input() {
        assert!(matches!(RawVec::from_str(""), Err(CgatsError::EmptyFile)));
        assert!(matches!(RawVec::from_str(" \n\t\n\r\n"), Err(CgatsError::EmptyFile)));
    }

    #[test]
    fn test_missing_file() {
        let err = RawVec::from_file("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, CgatsError::FileError(_)));
    }

    #[test]
    fn test_tokenize_whitespace_and_quotes() {
        assert_eq!(tokenize("1  50.0   0.0"), vec!["1", "50.0", "0.0"]);
        assert_eq!(
            tokenize("ORIGINATOR \"Some Lab Inc\""),
            vec!["ORIGINATOR", "\"Some Lab Inc\""]
        );
    }

    #[test]
    fn test_tokenize_tabs_keep_spaces_and_blanks() {
        assert_eq!(tokenize("1\t3c Black\t\t100"), vec!["1", "3c Black", "", "100"]);
    }

    #[test]
    fn test_carriage_returns_split_lines() {
        let raw = RawVec::from_str("CGATS.17\rBEGIN_DATA\r\n1\r").unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.get(2).unwrap(), &vec!["1".to_string()]);
    }

    #[test]
    fn test_cgats_type() {
        let raw = RawVec::from_str(LAB).unwrap();
        assert_eq!(raw.get_cgats_type(), Some(CgatsType::Cgats));

        let raw = RawVec::from_str("Some header\nBEGIN_DATA\n").unwrap();
        assert_eq!(get_cgats_type(&raw), None);
    }

    #[test]
    fn test_extract_data_format() {
        let raw = RawVec::from_str(LAB).unwrap();
        let format = extract_data_format(&raw).unwrap();
        assert_eq!(
            format,
            vec![
                DataFormatType::SAMPLE_ID,
                DataFormatType::LAB_L,
                DataFormatType::LAB_A,
                DataFormatType::LAB_B,
            ]
        );
    }

    #[test]
    fn test_data_format_spanning_lines() {
        let raw = RawVec::from_str(
            "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID\nXYZ_X XYZ_Y\nXYZ_Z\nEND_DATA_FORMAT\n",
        )
        .unwrap();
        assert_eq!(raw.extract_data_format().unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_format_type() {
        let raw =
            RawVec::from_str("CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID LAB_Q\nEND_DATA_FORMAT\n")
                .unwrap();
        let err = raw.extract_data_format().unwrap_err();
        assert!(matches!(err, CgatsError::UnknownFormatType(ref t) if t == "LAB_Q"));
    }

    #[test]
    fn test_missing_data_format() {
        let raw = RawVec::from_str("CGATS.17\nBEGIN_DATA\n1 2\nEND_DATA\n").unwrap();
        assert!(matches!(raw.extract_data_format(), Err(CgatsError::NoDataFormat)));

        let raw = RawVec::from_str("CGATS.17\nBEGIN_DATA_FORMAT\nEND_DATA_FORMAT\n").unwrap();
        assert!(matches!(raw.extract_data_format(), Err(CgatsError::NoDataFormat)));
    }

    #[test]
    fn test_duplicate_format_type() {
        let raw = RawVec::from_str(
            "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID LAB_L LAB_L\nEND_DATA_FORMAT\n",
        )
        .unwrap();
        assert!(matches!(
            raw.extract_data_format(),
            Err(CgatsError::DuplicateFormatType(DataFormatType::LAB_L))
        ));
    }

    #[test]
    fn test_repeated_blank_columns_allowed() {
        let raw = RawVec::from_str(
            "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID\t\t\tLAB_L\nEND_DATA_FORMAT\n",
        )
        .unwrap();
        let format = raw.extract_data_format().unwrap();
        assert_eq!(
            format,
            vec![
                DataFormatType::SAMPLE_ID,
                DataFormatType::BLANK,
                DataFormatType::BLANK,
                DataFormatType::LAB_L,
            ]
        );
    }

    #[test]
    fn test_color_burst_implicit_format() {
        let raw = RawVec::from_str("ColorBurst\nBEGIN_DATA\n0 0 0 0 95 0 0\nEND_DATA\n").unwrap();
        assert_eq!(raw.extract_data_format().unwrap().len(), 7);
    }

    #[test]
    fn test_explicit_dialect_overrides_inference() {
        let raw = RawVec::from_str("Linearization\nBEGIN_DATA\n0 0 0 0 95 0 0\nEND_DATA\n").unwrap();
        assert!(raw.extract_data_format().is_err());
        assert_eq!(
            raw.extract_data_format_for(Some(CgatsType::ColorBurst)).unwrap().len(),
            7
        );
    }

    #[test]
    fn test_extract_data() {
        let raw = RawVec::from_str(LAB).unwrap();
        let data = extract_data(&raw).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(1).unwrap()[3], "2.25");
    }

    #[test]
    fn test_extract_data_without_terminator() {
        let raw = RawVec::from_str("CGATS.17\nBEGIN_DATA\n1 2\n3 4").unwrap();
        assert_eq!(raw.extract_data().unwrap().len(), 2);
    }

    #[test]
    fn test_no_data() {
        let raw = RawVec::from_str("CGATS.17\nBEGIN_DATA_FORMAT\nLAB_L\nEND_DATA_FORMAT\n").unwrap();
        assert!(matches!(raw.extract_data(), Err(CgatsError::NoData)));

        let raw = RawVec::from_str("CGATS.17\nBEGIN_DATA\nEND_DATA\n").unwrap();
        assert!(matches!(raw.extract_data(), Err(CgatsError::NoData)));
    }

    #[test]
    fn test_extract_meta_data() {
        let raw = RawVec::from_str(LAB).unwrap();
        let meta = raw.extract_meta_data();
        let keys: Vec<&str> = meta.iter().map(|l| first_token(l)).collect();
        assert_eq!(keys, vec!["CGATS.17", "ORIGINATOR", "NUMBER_OF_FIELDS", "NUMBER_OF_SETS"]);
        assert_eq!(meta.get(1).unwrap()[1], "\"Test Lab\"");
    }

    #[test]
    fn test_with_keyword() {
        let raw = RawVec::from_str(LAB).unwrap().extract_meta_data();
        let updated = raw.with_keyword("NUMBER_OF_SETS", "5");
        assert_eq!(updated.len(), raw.len());
        assert_eq!(updated.get(3).unwrap()[1], "5");

        let appended = raw.with_keyword("CREATED", "today");
        assert_eq!(appended.len(), raw.len() + 1);
    }

    #[test]
    fn test_display_is_tab_delimited() {
        let raw = RawVec::from_str("A  B\nC").unwrap();
        assert_eq!(raw.to_string(), "A\tB\nC\n");
    }

    #[test]
    fn test_mixed_separators_split_on_tabs() {
        let raw = RawVec::from_str("2 60.0\t1.0 1.0").unwrap();
        assert_eq!(raw.get(0).unwrap(), &vec!["2 60.0".to_string(), "1.0 1.0".to_string()]);
    }

    #[test]
    fn test_trailing_empty_field_dropped() {
        let raw = RawVec::from_str("2\t60.0\t\n3\t\t1.0").unwrap();
        assert_eq!(raw.get(0).unwrap().len(), 2);
        assert_eq!(raw.get(1).unwrap(), &vec!["3".to_string(), String::new(), "1.0".to_string()]);
    }
}
