//! Parsed CGATS files
//!
//! [`CgatsObject`] runs the full pipeline over a source:
//!
//! 1. read the source into a [`RawVec`]
//! 2. resolve the dialect (explicit, or inferred from the first line)
//! 3. resolve the `DATA_FORMAT`
//! 4. extract the `DATA` rows
//! 5. check every row against the format width and build the [`CgatsMap`]
//!
//! The first failing stage aborts the parse. An object is never left
//! partially populated.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::color::Lab;
use crate::dialect::CgatsType;
use crate::error::{CgatsError, CgatsResult};
use crate::format::{DataFormat, DataFormatType};
use crate::map::CgatsMap;
use crate::options::ReadOptions;
use crate::rawvec::{BEGIN_DATA, BEGIN_DATA_FORMAT, END_DATA, END_DATA_FORMAT, RawVec};
use crate::value::CgatsValue;

/// A CGATS file: raw lines, dialect, column layout, metadata and data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CgatsObject {
    raw_vec: RawVec,
    cgats_type: Option<CgatsType>,
    data_format: DataFormat,
    metadata: RawVec,
    data_map: CgatsMap,
}

impl CgatsObject {
    /// Create an empty, unloaded object
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object whose dialect is fixed instead of inferred
    pub fn new_with_type(cgats_type: CgatsType) -> Self {
        Self {
            cgats_type: Some(cgats_type),
            ..Self::default()
        }
    }

    /// Parse a file, inferring the dialect
    pub fn from_file<P: AsRef<Path>>(path: P) -> CgatsResult<Self> {
        Self::from_file_with_options(path, &ReadOptions::default())
    }

    /// Parse a file with explicit options
    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: &ReadOptions) -> CgatsResult<Self> {
        Self::from_raw_vec(RawVec::from_file(path)?, options)
    }

    /// Parse any byte stream, inferring the dialect
    pub fn from_reader<R: Read>(reader: R) -> CgatsResult<Self> {
        Self::from_raw_vec(RawVec::from_reader(reader)?, &ReadOptions::default())
    }

    /// Interpret already-read lines
    pub fn from_raw_vec(raw_vec: RawVec, options: &ReadOptions) -> CgatsResult<Self> {
        let cgats_type = options.cgats_type.or_else(|| raw_vec.get_cgats_type());
        let data_format = raw_vec.extract_data_format_for(cgats_type)?;
        let data = raw_vec.extract_data()?;
        let data_map = CgatsMap::from_data(&data, &data_format, options)?;
        let metadata = raw_vec.extract_meta_data();

        debug!(
            "parsed {:?} file: {} fields, {} samples",
            cgats_type,
            data_format.len(),
            data_map.len()
        );

        Ok(Self {
            raw_vec,
            cgats_type,
            data_format,
            metadata,
            data_map,
        })
    }

    /// Load a file into this object
    ///
    /// A dialect set with [`CgatsObject::new_with_type`] is used instead of
    /// inference. On error the object is left untouched.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> CgatsResult<()> {
        let options = ReadOptions {
            cgats_type: self.cgats_type,
            ..ReadOptions::default()
        };
        *self = Self::from_file_with_options(path, &options)?;
        Ok(())
    }

    /// Assemble an object from resolved parts, regenerating its raw lines
    pub(crate) fn from_parts(
        cgats_type: Option<CgatsType>,
        metadata: RawVec,
        data_format: DataFormat,
        data_map: CgatsMap,
    ) -> Self {
        let mut raw_vec = metadata.clone();

        if cgats_type.and_then(|t| t.implicit_format()).is_none() {
            raw_vec.push(vec![BEGIN_DATA_FORMAT.to_string()]);
            raw_vec.push(data_format.iter().map(|t| t.to_string()).collect());
            raw_vec.push(vec![END_DATA_FORMAT.to_string()]);
        }

        raw_vec.push(vec![BEGIN_DATA.to_string()]);
        raw_vec.extend(&data_map.to_raw_vec());
        raw_vec.push(vec![END_DATA.to_string()]);

        Self {
            raw_vec,
            cgats_type,
            data_format,
            metadata,
            data_map,
        }
    }

    /// Raw token lines this object was built from
    pub fn raw_vec(&self) -> &RawVec {
        &self.raw_vec
    }

    /// Resolved dialect
    ///
    /// Fails with `UnknownFormatType` when the header named no known dialect.
    pub fn cgats_type(&self) -> CgatsResult<CgatsType> {
        self.cgats_type.ok_or_else(|| {
            let header = self.raw_vec.get(0).map(|l| l.join(" ")).unwrap_or_default();
            CgatsError::UnknownFormatType(header)
        })
    }

    /// Keyed data rows
    pub fn data(&self) -> CgatsResult<&CgatsMap> {
        if self.data_map.is_empty() {
            return Err(CgatsError::NoData);
        }
        Ok(&self.data_map)
    }

    /// Consume the object, keeping only its data rows
    pub fn into_data_map(self) -> CgatsMap {
        self.data_map
    }

    /// Lines outside the DATA_FORMAT and DATA blocks
    pub fn metadata(&self) -> CgatsResult<&RawVec> {
        if self.raw_vec.is_empty() {
            return Err(CgatsError::NoData);
        }
        Ok(&self.metadata)
    }

    /// Column layout
    pub fn data_format(&self) -> CgatsResult<&DataFormat> {
        if self.data_format.is_empty() {
            return Err(CgatsError::NoDataFormat);
        }
        Ok(&self.data_format)
    }

    /// Number of samples (0 when nothing is loaded)
    pub fn len(&self) -> usize {
        self.data_map.len()
    }

    /// Check if no samples are loaded
    pub fn is_empty(&self) -> bool {
        self.data_map.is_empty()
    }

    /// Column position of a tag
    pub fn position(&self, tag: DataFormatType) -> Option<usize> {
        self.data_format.iter().position(|t| *t == tag)
    }

    /// Cell at a row and column tag
    pub fn value(&self, row: usize, tag: DataFormatType) -> Option<&CgatsValue> {
        self.data_map.get(row)?.get(self.position(tag)?)
    }

    /// All cells of a column
    pub fn column(&self, tag: DataFormatType) -> Option<Vec<&CgatsValue>> {
        Some(self.data_map.column(self.position(tag)?))
    }

    /// SAMPLE_ID of a row as an integer
    pub fn sample_id(&self, row: usize) -> CgatsResult<usize> {
        let position = self
            .position(DataFormatType::SAMPLE_ID)
            .ok_or(CgatsError::InvalidID)?;
        let sample = self.data_map.get(row).ok_or(CgatsError::NoData)?;
        sample
            .get(position)
            .and_then(|v| v.text.parse().ok())
            .ok_or(CgatsError::InvalidID)
    }

    /// Whether the data has L*, a* and b* columns
    pub fn has_lab(&self) -> bool {
        [DataFormatType::LAB_L, DataFormatType::LAB_A, DataFormatType::LAB_B]
            .iter()
            .all(|tag| self.data_format.contains(tag))
    }

    /// Lab value of every sample, in row order
    pub fn lab_values(&self) -> CgatsResult<Vec<Lab>> {
        let (Some(l), Some(a), Some(b)) = (
            self.position(DataFormatType::LAB_L),
            self.position(DataFormatType::LAB_A),
            self.position(DataFormatType::LAB_B),
        ) else {
            return Err(CgatsError::NoData);
        };

        self.data_map
            .samples()
            .map(|sample| {
                let channel = |i: usize| sample.get(i).and_then(|v| v.float).ok_or(CgatsError::NoData);
                Ok(Lab::new(channel(l)?, channel(a)?, channel(b)?))
            })
            .collect()
    }

    /// Metadata lines, tab-delimited
    pub fn print_meta_data(&self) -> CgatsResult<String> {
        Ok(self.metadata()?.to_string())
    }

    /// The `BEGIN_DATA_FORMAT` block
    pub fn print_data_format(&self) -> CgatsResult<String> {
        let fields = self
            .data_format()?
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join("\t");
        Ok(format!("{BEGIN_DATA_FORMAT}\n{fields}\n{END_DATA_FORMAT}\n"))
    }

    /// The `BEGIN_DATA` block
    pub fn print_data(&self) -> CgatsResult<String> {
        Ok(format!("{BEGIN_DATA}\n{}{END_DATA}\n", self.data()?))
    }

    /// The whole file in canonical form
    ///
    /// Dialects with an implicit layout do not get a format block.
    pub fn print(&self) -> CgatsResult<String> {
        let mut out = self.print_meta_data()?;
        if self.cgats_type.and_then(|t| t.implicit_format()).is_none() {
            out.push_str(&self.print_data_format()?);
        }
        out.push_str(&self.print_data()?);
        Ok(out)
    }

    /// Write the canonical form to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> CgatsResult<()> {
        let text = self.print()?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl FromStr for CgatsObject {
    type Err = CgatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

impl fmt::Display for CgatsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cgats_type = match &self.cgats_type {
            Some(t) => t.to_string(),
            None => "None".to_string(),
        };
        let fields = self
            .data_format
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({}):[{}]", cgats_type, self.len(), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DataFormatType::*;

    const SCENARIO: &str = "BEGIN_DATA_FORMAT\nSAMPLE_ID LAB_L LAB_A LAB_B\nEND_DATA_FORMAT\nBEGIN_DATA\n1 50.0 0.0 0.0\nEND_DATA";

    const CMYK: &str = "CGATS.17\n\
        ORIGINATOR\t\"cgats tests\"\n\
        BEGIN_DATA_FORMAT\n\
        SAMPLE_ID\tSAMPLE_NAME\tCMYK_C\tCMYK_M\tCMYK_Y\tCMYK_K\n\
        END_DATA_FORMAT\n\
        NUMBER_OF_SETS\t3\n\
        BEGIN_DATA\n\
        1\tCyan\t100\t0\t0\t0\n\
        2\t3c Black\t100\t100\t100\t0\n\
        3\tPaper\t0\t0\t0\t0\n\
        END_DATA\n";

    const COLORBURST: &str = "ColorBurst\nBEGIN_DATA\n\
        0.00 0.00 0.00 0.00 95.10 0.50 -2.10\n\
        0.15 0.40 0.80 0.45 70.25 -20.40 -30.00\n\
        END_DATA\n";

    #[test]
    fn test_single_row_scenario() {
        let cgo: CgatsObject = SCENARIO.parse().unwrap();

        assert_eq!(cgo.len(), 1);
        assert_eq!(cgo.data_format().unwrap(), &vec![SAMPLE_ID, LAB_L, LAB_A, LAB_B]);
        assert_eq!(cgo.value(0, SAMPLE_ID).unwrap().text, "1");
        assert_eq!(cgo.value(0, LAB_L).unwrap().float, Some(50.0));
        assert_eq!(cgo.value(0, LAB_A).unwrap().float, Some(0.0));
        assert_eq!(cgo.value(0, LAB_B).unwrap().float, Some(0.0));
        assert_eq!(cgo.sample_id(0).unwrap(), 1);
    }

    #[test]
    fn test_short_row_is_mismatch() {
        let text = "BEGIN_DATA_FORMAT\nSAMPLE_ID LAB_L LAB_A LAB_B\nEND_DATA_FORMAT\nBEGIN_DATA\n1 50.0 0.0 0.0\n2 50.0 0.0\nEND_DATA";
        let err = text.parse::<CgatsObject>().unwrap_err();
        assert!(matches!(err, CgatsError::FormatDataMismatch));
    }

    #[test]
    fn test_failure_kinds() {
        assert!(matches!("".parse::<CgatsObject>(), Err(CgatsError::EmptyFile)));
        assert!(matches!(
            "CGATS.17\nBEGIN_DATA_FORMAT\nLAB_L\nEND_DATA_FORMAT\n".parse::<CgatsObject>(),
            Err(CgatsError::NoData)
        ));
        assert!(matches!(
            "CGATS.17\nBEGIN_DATA\n50\nEND_DATA\n".parse::<CgatsObject>(),
            Err(CgatsError::NoDataFormat)
        ));
        assert!(matches!(
            "CGATS.17\nBEGIN_DATA_FORMAT\nLAB_Z\nEND_DATA_FORMAT\nBEGIN_DATA\n1\nEND_DATA\n"
                .parse::<CgatsObject>(),
            Err(CgatsError::UnknownFormatType(_))
        ));
    }

    #[test]
    fn test_color_burst_without_format() {
        let cgo: CgatsObject = COLORBURST.parse().unwrap();
        assert_eq!(cgo.cgats_type().unwrap(), CgatsType::ColorBurst);
        assert_eq!(cgo.len(), 2);
        assert_eq!(cgo.value(1, LAB_A).unwrap().float, Some(-20.40));
        assert_eq!(
            cgo.to_string(),
            "ColorBurst(2):[D_RED, D_GREEN, D_BLUE, D_VIS, LAB_L, LAB_A, LAB_B]"
        );
    }

    #[test]
    fn test_unknown_dialect_still_parses() {
        let cgo: CgatsObject = SCENARIO.parse().unwrap();
        assert!(matches!(cgo.cgats_type(), Err(CgatsError::UnknownFormatType(_))));
        assert!(cgo.to_string().starts_with("None(1):"));
    }

    #[test]
    fn test_empty_object_accessors() {
        let cgo = CgatsObject::new();
        assert!(matches!(cgo.data(), Err(CgatsError::NoData)));
        assert!(matches!(cgo.metadata(), Err(CgatsError::NoData)));
        assert!(matches!(cgo.data_format(), Err(CgatsError::NoDataFormat)));
        assert!(matches!(cgo.print(), Err(CgatsError::NoData)));
        assert_eq!(cgo.len(), 0);
        assert!(cgo.is_empty());
    }

    #[test]
    fn test_explicit_type_bypasses_inference() {
        let text = COLORBURST.replace("ColorBurst", "Linearization 2024");
        assert!(matches!(
            text.parse::<CgatsObject>(),
            Err(CgatsError::NoDataFormat)
        ));

        let options = ReadOptions::default().with_type(CgatsType::ColorBurst);
        let cgo = CgatsObject::from_raw_vec(text.parse().unwrap(), &options).unwrap();
        assert_eq!(cgo.len(), 2);
        assert_eq!(cgo.cgats_type().unwrap(), CgatsType::ColorBurst);
    }

    #[test]
    fn test_metadata() {
        let cgo: CgatsObject = CMYK.parse().unwrap();
        assert_eq!(
            cgo.print_meta_data().unwrap(),
            "CGATS.17\nORIGINATOR\t\"cgats tests\"\nNUMBER_OF_SETS\t3\n"
        );
    }

    #[test]
    fn test_print_blocks() {
        let cgo: CgatsObject = CMYK.parse().unwrap();
        assert_eq!(
            cgo.print_data_format().unwrap(),
            "BEGIN_DATA_FORMAT\nSAMPLE_ID\tSAMPLE_NAME\tCMYK_C\tCMYK_M\tCMYK_Y\tCMYK_K\nEND_DATA_FORMAT\n"
        );
        assert_eq!(
            cgo.print_data().unwrap(),
            "BEGIN_DATA\n1\tCyan\t100\t0\t0\t0\n2\t3c Black\t100\t100\t100\t0\n3\tPaper\t0\t0\t0\t0\nEND_DATA\n"
        );
    }

    #[test]
    fn test_print_roundtrip() {
        for text in [SCENARIO, CMYK, COLORBURST] {
            let cgo: CgatsObject = text.parse().unwrap();
            let reparsed: CgatsObject = cgo.print().unwrap().parse().unwrap();
            assert_eq!(reparsed.data_format().unwrap(), cgo.data_format().unwrap());
            assert_eq!(reparsed.data().unwrap(), cgo.data().unwrap());
            assert_eq!(reparsed.print().unwrap(), cgo.print().unwrap());
        }
    }

    #[test]
    fn test_color_burst_print_has_no_format_block() {
        let cgo: CgatsObject = COLORBURST.parse().unwrap();
        let text = cgo.print().unwrap();
        assert!(text.starts_with("ColorBurst\nBEGIN_DATA\n"));
        assert!(!text.contains(BEGIN_DATA_FORMAT));
    }

    #[test]
    fn test_sample_id_invalid() {
        let cgo: CgatsObject = CMYK.replace("3\tPaper", "x3\tPaper").parse().unwrap();
        assert_eq!(cgo.sample_id(0).unwrap(), 1);
        assert!(matches!(cgo.sample_id(2), Err(CgatsError::InvalidID)));

        let cb: CgatsObject = COLORBURST.parse().unwrap();
        assert!(matches!(cb.sample_id(0), Err(CgatsError::InvalidID)));
    }

    #[test]
    fn test_lab_values() {
        let cgo: CgatsObject = COLORBURST.parse().unwrap();
        assert!(cgo.has_lab());
        let labs = cgo.lab_values().unwrap();
        assert_eq!(labs[0], Lab::new(95.10, 0.50, -2.10));

        let cmyk: CgatsObject = CMYK.parse().unwrap();
        assert!(!cmyk.has_lab());
        assert!(matches!(cmyk.lab_values(), Err(CgatsError::NoData)));
    }

    #[test]
    fn test_from_parts_rebuilds_raw_lines() {
        let cgo: CgatsObject = CMYK.parse().unwrap();
        let rebuilt = CgatsObject::from_parts(
            cgo.cgats_type,
            cgo.metadata.clone(),
            cgo.data_format.clone(),
            cgo.data_map.clone(),
        );
        let reparsed = CgatsObject::from_raw_vec(rebuilt.raw_vec().clone(), &ReadOptions::default())
            .unwrap();
        assert_eq!(reparsed, rebuilt);
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CgatsObject>();
        assert_send_sync::<CgatsMap>();
        assert_send_sync::<RawVec>();
    }

    #[test]
    fn test_display_uses_file_tag_names() {
        let text = "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID 5CLR_1 5CLR_2\nEND_DATA_FORMAT\nBEGIN_DATA\n1 10 20\nEND_DATA";
        let cgo: CgatsObject = text.parse().unwrap();
        assert_eq!(cgo.to_string(), "Cgats(1):[SAMPLE_ID, 5CLR_1, 5CLR_2]");
    }

    #[test]
    fn test_separator_edge_rows_are_mismatches() {
        let mixed = "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID LAB_L LAB_A LAB_B\nEND_DATA_FORMAT\nBEGIN_DATA\n1 50.0 0.0 0.0\n2 60.0\t1.0 1.0\nEND_DATA";
        assert!(matches!(mixed.parse::<CgatsObject>(), Err(CgatsError::FormatDataMismatch)));

        let trailing = "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID\tLAB_L\tSAMPLE_NAME\nEND_DATA_FORMAT\nBEGIN_DATA\n1\t50.0\tA\n2\t60.0\t\nEND_DATA";
        assert!(matches!(trailing.parse::<CgatsObject>(), Err(CgatsError::FormatDataMismatch)));
    }
}
