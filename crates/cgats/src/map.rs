//! Keyed view of the data section

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use log::{debug, warn};

use crate::error::{CgatsError, CgatsResult};
use crate::format::DataFormat;
use crate::object::CgatsObject;
use crate::options::ReadOptions;
use crate::rawvec::RawVec;
use crate::value::{CgatsValue, Sample};

/// Data rows keyed by 0-based row index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CgatsMap(pub BTreeMap<usize, Sample>);

impl CgatsMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from extracted data rows
    ///
    /// Every row must have exactly one value per format column. Values are
    /// typed by their column's tag.
    pub fn from_data(data: &RawVec, format: &DataFormat, options: &ReadOptions) -> CgatsResult<Self> {
        let mut rows = BTreeMap::new();

        for (index, line) in data.iter().enumerate() {
            if line.len() != format.len() {
                debug!(
                    "row {} has {} values, DATA_FORMAT declares {}",
                    index,
                    line.len(),
                    format.len()
                );
                return Err(CgatsError::FormatDataMismatch);
            }

            let sample = line
                .iter()
                .zip(format)
                .map(|(token, tag)| {
                    let value = CgatsValue::from_token(token, tag.is_f64());
                    if tag.is_f64() && !value.is_float() {
                        if options.strict_values {
                            return Err(CgatsError::FormatDataMismatch);
                        }
                        warn!("row {}: {} value {:?} is not numeric", index, tag, token);
                    }
                    Ok(value)
                })
                .collect::<CgatsResult<Sample>>()?;

            rows.insert(index, sample);
        }

        Ok(Self(rows))
    }

    /// Resolve format and data of a RawVec and build the map
    pub fn from_raw_vec(raw_vec: &RawVec) -> CgatsResult<Self> {
        let format = raw_vec.extract_data_format()?;
        let data = raw_vec.extract_data()?;
        Self::from_data(&data, &format, &ReadOptions::default())
    }

    /// Parse a file straight into its keyed data view
    pub fn from_file<P: AsRef<Path>>(path: P) -> CgatsResult<Self> {
        Ok(CgatsObject::from_file(path)?.into_data_map())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no rows
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Row by index
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.0.get(&index)
    }

    /// Insert or replace a row
    pub fn insert(&mut self, index: usize, sample: Sample) -> Option<Sample> {
        self.0.insert(index, sample)
    }

    /// Iterate over rows in index order
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, usize, Sample> {
        self.0.iter()
    }

    /// Iterate over rows without their indices
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.0.values()
    }

    /// Highest row index, if any
    pub fn max_index(&self) -> Option<usize> {
        self.0.keys().next_back().copied()
    }

    /// Values of one column position across all rows
    pub fn column(&self, position: usize) -> Vec<&CgatsValue> {
        self.0.values().filter_map(|s| s.get(position)).collect()
    }

    /// Rows as token lines
    pub fn to_raw_vec(&self) -> RawVec {
        RawVec::from(self.0.values().map(Sample::tokens).collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a CgatsMap {
    type Item = (&'a usize, &'a Sample);
    type IntoIter = std::collections::btree_map::Iter<'a, usize, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CgatsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sample in self.0.values() {
            writeln!(f, "{}", sample)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DataFormatType::*;

    fn data(text: &str) -> RawVec {
        text.parse::<RawVec>().unwrap()
    }

    #[test]
    fn test_from_data_types_columns() {
        let format = vec![SAMPLE_ID, SAMPLE_NAME, CMYK_C];
        let map = CgatsMap::from_data(&data("1 Cyan 100\n2 Paper 0"), &format, &ReadOptions::default())
            .unwrap();

        assert_eq!(map.len(), 2);
        let row = map.get(0).unwrap();
        assert_eq!(row.get(0).unwrap().float, None);
        assert_eq!(row.get(1).unwrap().text, "Cyan");
        assert_eq!(row.get(2).unwrap().float, Some(100.0));
    }

    #[test]
    fn test_width_mismatch() {
        let format = vec![SAMPLE_ID, LAB_L, LAB_A, LAB_B];
        let err = CgatsMap::from_data(
            &data("1 50 0 0\n2 50 0"),
            &format,
            &ReadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CgatsError::FormatDataMismatch));
    }

    #[test]
    fn test_lenient_and_strict_values() {
        let format = vec![SAMPLE_ID, LAB_L];
        let rows = data("1 n/a");

        let lenient = CgatsMap::from_data(&rows, &format, &ReadOptions::default()).unwrap();
        assert_eq!(lenient.get(0).unwrap().get(1).unwrap().text, "n/a");

        let strict = ReadOptions::default().with_strict_values(true);
        assert!(matches!(
            CgatsMap::from_data(&rows, &format, &strict),
            Err(CgatsError::FormatDataMismatch)
        ));
    }

    #[test]
    fn test_from_raw_vec_and_equality() {
        let text = "CGATS.17\nBEGIN_DATA_FORMAT\nSAMPLE_ID RGB_R\nEND_DATA_FORMAT\nBEGIN_DATA\n1 255\n2 0\nEND_DATA";
        let a = CgatsMap::from_raw_vec(&data(text)).unwrap();
        let b = CgatsMap::from_raw_vec(&data(&text.replace("CGATS.17", "CGATS.17 copy"))).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.max_index(), Some(1));
        assert_eq!(a.column(1).len(), 2);
        assert_eq!(a.to_string(), "1\t255\n2\t0\n");
    }
}
