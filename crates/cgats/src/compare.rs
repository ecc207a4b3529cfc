//! Operations over several CGATS files
//!
//! [`CgatsVec`] holds parsed objects and combines them into a new one:
//! the per-sample mean ([`CgatsVec::average`]), all rows in sequence
//! ([`CgatsVec::concatenate`]) or the color difference between two
//! measurement sets ([`CgatsVec::deltae`]).

use std::path::Path;

use log::{debug, warn};

use crate::color::DeMethod;
use crate::dialect::CgatsType;
use crate::error::{CgatsError, CgatsResult};
use crate::format::{DataFormat, DataFormatType};
use crate::map::CgatsMap;
use crate::object::CgatsObject;
use crate::rawvec::RawVec;
use crate::value::{CgatsValue, Sample};

const NUMBER_OF_SETS: &str = "NUMBER_OF_SETS";

/// A collection of parsed CGATS objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CgatsVec {
    objects: Vec<CgatsObject>,
}

impl CgatsVec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every path, skipping files that fail
    pub fn from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let objects = paths
            .into_iter()
            .filter_map(|path| match CgatsObject::from_file(path.as_ref()) {
                Ok(cgo) => Some(cgo),
                Err(e) => {
                    warn!("skipping {}: {}", path.as_ref().display(), e);
                    None
                }
            })
            .collect();

        Self { objects }
    }

    pub fn from_objects(objects: Vec<CgatsObject>) -> Self {
        Self { objects }
    }

    pub fn push(&mut self, cgo: CgatsObject) {
        self.objects.push(cgo);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CgatsObject> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CgatsObject> {
        self.objects.iter()
    }

    fn first(&self) -> CgatsResult<&CgatsObject> {
        self.objects.first().ok_or(CgatsError::NoData)
    }

    /// Format shared by every object
    fn common_format(&self) -> CgatsResult<&DataFormat> {
        let format = self.first()?.data_format()?;
        for cgo in &self.objects[1..] {
            if cgo.data_format()? != format {
                debug!("data formats differ: {:?} vs {:?}", format, cgo.data_format()?);
                return Err(CgatsError::CannotCompare);
            }
        }
        Ok(format)
    }

    /// Per-sample mean of all objects
    ///
    /// Numeric cells are averaged. Other cells are taken from the first
    /// object.
    pub fn average(&self) -> CgatsResult<CgatsObject> {
        let first = self.first()?;
        let format = self.common_format()?;
        let n_samples = first.len();

        if self.objects.iter().any(|cgo| cgo.len() != n_samples) {
            return Err(CgatsError::CannotCompare);
        }

        let maps = self
            .objects
            .iter()
            .map(|cgo| cgo.data())
            .collect::<CgatsResult<Vec<_>>>()?;

        let mut data_map = CgatsMap::new();
        for (index, sample) in maps[0].iter() {
            let averaged = sample
                .values
                .iter()
                .enumerate()
                .map(|(column, value)| {
                    let floats = maps
                        .iter()
                        .map(|map| map.get(*index).and_then(|s| s.get(column)).and_then(|v| v.float))
                        .collect::<Option<Vec<f64>>>();
                    match floats {
                        Some(floats) => {
                            CgatsValue::from_float(floats.iter().sum::<f64>() / floats.len() as f64)
                        }
                        None => value.clone(),
                    }
                })
                .collect::<Sample>();
            data_map.insert(*index, averaged);
        }

        debug!("averaged {} objects of {} samples", self.len(), n_samples);

        let metadata = first
            .metadata()?
            .with_keyword(NUMBER_OF_SETS, &n_samples.to_string());

        Ok(CgatsObject::from_parts(
            first.cgats_type().ok(),
            metadata,
            format.clone(),
            data_map,
        ))
    }

    /// All samples of all objects in sequence
    ///
    /// A `SAMPLE_ID` column is renumbered from 1.
    pub fn concatenate(&self) -> CgatsResult<CgatsObject> {
        let first = self.first()?;
        let format = self.common_format()?;
        let id_position = first.position(DataFormatType::SAMPLE_ID);

        let mut data_map = CgatsMap::new();
        for cgo in &self.objects {
            for sample in cgo.data()?.samples() {
                let index = data_map.len();
                let mut sample = sample.clone();
                if let Some(value) = id_position.and_then(|p| sample.values.get_mut(p)) {
                    *value = CgatsValue::text((index + 1).to_string());
                }
                data_map.insert(index, sample);
            }
        }

        let metadata = first
            .metadata()?
            .with_keyword(NUMBER_OF_SETS, &data_map.len().to_string());

        Ok(CgatsObject::from_parts(
            first.cgats_type().ok(),
            metadata,
            format.clone(),
            data_map,
        ))
    }

    /// Color difference between two Lab measurement sets
    ///
    /// The first object is the reference. The result has one row per sample
    /// with its `SAMPLE_ID` and the difference in the column of `method`.
    pub fn deltae(&self, method: DeMethod) -> CgatsResult<CgatsObject> {
        let [reference, sample] = self.objects.as_slice() else {
            return Err(CgatsError::CannotCompare);
        };

        if !reference.has_lab() || !sample.has_lab() || reference.len() != sample.len() {
            return Err(CgatsError::CannotCompare);
        }

        let reference_labs = reference.lab_values()?;
        let sample_labs = sample.lab_values()?;

        let data_map = CgatsMap(
            reference_labs
                .iter()
                .zip(&sample_labs)
                .enumerate()
                .map(|(index, (lab1, lab2))| {
                    let row = Sample::new(vec![
                        CgatsValue::text((index + 1).to_string()),
                        CgatsValue::from_float(method.delta_e(*lab1, *lab2)),
                    ]);
                    (index, row)
                })
                .collect(),
        );

        debug!("{} over {} samples", method, data_map.len());

        let metadata = RawVec::from(vec![
            vec!["CGATS.17".to_string()],
            vec![NUMBER_OF_SETS.to_string(), data_map.len().to_string()],
        ]);

        Ok(CgatsObject::from_parts(
            Some(CgatsType::Cgats),
            metadata,
            vec![DataFormatType::SAMPLE_ID, method.field()],
            data_map,
        ))
    }
}

impl From<Vec<CgatsObject>> for CgatsVec {
    fn from(objects: Vec<CgatsObject>) -> Self {
        Self::from_objects(objects)
    }
}

impl FromIterator<CgatsObject> for CgatsVec {
    fn from_iter<I: IntoIterator<Item = CgatsObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CgatsVec {
    type Item = &'a CgatsObject;
    type IntoIter = std::slice::Iter<'a, CgatsObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
