//! # cgats - CGATS color measurement files
//!
//! Parser for CGATS.17 style measurement data as exported by
//! spectrophotometers and RIPs, including the ColorBurst and Curve
//! linearization dialects.
//!
//! A file is a sequence of keyword lines plus two blocks:
//! `BEGIN_DATA_FORMAT`/`END_DATA_FORMAT` names the columns and
//! `BEGIN_DATA`/`END_DATA` holds one sample per line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cgats::{CgatsObject, DataFormatType};
//!
//! let cgo = CgatsObject::from_file("measurements.txt").unwrap();
//! println!("{}", cgo);
//!
//! let l_star = cgo.value(0, DataFormatType::LAB_L).and_then(|v| v.float);
//! ```
//!
//! ## Comparing measurement sets
//!
//! ```no_run
//! use cgats::{CgatsVec, DeMethod, DeReport};
//!
//! let cgv = CgatsVec::from_files(["reference.txt", "sample.txt"]);
//! let delta = cgv.deltae(DeMethod::DE2000).unwrap();
//! println!("{}", DeReport::new(&delta).unwrap());
//! ```

pub mod color;
pub mod compare;
pub mod dialect;
pub mod error;
pub mod format;
pub mod map;
pub mod object;
pub mod options;
pub mod rawvec;
pub mod report;
pub mod value;

pub use color::{DeMethod, Lab};
pub use compare::CgatsVec;
pub use dialect::CgatsType;
pub use error::{CgatsError, CgatsResult};
pub use format::{DataFormat, DataFormatType, color_burst_format};
pub use map::CgatsMap;
pub use object::CgatsObject;
pub use options::ReadOptions;
pub use rawvec::{
    DataLine, RawVec, extract_data, extract_data_format, get_cgats_type, read_file_to_raw_vec,
};
pub use report::{DeReport, DeSummary};
pub use value::{CgatsValue, Sample};

/// Version of cgats
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
