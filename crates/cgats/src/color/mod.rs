//! CIELAB values and color difference
//!
//! This module provides:
//! - CIELAB (L*a*b*) coordinates read from `LAB_*` columns
//! - Delta-E formulas matching the `LAB_DE*` column tags

pub mod delta;
pub mod lab;

pub use delta::{DeMethod, delta_e_1976, delta_e_1994, delta_e_2000, delta_e_cmc};
pub use lab::Lab;
