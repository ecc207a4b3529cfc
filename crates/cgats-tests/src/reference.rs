//! Reference color difference values
//!
//! Delta-E computed with `palette`, used to cross-check the formulas in
//! `cgats::color`.

use palette::color_difference::Ciede2000;
use palette::white_point::D50;

/// Lab in palette's representation
pub fn to_palette(lab: cgats::Lab) -> palette::Lab<D50, f64> {
    palette::Lab::new(lab.l, lab.a, lab.b)
}

/// CIEDE2000 computed by palette
pub fn delta_e_2000(lab1: cgats::Lab, lab2: cgats::Lab) -> f64 {
    to_palette(lab1).difference(to_palette(lab2))
}

/// CIE 1976 from first principles
pub fn delta_e_1976(lab1: cgats::Lab, lab2: cgats::Lab) -> f64 {
    let [l1, a1, b1] = lab1.to_array();
    let [l2, a2, b2] = lab2.to_array();
    ((l1 - l2).powi(2) + (a1 - a2).powi(2) + (b1 - b2).powi(2)).sqrt()
}

/// Published CIEDE2000 test pairs (Sharma, Wu & Dalal, 2005)
pub const SHARMA_PAIRS: &[([f64; 3], [f64; 3], f64)] = &[
    ([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485], 2.0425),
    ([50.0, 3.1571, -77.2803], [50.0, 0.0, -82.7485], 2.8615),
    ([50.0, 2.8361, -74.0200], [50.0, 0.0, -82.7485], 3.4412),
    ([50.0, -1.3802, -84.2814], [50.0, 0.0, -82.7485], 1.0000),
    ([50.0, 0.0, 0.0], [50.0, -1.0, 2.0], 2.3669),
    ([50.0, 2.49, -0.001], [50.0, -2.49, 0.0009], 7.1792),
    ([50.0, 2.5, 0.0], [73.0, 25.0, -18.0], 27.1492),
    ([50.0, 2.5, 0.0], [61.0, -5.0, 29.0], 22.8977),
    ([50.0, 2.5, 0.0], [56.0, -27.0, -3.0], 31.9030),
    ([50.0, 2.5, 0.0], [58.0, 24.0, 15.0], 19.4535),
];
