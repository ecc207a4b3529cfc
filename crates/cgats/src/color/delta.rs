//! Color difference (delta-E) formulas
//!
//! DE1994 and CMC are asymmetric: the first argument is the reference
//! (standard) color and its chroma and hue drive the weighting.

use std::fmt;

use super::lab::Lab;
use crate::format::DataFormatType;

/// Delta-E formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeMethod {
    /// CIE 1976 (Euclidean distance)
    DE1976,
    /// CIE 1994, graphic arts weighting
    DE1994,
    /// CIE 1994, textiles weighting
    DE1994T,
    /// CMC l:c with 1:1
    DECMC1,
    /// CMC l:c with 2:1
    DECMC2,
    /// CIEDE2000
    DE2000,
}

impl DeMethod {
    pub const ALL: [DeMethod; 6] = [
        DeMethod::DE1976,
        DeMethod::DE1994,
        DeMethod::DE1994T,
        DeMethod::DECMC1,
        DeMethod::DECMC2,
        DeMethod::DE2000,
    ];

    /// Compute the difference between a reference and a sample
    pub fn delta_e(&self, reference: Lab, sample: Lab) -> f64 {
        match self {
            DeMethod::DE1976 => delta_e_1976(reference, sample),
            DeMethod::DE1994 => delta_e_1994(reference, sample, false),
            DeMethod::DE1994T => delta_e_1994(reference, sample, true),
            DeMethod::DECMC1 => delta_e_cmc(reference, sample, 1.0, 1.0),
            DeMethod::DECMC2 => delta_e_cmc(reference, sample, 2.0, 1.0),
            DeMethod::DE2000 => delta_e_2000(reference, sample),
        }
    }

    /// Column tag holding results of this formula
    pub fn field(&self) -> DataFormatType {
        match self {
            DeMethod::DE1976 => DataFormatType::LAB_DE,
            DeMethod::DE1994 => DataFormatType::LAB_DE_94,
            DeMethod::DE1994T => DataFormatType::LAB_DE_94T,
            DeMethod::DECMC1 => DataFormatType::LAB_DE_CMC,
            DeMethod::DECMC2 => DataFormatType::LAB_DE_CMC2,
            DeMethod::DE2000 => DataFormatType::LAB_DE2000,
        }
    }

    /// Formula whose results a column holds
    pub fn from_field(field: DataFormatType) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.field() == field)
    }
}

impl fmt::Display for DeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// CIE 1976 color difference
pub fn delta_e_1976(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Squared hue difference ΔH² derived from Δa, Δb and ΔC
#[inline]
fn delta_h_squared(lab1: Lab, lab2: Lab, delta_c: f64) -> f64 {
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (da * da + db * db - delta_c * delta_c).max(0.0)
}

/// CIE 1994 color difference
///
/// `textiles` selects kL = 2, K1 = 0.048, K2 = 0.014 instead of the graphic
/// arts constants kL = 1, K1 = 0.045, K2 = 0.015.
pub fn delta_e_1994(reference: Lab, sample: Lab, textiles: bool) -> f64 {
    let (k_l, k1, k2) = if textiles {
        (2.0, 0.048, 0.014)
    } else {
        (1.0, 0.045, 0.015)
    };

    let c1 = reference.chroma();
    let c2 = sample.chroma();

    let delta_l = reference.l - sample.l;
    let delta_c = c1 - c2;
    let delta_h_sq = delta_h_squared(reference, sample, delta_c);

    let s_c = 1.0 + k1 * c1;
    let s_h = 1.0 + k2 * c1;

    let term_l = delta_l / k_l;
    let term_c = delta_c / s_c;

    (term_l * term_l + term_c * term_c + delta_h_sq / (s_h * s_h)).sqrt()
}

/// CMC l:c color difference
pub fn delta_e_cmc(reference: Lab, sample: Lab, l: f64, c: f64) -> f64 {
    let c1 = reference.chroma();
    let c2 = sample.chroma();

    let delta_l = reference.l - sample.l;
    let delta_c = c1 - c2;
    let delta_h_sq = delta_h_squared(reference, sample, delta_c);

    let h1 = reference.hue_degrees();
    let t = if (164.0..=345.0).contains(&h1) {
        0.56 + (0.2 * (h1 + 168.0).to_radians().cos()).abs()
    } else {
        0.36 + (0.4 * (h1 + 35.0).to_radians().cos()).abs()
    };

    let c1_4 = c1.powi(4);
    let f = (c1_4 / (c1_4 + 1900.0)).sqrt();

    let s_l = if reference.l < 16.0 {
        0.511
    } else {
        0.040975 * reference.l / (1.0 + 0.01765 * reference.l)
    };
    let s_c = 0.0638 * c1 / (1.0 + 0.0131 * c1) + 0.638;
    let s_h = s_c * (f * t + 1.0 - f);

    let term_l = delta_l / (l * s_l);
    let term_c = delta_c / (c * s_c);

    (term_l * term_l + term_c * term_c + delta_h_sq / (s_h * s_h)).sqrt()
}

/// Calculate CIEDE2000 color difference
///
/// This is the industry-standard color difference formula.
/// A difference of 1.0 is approximately the just-noticeable difference.
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    // Reference: http://www.brucelindbloom.com/index.html?Eqn_DeltaE_CIE2000.html

    let Lab { l: l1, a: a1, b: b1 } = lab1;
    let Lab { l: l2, a: a2, b: b2 } = lab2;

    // Step 1: Calculate C and h
    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_bar = (c1 + c2) / 2.0;

    let c_bar_7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar_7 / (c_bar_7 + 25.0_f64.powi(7))).sqrt());

    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);

    let c1_prime = (a1_prime * a1_prime + b1 * b1).sqrt();
    let c2_prime = (a2_prime * a2_prime + b2 * b2).sqrt();

    let h1_prime = hue_prime(a1_prime, b1);
    let h2_prime = hue_prime(a2_prime, b2);

    // Step 2: Calculate deltas
    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;

    let delta_h_prime = if c1_prime * c2_prime == 0.0 {
        0.0
    } else {
        let diff = h2_prime - h1_prime;
        if diff.abs() <= 180.0 {
            diff
        } else if diff > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };

    let delta_big_h_prime =
        2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    // Step 3: Calculate CIEDE2000
    let l_bar_prime = (l1 + l2) / 2.0;
    let c_bar_prime = (c1_prime + c2_prime) / 2.0;

    let h_bar_prime = if c1_prime * c2_prime == 0.0 {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_prime - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_prime).to_radians().cos()
        + 0.32 * (3.0 * h_bar_prime + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_prime - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((h_bar_prime - 275.0) / 25.0).powi(2)).exp();
    let c_bar_prime_7 = c_bar_prime.powi(7);
    let r_c = 2.0 * (c_bar_prime_7 / (c_bar_prime_7 + 25.0_f64.powi(7))).sqrt();
    let s_l =
        1.0 + (0.015 * (l_bar_prime - 50.0).powi(2)) / (20.0 + (l_bar_prime - 50.0).powi(2)).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_prime;
    let s_h = 1.0 + 0.015 * c_bar_prime * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    // Weighting factors kL = kC = kH = 1
    let term1 = delta_l_prime / s_l;
    let term2 = delta_c_prime / s_c;
    let term3 = delta_big_h_prime / s_h;

    (term1 * term1 + term2 * term2 + term3 * term3 + r_t * term2 * term3).sqrt()
}

#[inline]
fn hue_prime(a_prime: f64, b: f64) -> f64 {
    if a_prime == 0.0 && b == 0.0 {
        0.0
    } else {
        let h = b.atan2(a_prime).to_degrees();
        if h < 0.0 { h + 360.0 } else { h }
    }
}
