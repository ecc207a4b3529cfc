//! Test document generation
//!
//! Produces CGATS sources together with the layout and cell tokens they
//! were built from, so tests can check the parser against ground truth.

use cgats::{DataFormat, DataFormatType, color_burst_format};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Document kinds
#[derive(Debug, Clone, Copy)]
pub enum TestPattern {
    /// Lightness ramp with neutral a*/b*
    LabRamp(usize),
    /// CMYK device values with Lab measurements
    CmykLab(usize),
    /// 380-780nm reflectance in 10nm steps
    Spectral(usize),
    /// ColorBurst linearization data without a format block
    ColorBurst(usize),
    /// Random numeric columns, delimiters and keywords
    Random(u64),
}

/// A generated source and the values it encodes
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub format: DataFormat,
    pub rows: Vec<Vec<String>>,
}

impl Document {
    /// Same document with the last value of row `index` removed
    pub fn with_short_row(&self, index: usize) -> Self {
        let mut rows = self.rows.clone();
        if let Some(row) = rows.get_mut(index) {
            row.pop();
        }
        self.rebuild(rows)
    }

    /// Same document with an extra value appended to row `index`
    pub fn with_long_row(&self, index: usize) -> Self {
        let mut rows = self.rows.clone();
        if let Some(row) = rows.get_mut(index) {
            row.push("0".to_string());
        }
        self.rebuild(rows)
    }

    fn rebuild(&self, rows: Vec<Vec<String>>) -> Self {
        let header = self
            .text
            .split_once("BEGIN_DATA\n")
            .map(|(head, _)| head)
            .unwrap_or_default();
        Self {
            text: format!("{}{}", header, data_block(&rows, "\t")),
            format: self.format.clone(),
            rows,
        }
    }
}

/// Generate a document for a pattern
pub fn generate(pattern: TestPattern) -> Document {
    match pattern {
        TestPattern::LabRamp(n) => {
            let format = vec![
                DataFormatType::SAMPLE_ID,
                DataFormatType::LAB_L,
                DataFormatType::LAB_A,
                DataFormatType::LAB_B,
            ];
            let rows = (0..n)
                .map(|i| {
                    let l = if n > 1 { 100.0 * i as f64 / (n - 1) as f64 } else { 50.0 };
                    vec![(i + 1).to_string(), format!("{:.2}", l), "0.00".into(), "0.00".into()]
                })
                .collect();
            assemble("CGATS.17", &[("ORIGINATOR", "\"lab ramp\"")], format, rows, " ")
        }
        TestPattern::CmykLab(n) => {
            let format = vec![
                DataFormatType::SAMPLE_ID,
                DataFormatType::SAMPLE_NAME,
                DataFormatType::CMYK_C,
                DataFormatType::CMYK_M,
                DataFormatType::CMYK_Y,
                DataFormatType::CMYK_K,
                DataFormatType::LAB_L,
                DataFormatType::LAB_A,
                DataFormatType::LAB_B,
            ];
            let rows = (0..n)
                .map(|i| {
                    let t = i as f64 / n.max(1) as f64;
                    vec![
                        (i + 1).to_string(),
                        format!("A{}", i + 1),
                        format!("{:.1}", t * 100.0),
                        format!("{:.1}", (t * 2.0) % 1.0 * 100.0),
                        format!("{:.1}", (t * 3.0) % 1.0 * 100.0),
                        "0".into(),
                        format!("{:.3}", 95.0 - t * 80.0),
                        format!("{:.3}", (t * 6.0).sin() * 50.0),
                        format!("{:.3}", (t * 4.0).cos() * 50.0),
                    ]
                })
                .collect();
            assemble("CGATS.17", &[("ORIGINATOR", "\"cmyk lab\"")], format, rows, "\t")
        }
        TestPattern::Spectral(n) => {
            let mut format = vec![DataFormatType::SAMPLE_ID];
            format.extend(DataFormatType::all().filter(|t| t.wavelength().is_some()));
            let bands = format.len() - 1;
            let rows = (0..n)
                .map(|i| {
                    let mut row = vec![(i + 1).to_string()];
                    row.extend((0..bands).map(|b| {
                        format!("{:.4}", 0.05 + 0.9 * ((i + b) % 10) as f64 / 10.0)
                    }));
                    row
                })
                .collect();
            assemble("CGATS.17", &[("MEASUREMENT_SOURCE", "\"Illumination=D50\"")], format, rows, "\t")
        }
        TestPattern::ColorBurst(n) => {
            let rows: Vec<Vec<String>> = (0..n)
                .map(|i| {
                    let t = i as f64 / n.max(1) as f64;
                    vec![
                        format!("{:.2}", t * 1.5),
                        format!("{:.2}", t * 1.4),
                        format!("{:.2}", t * 1.2),
                        format!("{:.2}", t * 1.3),
                        format!("{:.2}", 95.0 - t * 90.0),
                        format!("{:.2}", t * 2.0),
                        format!("{:.2}", -t * 3.0),
                    ]
                })
                .collect();
            Document {
                text: format!("ColorBurst\n{}", data_block(&rows, " ")),
                format: color_burst_format(),
                rows,
            }
        }
        TestPattern::Random(seed) => generate_random(seed),
    }
}

/// Random document: a SAMPLE_ID column, optionally SAMPLE_NAME, and a
/// random subset of numeric tags in random order
fn generate_random(seed: u64) -> Document {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let numeric: Vec<DataFormatType> = DataFormatType::all().filter(|t| t.is_f64()).collect();
    let n_fields = rng.gen_range(1..=12);

    let mut format = vec![DataFormatType::SAMPLE_ID];
    let with_name = rng.gen_bool(0.5);
    if with_name {
        format.push(DataFormatType::SAMPLE_NAME);
    }
    format.extend(numeric.choose_multiple(&mut rng, n_fields).copied());

    let n_rows = rng.gen_range(1..=40);
    let rows = (0..n_rows)
        .map(|i| {
            format
                .iter()
                .map(|tag| match tag {
                    DataFormatType::SAMPLE_ID => (i + 1).to_string(),
                    DataFormatType::SAMPLE_NAME => format!("S{}", rng.gen_range(0..10_000)),
                    _ => {
                        let places: usize = rng.gen_range(0..=4);
                        format!("{:.*}", places, rng.gen_range(-128.0..128.0))
                    }
                })
                .collect()
        })
        .collect();

    let delimiter = if rng.gen_bool(0.5) { "\t" } else { " " };
    let keywords = [("ORIGINATOR", "\"random\""), ("CREATED", "\"2024-01-01\"")];
    let n_keywords = rng.gen_range(0..=keywords.len());

    assemble("CGATS.17", &keywords[..n_keywords], format, rows, delimiter)
}

fn assemble(
    header: &str,
    keywords: &[(&str, &str)],
    format: DataFormat,
    rows: Vec<Vec<String>>,
    delimiter: &str,
) -> Document {
    let mut text = format!("{}\n", header);
    for (key, value) in keywords {
        text.push_str(&format!("{}\t{}\n", key, value));
    }

    let names: Vec<&str> = format.iter().map(|t| t.name()).collect();
    text.push_str(&format!(
        "BEGIN_DATA_FORMAT\n{}\nEND_DATA_FORMAT\n",
        names.join(delimiter)
    ));
    text.push_str(&format!("NUMBER_OF_SETS\t{}\n", rows.len()));
    text.push_str(&data_block(&rows, delimiter));

    Document { text, format, rows }
}

fn data_block(rows: &[Vec<String>], delimiter: &str) -> String {
    let mut text = String::from("BEGIN_DATA\n");
    for row in rows {
        text.push_str(&row.join(delimiter));
        text.push('\n');
    }
    text.push_str("END_DATA\n");
    text
}
