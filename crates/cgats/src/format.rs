//! DATA_FORMAT column tags
//!
//! A CGATS `DATA_FORMAT` declaration names every column of the data section
//! in order. Each name maps to one [`DataFormatType`]; the ordered list of
//! tags is a [`DataFormat`].
//!
//! All tag metadata (canonical name, numeric flag) lives in a single static
//! table generated alongside the enum, so lookups never switch on variants.

use std::fmt;
use std::str::FromStr;

use crate::error::CgatsError;

/// Ordered column layout of a data section
pub type DataFormat = Vec<DataFormatType>;

/// Static description of one column tag
#[derive(Debug, Clone, Copy)]
struct FieldInfo {
    tag: DataFormatType,
    name: &'static str,
    numeric: bool,
}

macro_rules! data_format_types {
    ($($variant:ident => $name:literal, $numeric:literal;)+) => {
        /// Known CGATS column tags
        ///
        /// Variant names follow the CGATS keywords. The n-color channels are
        /// spelled out (`FIVECLR_1`) since identifiers cannot start with a
        /// digit; their file form is `5CLR_1`.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum DataFormatType {
            $($variant,)+
        }

        static FIELD_TABLE: &[FieldInfo] = &[
            $(FieldInfo { tag: DataFormatType::$variant, name: $name, numeric: $numeric },)+
        ];
    };
}

data_format_types! {
    SAMPLE_ID => "SAMPLE_ID", false;
    SAMPLE_NAME => "SAMPLE_NAME", false;
    BLANK => "BLANK", false;

    RGB_R => "RGB_R", true;
    RGB_G => "RGB_G", true;
    RGB_B => "RGB_B", true;

    CMYK_C => "CMYK_C", true;
    CMYK_M => "CMYK_M", true;
    CMYK_Y => "CMYK_Y", true;
    CMYK_K => "CMYK_K", true;

    FIVECLR_1 => "5CLR_1", true;
    FIVECLR_2 => "5CLR_2", true;
    FIVECLR_3 => "5CLR_3", true;
    FIVECLR_4 => "5CLR_4", true;
    FIVECLR_5 => "5CLR_5", true;

    SIXCLR_1 => "6CLR_1", true;
    SIXCLR_2 => "6CLR_2", true;
    SIXCLR_3 => "6CLR_3", true;
    SIXCLR_4 => "6CLR_4", true;
    SIXCLR_5 => "6CLR_5", true;
    SIXCLR_6 => "6CLR_6", true;

    SEVENCLR_1 => "7CLR_1", true;
    SEVENCLR_2 => "7CLR_2", true;
    SEVENCLR_3 => "7CLR_3", true;
    SEVENCLR_4 => "7CLR_4", true;
    SEVENCLR_5 => "7CLR_5", true;
    SEVENCLR_6 => "7CLR_6", true;
    SEVENCLR_7 => "7CLR_7", true;

    EIGHTCLR_1 => "8CLR_1", true;
    EIGHTCLR_2 => "8CLR_2", true;
    EIGHTCLR_3 => "8CLR_3", true;
    EIGHTCLR_4 => "8CLR_4", true;
    EIGHTCLR_5 => "8CLR_5", true;
    EIGHTCLR_6 => "8CLR_6", true;
    EIGHTCLR_7 => "8CLR_7", true;
    EIGHTCLR_8 => "8CLR_8", true;

    D_RED => "D_RED", true;
    D_GREEN => "D_GREEN", true;
    D_BLUE => "D_BLUE", true;
    D_VIS => "D_VIS", true;

    LAB_L => "LAB_L", true;
    LAB_A => "LAB_A", true;
    LAB_B => "LAB_B", true;
    LAB_C => "LAB_C", true;
    LAB_H => "LAB_H", true;

    LAB_DE => "LAB_DE", true;
    LAB_DE_94 => "LAB_DE_94", true;
    LAB_DE_94T => "LAB_DE_94T", true;
    LAB_DE_CMC => "LAB_DE_CMC", true;
    LAB_DE_CMC2 => "LAB_DE_CMC2", true;
    LAB_DE2000 => "LAB_DE2000", true;

    XYZ_X => "XYZ_X", true;
    XYZ_Y => "XYZ_Y", true;
    XYZ_Z => "XYZ_Z", true;

    XYY_X => "XYY_X", true;
    XYY_Y => "XYY_Y", true;
    XYY_CAPY => "XYY_CAPY", true;

    SPECTRAL_380 => "SPECTRAL_380", true;
    SPECTRAL_390 => "SPECTRAL_390", true;
    SPECTRAL_400 => "SPECTRAL_400", true;
    SPECTRAL_410 => "SPECTRAL_410", true;
    SPECTRAL_420 => "SPECTRAL_420", true;
    SPECTRAL_430 => "SPECTRAL_430", true;
    SPECTRAL_440 => "SPECTRAL_440", true;
    SPECTRAL_450 => "SPECTRAL_450", true;
    SPECTRAL_460 => "SPECTRAL_460", true;
    SPECTRAL_470 => "SPECTRAL_470", true;
    SPECTRAL_480 => "SPECTRAL_480", true;
    SPECTRAL_490 => "SPECTRAL_490", true;
    SPECTRAL_500 => "SPECTRAL_500", true;
    SPECTRAL_510 => "SPECTRAL_510", true;
    SPECTRAL_520 => "SPECTRAL_520", true;
    SPECTRAL_530 => "SPECTRAL_530", true;
    SPECTRAL_540 => "SPECTRAL_540", true;
    SPECTRAL_550 => "SPECTRAL_550", true;
    SPECTRAL_560 => "SPECTRAL_560", true;
    SPECTRAL_570 => "SPECTRAL_570", true;
    SPECTRAL_580 => "SPECTRAL_580", true;
    SPECTRAL_590 => "SPECTRAL_590", true;
    SPECTRAL_600 => "SPECTRAL_600", true;
    SPECTRAL_610 => "SPECTRAL_610", true;
    SPECTRAL_620 => "SPECTRAL_620", true;
    SPECTRAL_630 => "SPECTRAL_630", true;
    SPECTRAL_640 => "SPECTRAL_640", true;
    SPECTRAL_650 => "SPECTRAL_650", true;
    SPECTRAL_660 => "SPECTRAL_660", true;
    SPECTRAL_670 => "SPECTRAL_670", true;
    SPECTRAL_680 => "SPECTRAL_680", true;
    SPECTRAL_690 => "SPECTRAL_690", true;
    SPECTRAL_700 => "SPECTRAL_700", true;
    SPECTRAL_710 => "SPECTRAL_710", true;
    SPECTRAL_720 => "SPECTRAL_720", true;
    SPECTRAL_730 => "SPECTRAL_730", true;
    SPECTRAL_740 => "SPECTRAL_740", true;
    SPECTRAL_750 => "SPECTRAL_750", true;
    SPECTRAL_760 => "SPECTRAL_760", true;
    SPECTRAL_770 => "SPECTRAL_770", true;
    SPECTRAL_780 => "SPECTRAL_780", true;
}

/// Alternate spellings seen in the wild. Matching is case-sensitive.
static ALIASES: &[(&str, DataFormatType)] = &[
    ("", DataFormatType::BLANK),
    ("SAMPLEID", DataFormatType::SAMPLE_ID),
    ("SAMPLE", DataFormatType::SAMPLE_ID),
    ("SAMPLENAME", DataFormatType::SAMPLE_NAME),
    ("D_VISUAL", DataFormatType::D_VIS),
    ("DE", DataFormatType::LAB_DE),
    ("DE76", DataFormatType::LAB_DE),
    ("DE1976", DataFormatType::LAB_DE),
    ("DE_76", DataFormatType::LAB_DE),
    ("DE_1976", DataFormatType::LAB_DE),
    ("LAB_DE_1994", DataFormatType::LAB_DE_94),
    ("DE94", DataFormatType::LAB_DE_94),
    ("DE1994", DataFormatType::LAB_DE_94),
    ("DE_94", DataFormatType::LAB_DE_94),
    ("DE_1994", DataFormatType::LAB_DE_94),
    ("LAB_DE_1994T", DataFormatType::LAB_DE_94T),
    ("DE94T", DataFormatType::LAB_DE_94T),
    ("DE1994T", DataFormatType::LAB_DE_94T),
    ("DE_94T", DataFormatType::LAB_DE_94T),
    ("DE_1994T", DataFormatType::LAB_DE_94T),
    ("CMC", DataFormatType::LAB_DE_CMC),
    ("DECMC", DataFormatType::LAB_DE_CMC),
    ("DECMC1", DataFormatType::LAB_DE_CMC),
    ("DE_CMC", DataFormatType::LAB_DE_CMC),
    ("DE_CMC1", DataFormatType::LAB_DE_CMC),
    ("CMC2", DataFormatType::LAB_DE_CMC2),
    ("DECMC2", DataFormatType::LAB_DE_CMC2),
    ("DE_CMC2", DataFormatType::LAB_DE_CMC2),
    ("LAB_DE_2000", DataFormatType::LAB_DE2000),
    ("DE00", DataFormatType::LAB_DE2000),
    ("DE2000", DataFormatType::LAB_DE2000),
    ("DE_00", DataFormatType::LAB_DE2000),
    ("DE_2000", DataFormatType::LAB_DE2000),
];

/// Implicit DATA_FORMAT of ColorBurst linearization files
pub fn color_burst_format() -> DataFormat {
    vec![
        DataFormatType::D_RED,
        DataFormatType::D_GREEN,
        DataFormatType::D_BLUE,
        DataFormatType::D_VIS,
        DataFormatType::LAB_L,
        DataFormatType::LAB_A,
        DataFormatType::LAB_B,
    ]
}

impl DataFormatType {
    #[inline]
    fn info(&self) -> &'static FieldInfo {
        &FIELD_TABLE[*self as usize]
    }

    /// Canonical CGATS keyword for this column
    #[inline]
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Whether values in this column are numeric
    #[inline]
    pub fn is_f64(&self) -> bool {
        self.info().numeric
    }

    /// Whether this column holds a color difference metric
    pub fn is_delta_e(&self) -> bool {
        matches!(
            self,
            Self::LAB_DE
                | Self::LAB_DE_94
                | Self::LAB_DE_94T
                | Self::LAB_DE_CMC
                | Self::LAB_DE_CMC2
                | Self::LAB_DE2000
        )
    }

    /// Wavelength in nanometers for spectral band columns
    pub fn wavelength(&self) -> Option<u32> {
        self.name().strip_prefix("SPECTRAL_")?.parse().ok()
    }

    /// Iterate over every known tag in table order
    pub fn all() -> impl Iterator<Item = DataFormatType> {
        FIELD_TABLE.iter().map(|info| info.tag)
    }
}

impl FromStr for DataFormatType {
    type Err = CgatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FIELD_TABLE
            .iter()
            .find(|info| info.name == s)
            .map(|info| info.tag)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == s)
                    .map(|(_, tag)| *tag)
            })
            .ok_or_else(|| CgatsError::UnknownFormatType(s.to_string()))
    }
}

impl fmt::Display for DataFormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
