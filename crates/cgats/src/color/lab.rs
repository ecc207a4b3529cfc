//! CIELAB (L*a*b*) Color Space
//!
//! L*a*b* is a perceptually uniform color space where equal distances
//! correspond to roughly equal perceived color differences.
//!
//! - L*: Lightness (0 = black, 100 = white)
//! - a*: Green-red axis (negative = green, positive = red)
//! - b*: Blue-yellow axis (negative = blue, positive = yellow)

use super::delta::DeMethod;

/// CIELAB color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness (0 to 100)
    pub l: f64,
    /// Green-red axis (typically -128 to 127)
    pub a: f64,
    /// Blue-yellow axis (typically -128 to 127)
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Create Lab from an array
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            l: arr[0],
            a: arr[1],
            b: arr[2],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Get chroma (colorfulness)
    #[inline]
    pub fn chroma(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Get hue angle in radians
    #[inline]
    pub fn hue(&self) -> f64 {
        self.b.atan2(self.a)
    }

    /// Get hue angle in degrees (0-360)
    #[inline]
    pub fn hue_degrees(&self) -> f64 {
        let h = self.hue().to_degrees();
        if h < 0.0 { h + 360.0 } else { h }
    }

    /// Color difference to another sample, `self` being the reference
    #[inline]
    pub fn delta_e(&self, other: &Self, method: DeMethod) -> f64 {
        method.delta_e(*self, *other)
    }
}

impl From<[f64; 3]> for Lab {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Lab> for [f64; 3] {
    fn from(lab: Lab) -> Self {
        lab.to_array()
    }
}
