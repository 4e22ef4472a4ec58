//! Colors - Medal and chart palettes

use std::fmt;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

/// Build a color from a hex literal, e.g. `rgb(0xffd700)`
pub const fn rgb(hex: u32) -> Rgb {
    Rgb(hex & 0x00ff_ffff)
}

impl Rgb {
    fn channels(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Linear blend towards `other`; `t` is clamped to `0..=1`
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let [r0, g0, b0] = self.channels();
        let [r1, g1, b1] = other.channels();
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u32;
        Rgb((lerp(r0, r1) << 16) | (lerp(g0, g1) << 8) | lerp(b0, b1))
    }

    /// `#rrggbb`
    pub fn hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Chart palette - All colors are accessed via associated functions
pub struct ChartColors;

impl ChartColors {
    // Medals
    pub fn gold() -> Rgb { rgb(0xffd700) }
    pub fn silver() -> Rgb { rgb(0xc0c0c0) }
    pub fn bronze() -> Rgb { rgb(0xcd7f32) }
    /// Single-series bars (total medals)
    pub fn total() -> Rgb { rgb(0x1a3a6e) }

    // Highlights
    /// Host nation bar and label
    pub fn host() -> Rgb { rgb(0xff4500) }
    /// Average lines on the host chart
    pub fn average() -> Rgb { rgb(0x666666) }
    /// Heatmap cells holding an explicit zero
    pub fn zero_cell() -> Rgb { rgb(0xf5f5f5) }
    /// Placeholder for years without data
    pub fn no_data() -> Rgb { rgb(0xeeeeee) }

    // Flow diagram
    pub fn flow_year() -> Rgb { rgb(0x1f77b4) }
    pub fn flow_sport() -> Rgb { rgb(0x2ca02c) }
    pub fn flow_country() -> Rgb { rgb(0xd62728) }
    pub fn flow_link() -> Rgb { rgb(0xcccccc) }

    // Text and chrome
    pub fn text() -> Rgb { rgb(0x333333) }
    pub fn text_muted() -> Rgb { rgb(0x666666) }
    pub fn grid() -> Rgb { rgb(0xe5e7eb) }
    pub fn cluster_line() -> Rgb { rgb(0x000000) }
    pub fn error() -> Rgb { rgb(0xef4444) }

    /// Color of a medal segment
    pub fn medal(medal_type: crate::domain::medal::MedalType) -> Rgb {
        use crate::domain::medal::MedalType;
        match medal_type {
            MedalType::Gold => Self::gold(),
            MedalType::Silver => Self::silver(),
            MedalType::Bronze => Self::bronze(),
            MedalType::Total => Self::total(),
        }
    }
}

/// d3 category10
const CATEGORY10: [Rgb; 10] = [
    rgb(0x1f77b4),
    rgb(0xff7f0e),
    rgb(0x2ca02c),
    rgb(0xd62728),
    rgb(0x9467bd),
    rgb(0x8c564b),
    rgb(0xe377c2),
    rgb(0x7f7f7f),
    rgb(0xbcbd22),
    rgb(0x17becf),
];

/// Series color for the `slot`-th selected country
pub fn category10(slot: usize) -> Rgb {
    CATEGORY10[slot % CATEGORY10.len()]
}

/// ColorBrewer YlOrRd, light to dark
const YL_OR_RD: [Rgb; 9] = [
    rgb(0xffffcc),
    rgb(0xffeda0),
    rgb(0xfed976),
    rgb(0xfeb24c),
    rgb(0xfd8d3c),
    rgb(0xfc4e2a),
    rgb(0xe31a1c),
    rgb(0xbd0026),
    rgb(0x800026),
];

/// Sequential heatmap color for `t` in `0..=1`
pub fn yl_or_rd(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (YL_OR_RD.len() - 1) as f64;
    let i = (pos.floor() as usize).min(YL_OR_RD.len() - 2);
    YL_OR_RD[i].mix(YL_OR_RD[i + 1], pos - i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_format() {
        assert_eq!(ChartColors::gold().hex(), "#ffd700");
        assert_eq!(rgb(0x00000a).to_string(), "#00000a");
    }

    #[test]
    fn test_yl_or_rd_endpoints() {
        assert_eq!(yl_or_rd(0.0), rgb(0xffffcc));
        assert_eq!(yl_or_rd(1.0), rgb(0x800026));
        assert_eq!(yl_or_rd(f64::NAN), rgb(0xffffcc));
        assert_eq!(yl_or_rd(0.5), rgb(0xfd8d3c));
    }

    #[test]
    fn test_category10_wraps() {
        assert_eq!(category10(0), category10(10));
    }
}
