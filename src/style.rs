//! Color palette and typography shared by all three panels.

use crate::data::Method;
use plotters::style::RGBColor;

/// Font family used for every text element in the figure
pub const FONT_FAMILY: &str = "serif";

/// Semantic color palette for the report
#[derive(Debug, Clone)]
pub struct Palette {
    pub cpu: RGBColor,
    pub cpu_prep: RGBColor,
    pub sme_prep: RGBColor,
    pub sme_4tiles: RGBColor,
    pub grid: RGBColor,
    pub text: RGBColor,
    pub baseline: RGBColor,
}

impl Palette {
    pub fn method_color(&self, method: Method) -> RGBColor {
        match method {
            Method::CpuBaseline => self.cpu,
            Method::CpuPrepSingleTile => self.cpu_prep,
            Method::SmePrepSingleTile => self.sme_prep,
            Method::SmePrepFourTiles => self.sme_4tiles,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cpu: RGBColor(127, 127, 127),
            cpu_prep: RGBColor(4, 93, 183),
            sme_prep: RGBColor(106, 23, 139),
            sme_4tiles: RGBColor(181, 128, 197),
            grid: RGBColor(232, 232, 232),
            text: RGBColor(51, 51, 51),
            baseline: RGBColor(127, 127, 127),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_method_has_a_color() {
        let palette = Palette::default();
        for &method in Method::all() {
            // Series colors must be distinguishable from the grid
            assert_ne!(palette.method_color(method), palette.grid);
        }
    }

    #[test]
    fn test_baseline_shares_cpu_color() {
        let palette = Palette::default();
        assert_eq!(palette.baseline, palette.cpu);
    }
}
