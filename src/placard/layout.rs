use crate::foundation::core::{Rgba8, mm};

/// A4 portrait, in points.
pub const A4_WIDTH_PT: f64 = 595.28;
pub const A4_HEIGHT_PT: f64 = 841.89;

/// Geometry of the fold-to-stand table tent.
///
/// All lengths are PDF points measured from the top-left corner. Bands are
/// numbered from 1 at the bottom of the page, the way the folding guide
/// describes them.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacardLayout {
    pub width_pt: f64,
    pub height_pt: f64,
    /// Raster resolution for the embedded page image.
    pub dpi: f64,
    pub bands: u32,
    pub label: String,
    pub label_size_pt: f64,
    pub label_color: Rgba8,
    /// Band holding the label upright.
    pub front_band: u32,
    /// Band holding the label rotated 180 degrees.
    pub back_band: u32,
    pub caption: String,
    pub caption_size_pt: f64,
    pub caption_color: Rgba8,
    /// Left edge and baseline of the caption.
    pub caption_origin_pt: (f64, f64),
    pub guide_inset_pt: f64,
    pub guide_width_pt: f64,
    pub guide_dash_pt: (f64, f64),
    pub guide_color: Rgba8,
}

impl Default for PlacardLayout {
    fn default() -> Self {
        Self {
            width_pt: A4_WIDTH_PT,
            height_pt: A4_HEIGHT_PT,
            dpi: 150.0,
            bands: 4,
            label: "Speaker Seats".to_string(),
            label_size_pt: 48.0,
            label_color: Rgba8::gray(0.1),
            front_band: 2,
            back_band: 3,
            caption: "↓ Fold along the dotted lines to create a table tent".to_string(),
            caption_size_pt: 9.0,
            caption_color: Rgba8::gray(0.5),
            caption_origin_pt: (mm(15.0), mm(15.0)),
            guide_inset_pt: mm(10.0),
            guide_width_pt: 1.0,
            guide_dash_pt: (3.0, 3.0),
            guide_color: Rgba8::gray(0.7),
        }
    }
}

impl PlacardLayout {
    pub fn px_per_pt(&self) -> f64 {
        self.dpi / crate::foundation::core::POINTS_PER_INCH
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let s = self.px_per_pt();
        (
            (self.width_pt * s).round() as u32,
            (self.height_pt * s).round() as u32,
        )
    }

    pub fn band_height_pt(&self) -> f64 {
        self.height_pt / f64::from(self.bands.max(1))
    }

    /// Vertical center of band `n` (1 = bottom), measured from the top.
    pub fn band_center_pt(&self, n: u32) -> f64 {
        self.height_pt - (f64::from(n) - 0.5) * self.band_height_pt()
    }

    /// Fold lines between bands, measured from the top.
    pub fn guide_ys_pt(&self) -> impl Iterator<Item = f64> + '_ {
        (1..self.bands).map(|i| f64::from(i) * self.band_height_pt())
    }

    /// Offset from the band center down to the label baseline.
    pub fn label_drop_pt(&self) -> f64 {
        self.label_size_pt / 3.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placard/layout.rs"]
mod tests;
