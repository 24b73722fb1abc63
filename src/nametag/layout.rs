use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::{Rect, Rgba8},
    error::{EventkitError, EventkitResult},
};

/// Default multiplier from the reference design to output pixels.
pub const DEFAULT_SCALE: f64 = 2.0;

/// A text line centered horizontally on the canvas, positioned by its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenteredLine {
    pub top: f64,
    pub size: f64,
    pub color: Rgba8,
}

/// A caption centered on a vertical axis `center_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Caption {
    pub center_x: f64,
    pub top: f64,
    pub size: f64,
    pub color: Rgba8,
}

/// A white panel holding an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePanel {
    pub panel: Rect,
    pub image: Rect,
}

/// A text line that sits on a horizontal rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuledLine {
    pub rule_y: f64,
    /// Distance from the rule up to the text baseline.
    pub lift: f64,
    pub size: f64,
    pub color: Rgba8,
}

/// Every coordinate of the name tag. Nothing is computed at render time
/// except text widths.
#[derive(Clone, Debug, PartialEq)]
pub struct NametagLayout {
    pub width: f64,
    pub height: f64,
    pub background: Rgba8,
    pub panel_color: Rgba8,
    pub radius: f64,
    /// Translucent decorative circles, as bounding boxes.
    pub circles: [Rect; 2],
    pub circle_color: Rgba8,
    pub title: CenteredLine,
    pub subtitle: CenteredLine,
    pub byline: CenteredLine,
    pub code: ImagePanel,
    pub code_caption: Caption,
    pub sponsor: ImagePanel,
    pub sponsor_caption: Caption,
    pub name_panel: Rect,
    pub rule_x: (f64, f64),
    pub rule_width: f64,
    pub rule_color: Rgba8,
    pub name: RuledLine,
    pub organization: RuledLine,
    pub icon_size: f64,
    pub icon_gap: f64,
}

const BLUE: Rgba8 = Rgba8::rgb(0, 120, 255);
const LIGHT_BLUE: Rgba8 = Rgba8::rgb(183, 207, 255);
const SOFT_BLUE: Rgba8 = Rgba8::rgb(158, 200, 248);
const GRAY: Rgba8 = Rgba8::rgb(209, 213, 220);
const DARK_GRAY: Rgba8 = Rgba8::rgb(100, 100, 100);

fn square(x: f64, y: f64, size: f64) -> Rect {
    Rect::new(x, y, x + size, y + size)
}

fn boxed(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

impl NametagLayout {
    /// The 359x461 reference design.
    pub fn reference() -> Self {
        Self {
            width: 359.0,
            height: 461.0,
            background: BLUE,
            panel_color: Rgba8::WHITE,
            radius: 10.0,
            circles: [square(295.0, -64.0, 128.0), square(-48.0, 413.0, 96.0)],
            circle_color: Rgba8::rgba(255, 255, 255, 13),
            title: CenteredLine {
                top: 40.0,
                size: 30.0,
                color: Rgba8::WHITE,
            },
            subtitle: CenteredLine {
                top: 77.0,
                size: 18.0,
                color: Rgba8::WHITE,
            },
            byline: CenteredLine {
                top: 98.0,
                size: 18.0,
                color: SOFT_BLUE,
            },
            code: ImagePanel {
                panel: square(31.0, 154.0, 66.0),
                image: square(36.0, 159.0, 56.5),
            },
            code_caption: Caption {
                center_x: 63.5,
                top: 227.0,
                size: 10.0,
                color: LIGHT_BLUE,
            },
            sponsor: ImagePanel {
                panel: boxed(115.0, 154.0, 226.0, 66.0),
                image: boxed(127.0, 165.0, 202.0, 44.0),
            },
            sponsor_caption: Caption {
                center_x: 227.5,
                top: 228.0,
                size: 10.0,
                color: LIGHT_BLUE,
            },
            name_panel: boxed(24.0, 279.0, 311.0, 204.0),
            rule_x: (48.0, 311.0),
            rule_width: 2.0,
            rule_color: GRAY,
            name: RuledLine {
                rule_y: 368.0,
                lift: 10.0,
                size: 28.0,
                color: Rgba8::BLACK,
            },
            organization: RuledLine {
                rule_y: 426.0,
                lift: 8.0,
                size: 16.0,
                color: DARK_GRAY,
            },
            icon_size: 14.0,
            icon_gap: 4.0,
        }
    }

    /// Multiply every length by `factor`. Colors are untouched.
    pub fn scaled(&self, factor: f64) -> EventkitResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EventkitError::validation(
                "layout scale must be finite and > 0",
            ));
        }
        let r = |v: Rect| Rect::new(v.x0 * factor, v.y0 * factor, v.x1 * factor, v.y1 * factor);
        let line = |l: CenteredLine| CenteredLine {
            top: l.top * factor,
            size: l.size * factor,
            ..l
        };
        let caption = |c: Caption| Caption {
            center_x: c.center_x * factor,
            top: c.top * factor,
            size: c.size * factor,
            ..c
        };
        let panel = |p: ImagePanel| ImagePanel {
            panel: r(p.panel),
            image: r(p.image),
        };
        let ruled = |l: RuledLine| RuledLine {
            rule_y: l.rule_y * factor,
            lift: l.lift * factor,
            size: l.size * factor,
            ..l
        };

        Ok(Self {
            width: self.width * factor,
            height: self.height * factor,
            background: self.background,
            panel_color: self.panel_color,
            radius: self.radius * factor,
            circles: [r(self.circles[0]), r(self.circles[1])],
            circle_color: self.circle_color,
            title: line(self.title),
            subtitle: line(self.subtitle),
            byline: line(self.byline),
            code: panel(self.code),
            code_caption: caption(self.code_caption),
            sponsor: panel(self.sponsor),
            sponsor_caption: caption(self.sponsor_caption),
            name_panel: r(self.name_panel),
            rule_x: (self.rule_x.0 * factor, self.rule_x.1 * factor),
            rule_width: self.rule_width * factor,
            rule_color: self.rule_color,
            name: ruled(self.name),
            organization: ruled(self.organization),
            icon_size: self.icon_size * factor,
            icon_gap: self.icon_gap * factor,
        })
    }

    /// Output pixel size, rounded to whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

impl Default for NametagLayout {
    fn default() -> Self {
        let reference = Self::reference();
        reference.scaled(DEFAULT_SCALE).unwrap_or(reference)
    }
}

/// Fixed event texts printed on every tag.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventBranding {
    pub title: String,
    pub subtitle: String,
    pub byline: String,
    pub code_caption: String,
    pub sponsor_caption: String,
}

impl Default for EventBranding {
    fn default() -> Self {
        Self {
            title: "AI Builders Meetup".to_string(),
            subtitle: "Echo & Delta".to_string(),
            byline: "by Team Attention".to_string(),
            code_caption: "밋업 안내".to_string(),
            sponsor_caption: "Sponsor".to_string(),
        }
    }
}

impl EventBranding {
    /// Load overrides from JSON; absent fields keep their defaults.
    pub fn from_path(path: &Path) -> EventkitResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open branding '{}'", path.display()))?;
        let branding = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse branding JSON '{}'", path.display()))?;
        Ok(branding)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nametag/layout.rs"]
mod tests;
