use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::{
        decode::{RgbaImage, force_opaque, load_image, resize_exact},
        fonts::FontFace,
    },
    foundation::{
        core::{Point, Rect, Rgba8, center_offset},
        error::{EventkitError, EventkitResult},
    },
    nametag::{
        attendee::Attendee,
        layout::{EventBranding, ImagePanel, NametagLayout},
    },
    render::{canvas::Canvas, text::TextEngine},
};

/// Leading marker that swaps the organization glyph for the icon asset.
pub const ROCKET_MARKER: char = '🚀';

pub const CODE_FILE: &str = "qr_code.png";
pub const SPONSOR_FILE: &str = "sponsor_logo.png";
pub const ICON_FILE: &str = "rocket_icon.png";

/// Fixed images printed on every tag.
#[derive(Clone, Debug)]
pub struct NametagAssets {
    pub code: RgbaImage,
    pub sponsor: RgbaImage,
    pub icon: Option<RgbaImage>,
}

impl NametagAssets {
    /// Load `qr_code.png`, `sponsor_logo.png` and the optional
    /// `rocket_icon.png` from `dir`.
    pub fn load(dir: &Path) -> EventkitResult<Self> {
        let required = |file: &str| -> EventkitResult<RgbaImage> {
            let path = dir.join(file);
            if !path.is_file() {
                return Err(EventkitError::validation(format!(
                    "asset not found: {}",
                    path.display()
                )));
            }
            load_image(&path)
        };

        let code = required(CODE_FILE)?;
        let sponsor = required(SPONSOR_FILE)?;
        let icon_path = dir.join(ICON_FILE);
        let icon = if icon_path.is_file() {
            Some(load_image(&icon_path)?)
        } else {
            tracing::debug!(path = %icon_path.display(), "no icon asset; marker renders as text");
            None
        };
        Ok(Self {
            code,
            sponsor,
            icon,
        })
    }

    /// Resample every image to its slot in `layout`. The code image is made
    /// opaque; the sponsor mark and icon keep their alpha.
    pub fn fitted(&self, layout: &NametagLayout) -> Self {
        let mut code = resize_to(&self.code, layout.code.image);
        force_opaque(&mut code);
        let icon_px = layout.icon_size.round().max(1.0) as u32;
        Self {
            code,
            sponsor: resize_to(&self.sponsor, layout.sponsor.image),
            icon: self
                .icon
                .as_ref()
                .map(|img| resize_exact(img, icon_px, icon_px)),
        }
    }
}

fn resize_to(img: &RgbaImage, slot: Rect) -> RgbaImage {
    let w = slot.width().round().max(1.0) as u32;
    let h = slot.height().round().max(1.0) as u32;
    resize_exact(img, w, h)
}

/// Everything needed to draw tags, prepared once per batch.
pub struct NametagRenderer {
    layout: NametagLayout,
    branding: EventBranding,
    assets: NametagAssets,
    face: FontFace,
    text: TextEngine,
}

impl NametagRenderer {
    /// Fit assets to the layout and register the font up front, so a bad font
    /// fails before the first file is written.
    pub fn new(
        layout: NametagLayout,
        branding: EventBranding,
        assets: &NametagAssets,
        face: FontFace,
    ) -> EventkitResult<Self> {
        let mut text = TextEngine::new();
        text.register(&face)?;
        Ok(Self {
            assets: assets.fitted(&layout),
            layout,
            branding,
            face,
            text,
        })
    }

    pub fn layout(&self) -> &NametagLayout {
        &self.layout
    }

    fn centered_text(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        center_x: f64,
        top: f64,
        size: f64,
        color: Rgba8,
    ) -> EventkitResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let block = self.text.layout(text, &self.face, size, color)?;
        canvas.draw_text_top(&block, center_x + center_offset(0.0, block.width), top);
        Ok(())
    }

    fn image_panel(
        &self,
        canvas: &mut Canvas,
        slot: ImagePanel,
        image: &RgbaImage,
    ) -> EventkitResult<()> {
        canvas.fill_rounded_rect(slot.panel, self.layout.radius, self.layout.panel_color);
        canvas.draw_image(image, Point::new(slot.image.x0, slot.image.y0))
    }

    fn rule(&self, canvas: &mut Canvas, y: f64) {
        let (x0, x1) = self.layout.rule_x;
        canvas.hline(x0, x1, y, self.layout.rule_width, self.layout.rule_color);
    }

    fn organization(&mut self, canvas: &mut Canvas, organization: &str) -> EventkitResult<()> {
        let line = self.layout.organization;
        let baseline = line.rule_y - line.lift;
        let width = self.layout.width;

        if let (Some(rest), Some(icon)) = (
            organization.strip_prefix(ROCKET_MARKER),
            self.assets.icon.as_ref(),
        ) {
            let block = self.text.layout(rest, &self.face, line.size, line.color)?;
            let icon_size = self.layout.icon_size;
            let total = icon_size + self.layout.icon_gap + block.width;
            let start_x = center_offset(width, total);
            // Icon centered on the ascent band of the text.
            let icon_top = baseline - block.ascent / 2.0 - icon_size / 2.0;
            canvas.draw_image(icon, Point::new(start_x.floor(), icon_top.floor()))?;
            canvas.draw_text(&block, start_x + icon_size + self.layout.icon_gap, baseline);
            return Ok(());
        }

        if organization.is_empty() {
            return Ok(());
        }
        let block = self
            .text
            .layout(organization, &self.face, line.size, line.color)?;
        canvas.draw_text(&block, center_offset(width, block.width), baseline);
        Ok(())
    }
}

/// Draw one tag. Pure: nothing touches the filesystem.
#[tracing::instrument(skip_all, fields(name = %attendee.name))]
pub fn render_nametag(renderer: &mut NametagRenderer, attendee: &Attendee) -> EventkitResult<Canvas> {
    let layout = renderer.layout.clone();
    let branding = renderer.branding.clone();
    let (w, h) = layout.pixel_size();
    let mut canvas = Canvas::new(w, h, layout.background)?;

    for circle in layout.circles {
        canvas.fill_ellipse(circle, layout.circle_color);
    }

    let mid = layout.width / 2.0;
    for (text, line) in [
        (&branding.title, layout.title),
        (&branding.subtitle, layout.subtitle),
        (&branding.byline, layout.byline),
    ] {
        renderer.centered_text(&mut canvas, text, mid, line.top, line.size, line.color)?;
    }

    renderer.image_panel(&mut canvas, layout.code, &renderer.assets.code)?;
    let c = layout.code_caption;
    renderer.centered_text(&mut canvas, &branding.code_caption, c.center_x, c.top, c.size, c.color)?;

    renderer.image_panel(&mut canvas, layout.sponsor, &renderer.assets.sponsor)?;
    let c = layout.sponsor_caption;
    renderer.centered_text(
        &mut canvas,
        &branding.sponsor_caption,
        c.center_x,
        c.top,
        c.size,
        c.color,
    )?;

    canvas.fill_rounded_rect(layout.name_panel, layout.radius, layout.panel_color);

    let name = layout.name;
    if !attendee.name.is_empty() {
        let block = renderer
            .text
            .layout(&attendee.name, &renderer.face, name.size, name.color)?;
        canvas.draw_text(
            &block,
            center_offset(layout.width, block.width),
            name.rule_y - name.lift,
        );
    }
    renderer.rule(&mut canvas, name.rule_y);

    renderer.organization(&mut canvas, &attendee.organization)?;
    renderer.rule(&mut canvas, layout.organization.rule_y);

    Ok(canvas)
}

/// `NN_<name>.png`, with spaces and path separators in the name replaced by `_`.
pub fn nametag_filename(index: usize, name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("{index:02}_{sanitized}.png")
}

/// Render and write exactly one tag into `out_dir`.
pub fn write_nametag(
    renderer: &mut NametagRenderer,
    index: usize,
    attendee: &Attendee,
    out_dir: &Path,
) -> EventkitResult<PathBuf> {
    let path = out_dir.join(nametag_filename(index, &attendee.name));
    let frame = render_nametag(renderer, attendee)?.finish();
    frame.save_png(&path)?;
    tracing::info!(path = %path.display(), "wrote name tag");
    Ok(path)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NametagBatch {
    /// One entry per attendee, in input order.
    pub written: Vec<PathBuf>,
    /// Writes that replaced a file already present in `out_dir`.
    pub overwritten: usize,
}

/// Write one tag per attendee, numbered from 1. Existing files are replaced.
#[tracing::instrument(skip(renderer, attendees), fields(count = attendees.len()))]
pub fn render_nametag_batch(
    renderer: &mut NametagRenderer,
    attendees: &[Attendee],
    out_dir: &Path,
) -> EventkitResult<NametagBatch> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let mut batch = NametagBatch::default();
    for (i, attendee) in attendees.iter().enumerate() {
        let index = i + 1;
        let target = out_dir.join(nametag_filename(index, &attendee.name));
        if target.exists() {
            tracing::warn!(path = %target.display(), "overwriting existing name tag");
            batch.overwritten += 1;
        }
        batch
            .written
            .push(write_nametag(renderer, index, attendee, out_dir)?);
    }
    Ok(batch)
}

#[cfg(test)]
#[path = "../../tests/unit/nametag/render.rs"]
mod tests;
