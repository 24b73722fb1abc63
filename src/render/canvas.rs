use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::decode::{RgbaImage, premultiply_rgba8_in_place},
    foundation::core::{Affine, Point, Rect, Rgba8},
    foundation::error::{EventkitError, EventkitResult},
    render::text::TextBlock,
};

const PATH_TOLERANCE: f64 = 0.1;

/// Fixed-size CPU drawing surface.
///
/// Draw calls are recorded into a `vello_cpu` context and rasterized when the
/// canvas is finished. The first operation is always an opaque background fill.
pub struct Canvas {
    width: u16,
    height: u16,
    background: Rgba8,
    ctx: vello_cpu::RenderContext,
}

/// Rasterized canvas in premultiplied RGBA8, row-major.
#[derive(Clone, Debug)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub background: Rgba8,
    pub data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba8) -> EventkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(EventkitError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| EventkitError::validation("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| EventkitError::validation("canvas height exceeds u16"))?;

        let mut canvas = Self {
            width: w,
            height: h,
            background,
            ctx: vello_cpu::RenderContext::new(w, h),
        };
        let full = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
        canvas.fill_rect(full, Rgba8 { a: 255, ..background });
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn begin(&mut self, transform: Affine) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.begin(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        let r = rect_to_cpu(rect);
        let path = vello_cpu::kurbo::RoundedRect::new(r.x0, r.y0, r.x1, r.y1, radius)
            .to_path(PATH_TOLERANCE);
        self.begin(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.fill_path(&path);
    }

    /// Fill the ellipse inscribed in `rect`.
    pub fn fill_ellipse(&mut self, rect: Rect, color: Rgba8) {
        let path = vello_cpu::kurbo::Ellipse::from_rect(rect_to_cpu(rect)).to_path(PATH_TOLERANCE);
        self.begin(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.fill_path(&path);
    }

    /// Horizontal rule of `thickness` centered on `y`.
    pub fn hline(&mut self, x0: f64, x1: f64, y: f64, thickness: f64, color: Rgba8) {
        let half = thickness / 2.0;
        self.fill_rect(Rect::new(x0, y - half, x1, y + half), color);
    }

    /// Horizontal dashed rule; the pattern starts with a full dash at `x0`.
    pub fn dashed_hline(
        &mut self,
        x0: f64,
        x1: f64,
        y: f64,
        thickness: f64,
        dash: (f64, f64),
        color: Rgba8,
    ) {
        let (on, off) = dash;
        if on <= 0.0 || off < 0.0 {
            self.hline(x0, x1, y, thickness, color);
            return;
        }
        let mut x = x0;
        while x < x1 {
            self.hline(x, (x + on).min(x1), y, thickness, color);
            x += on + off;
        }
    }

    /// Composite a straight-alpha image with its top-left corner at `origin`.
    pub fn draw_image(&mut self, img: &RgbaImage, origin: Point) -> EventkitResult<()> {
        let (w, h) = img.dimensions();
        let pixmap = image_to_pixmap(img)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.begin(Affine::translate((origin.x, origin.y)));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        Ok(())
    }

    /// Draw `block` with its left edge at `x` and its baseline at `baseline_y`.
    pub fn draw_text(&mut self, block: &TextBlock, x: f64, baseline_y: f64) {
        self.draw_text_with(block, Affine::translate((x, baseline_y)));
    }

    /// Draw `block` with its left edge at `x` and its ascent line at `top_y`.
    pub fn draw_text_top(&mut self, block: &TextBlock, x: f64, top_y: f64) {
        self.draw_text(block, x, top_y + block.ascent);
    }

    /// Draw `block` through `transform`, which maps the block's baseline origin
    /// (left edge, baseline) into canvas space.
    pub fn draw_text_with(&mut self, block: &TextBlock, transform: Affine) {
        self.begin(transform * Affine::translate((0.0, -block.baseline)));

        for line in block.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let mut pen_x = run.offset();
                let baseline = run.baseline();
                let glyphs = run.glyphs().map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: pen_x + g.x,
                        y: baseline - g.y,
                    };
                    pen_x += g.advance;
                    glyph
                });
                self.ctx
                    .glyph_run(&block.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> RasterFrame {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        RasterFrame {
            width: u32::from(self.width),
            height: u32::from(self.height),
            background: self.background,
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

impl RasterFrame {
    /// Premultiplied RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(off..off + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Flatten over the canvas background into an opaque RGB image.
    pub fn to_rgb8(&self) -> EventkitResult<image::RgbImage> {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        let bg = self.background;
        for px in self.data.chunks_exact(4) {
            let inv = 255u16 - u16::from(px[3]);
            rgb.push((u16::from(px[0]) + mul_div255(u16::from(bg.r), inv)).min(255) as u8);
            rgb.push((u16::from(px[1]) + mul_div255(u16::from(bg.g), inv)).min(255) as u8);
            rgb.push((u16::from(px[2]) + mul_div255(u16::from(bg.b), inv)).min(255) as u8);
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .ok_or_else(|| EventkitError::render("frame data size mismatch with width*height"))
    }

    pub fn save_png(&self, path: &Path) -> EventkitResult<()> {
        let rgb = self.to_rgb8()?;
        rgb.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_to_pixmap(img: &RgbaImage) -> EventkitResult<vello_cpu::Pixmap> {
    let (width, height) = img.dimensions();
    let w: u16 = width
        .try_into()
        .map_err(|_| EventkitError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| EventkitError::render("image height exceeds u16"))?;

    let mut premul = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut premul);

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
