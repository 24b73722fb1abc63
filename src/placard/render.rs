use std::f64::consts::PI;

use crate::{
    assets::fonts::{FontLocator, FontStyle, resolve_font},
    foundation::{
        core::{Affine, Rgba8, center_offset},
        error::{EventkitError, EventkitResult},
    },
    placard::layout::PlacardLayout,
    render::{canvas::Canvas, text::TextEngine},
};

/// Rasterize the table-tent page at `layout.dpi`.
///
/// The label is set in the bold face (falling back to regular when the
/// locator has no bold), the caption in the regular face.
#[tracing::instrument(skip_all, fields(label = %layout.label))]
pub fn render_placard(layout: &PlacardLayout, fonts: &dyn FontLocator) -> EventkitResult<Canvas> {
    let in_range = |band: u32| (1..=layout.bands).contains(&band);
    if !in_range(layout.front_band) || !in_range(layout.back_band) {
        return Err(EventkitError::validation(
            "placard label bands must lie within 1..=bands",
        ));
    }

    let bold = resolve_font(fonts, FontStyle::Bold)?;
    let regular = resolve_font(fonts, FontStyle::Regular)?;
    tracing::debug!(bold = %bold.source, regular = %regular.source, "placard fonts");

    let s = layout.px_per_pt();
    let (w, h) = layout.pixel_size();
    let mut canvas = Canvas::new(w, h, Rgba8::WHITE)?;
    let mut text = TextEngine::new();

    let (on, off) = layout.guide_dash_pt;
    let x0 = layout.guide_inset_pt * s;
    let x1 = (layout.width_pt - layout.guide_inset_pt) * s;
    for y in layout.guide_ys_pt() {
        canvas.dashed_hline(
            x0,
            x1,
            y * s,
            layout.guide_width_pt * s,
            (on * s, off * s),
            layout.guide_color,
        );
    }

    if !layout.label.is_empty() {
        let block = text.layout(
            &layout.label,
            &bold,
            layout.label_size_pt * s,
            layout.label_color,
        )?;
        let cx = layout.width_pt * s / 2.0;
        let drop = layout.label_drop_pt() * s;

        let front_y = layout.band_center_pt(layout.front_band) * s;
        canvas.draw_text(&block, cx + center_offset(0.0, block.width), front_y + drop);

        // Same placement, turned half a revolution about the band center.
        let back_y = layout.band_center_pt(layout.back_band) * s;
        let back = Affine::translate((cx, back_y))
            * Affine::rotate(PI)
            * Affine::translate((-block.width / 2.0, drop));
        canvas.draw_text_with(&block, back);
    }

    if !layout.caption.is_empty() {
        let block = text.layout(
            &layout.caption,
            &regular,
            layout.caption_size_pt * s,
            layout.caption_color,
        )?;
        let (x, baseline) = layout.caption_origin_pt;
        canvas.draw_text(&block, x * s, baseline * s);
    }

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/placard/render.rs"]
mod tests;
