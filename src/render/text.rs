use std::collections::HashMap;

use crate::{
    assets::fonts::FontFace,
    foundation::core::Rgba8,
    foundation::error::{EventkitError, EventkitResult},
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A single shaped line of text plus the metrics needed to place it.
///
/// Glyph positions inside `layout` are relative to the layout box; `baseline`
/// is the first line's baseline inside that box.
pub struct TextBlock {
    pub layout: parley::Layout<TextBrushRgba8>,
    pub font: vello_cpu::peniko::FontData,
    pub width: f64,
    pub ascent: f64,
    pub baseline: f64,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("width", &self.width)
            .field("ascent", &self.ascent)
            .field("baseline", &self.baseline)
            .finish()
    }
}

struct RegisteredFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Stateful helper for shaping text with Parley from raw font bytes.
///
/// Each distinct [`FontFace`] is registered once and reused across layouts.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<String, RegisteredFont>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Register `face` (if needed) and return its primary family name.
    pub fn register(&mut self, face: &FontFace) -> EventkitResult<String> {
        if let Some(r) = self.registered.get(&face.source) {
            return Ok(r.family.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.as_ref().clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            EventkitError::font(format!(
                "no font families registered from '{}'",
                face.source
            ))
        })?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| EventkitError::font("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
            0,
        );
        self.registered.insert(
            face.source.clone(),
            RegisteredFont {
                family: family.clone(),
                data,
            },
        );
        Ok(family)
    }

    /// Shape `text` on one line (no wrapping).
    pub fn layout(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f64,
        color: Rgba8,
    ) -> EventkitResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(EventkitError::validation(
                "text size must be finite and > 0",
            ));
        }

        let family = self.register(face)?;
        let font = self
            .registered
            .get(&face.source)
            .map(|r| r.data.clone())
            .ok_or_else(|| EventkitError::font("font vanished after registration"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let (ascent, baseline) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (f64::from(m.ascent), f64::from(m.baseline))
            })
            .unwrap_or((0.0, 0.0));

        Ok(TextBlock {
            width: f64::from(layout.width()),
            layout,
            font,
            ascent,
            baseline,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
