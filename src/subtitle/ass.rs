use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{EventkitError, EventkitResult},
    subtitle::srt::Cue,
};

/// Resolution every style value is designed against.
pub const REFERENCE_WIDTH: u32 = 1440;
pub const REFERENCE_HEIGHT: u32 = 810;

const BASE_FONT_SIZE: f64 = 28.0;
const BASE_MARGIN_V: f64 = 50.0;
const BASE_OUTLINE: f64 = 12.0;
const BASE_SHADOW: f64 = 8.0;

pub const SCRIPT_TITLE: &str = "BizCafe Subtitles";
pub const FONT_NAME: &str = "Noto Sans CJK KR";

/// Box-opaque subtitle style scaled to one video resolution.
///
/// With `BorderStyle=3` libass draws an opaque box behind each event: the
/// outline width pads it left/right and the shadow depth pads it top/bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssStyle {
    pub play_res_x: u32,
    pub play_res_y: u32,
    pub scale: f64,
    pub font_size: u32,
    pub margin_v: u32,
    pub outline: u32,
    pub shadow: u32,
}

impl AssStyle {
    /// Fit the reference design into `width`x`height` without distortion.
    pub fn for_resolution(width: u32, height: u32) -> EventkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(EventkitError::validation(format!(
                "video resolution must be non-zero, got {width}x{height}"
            )));
        }

        let scale_x = f64::from(width) / f64::from(REFERENCE_WIDTH);
        let scale_y = f64::from(height) / f64::from(REFERENCE_HEIGHT);
        let scale = scale_x.min(scale_y);
        let px = |base: f64| (base * scale) as u32;

        Ok(Self {
            play_res_x: width,
            play_res_y: height,
            scale,
            font_size: px(BASE_FONT_SIZE),
            margin_v: px(BASE_MARGIN_V),
            outline: px(BASE_OUTLINE),
            shadow: px(BASE_SHADOW),
        })
    }

    fn header(&self) -> String {
        format!(
            "[Script Info]
Title: {SCRIPT_TITLE}
ScriptType: v4.00+
PlayResX: {res_x}
PlayResY: {res_y}
WrapStyle: 0

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,{FONT_NAME},{font_size},&H00FFFFFF,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,3,{outline},{shadow},2,20,20,{margin_v},1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
",
            res_x = self.play_res_x,
            res_y = self.play_res_y,
            font_size = self.font_size,
            outline = self.outline,
            shadow = self.shadow,
            margin_v = self.margin_v,
        )
    }
}

/// One `Dialogue:` line; the text (including `\N` markers) passes through verbatim.
pub fn dialogue_line(cue: &Cue) -> String {
    format!(
        "Dialogue: 0,{},{},Default,,0,0,0,,{}",
        cue.start.to_ass(),
        cue.end.to_ass(),
        cue.text
    )
}

/// Render a complete ASS document for `cues` at `width`x`height`.
pub fn generate_ass(cues: &[Cue], width: u32, height: u32) -> EventkitResult<String> {
    let style = AssStyle::for_resolution(width, height)?;
    Ok(render_ass(cues, &style))
}

pub fn render_ass(cues: &[Cue], style: &AssStyle) -> String {
    let mut out = style.header();
    for (i, cue) in cues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&dialogue_line(cue));
    }
    out
}

/// Write the ASS document to `path`, creating its directory.
#[tracing::instrument(skip(cues), fields(cues = cues.len()))]
pub fn write_ass(cues: &[Cue], width: u32, height: u32, path: &Path) -> EventkitResult<AssStyle> {
    let style = AssStyle::for_resolution(width, height)?;
    let doc = render_ass(cues, &style);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create markup dir '{}'", parent.display()))?;
    }
    std::fs::write(path, doc).with_context(|| format!("write ASS file '{}'", path.display()))?;

    tracing::info!(
        path = %path.display(),
        resolution = %format!("{width}x{height}"),
        cues = cues.len(),
        font_size = style.font_size,
        box_padding_lr = style.outline,
        box_padding_tb = style.shadow,
        margin_v = style.margin_v,
        "ASS file generated"
    );
    Ok(style)
}

#[cfg(test)]
#[path = "../../tests/unit/subtitle/ass.rs"]
mod tests;
