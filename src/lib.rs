//! eventkit produces the printables and media for a small meetup.
//!
//! - Name tags: one fixed-layout PNG per attendee row of a CSV table
//!   ([`load_attendees`], [`NametagRenderer`], [`render_nametag_batch`]).
//! - Table tent: a four-band, fold-to-stand placard page as PDF or PNG
//!   ([`render_placard`], [`write_placard`]).
//! - Subtitle burn-in: SRT cues converted to ASS markup scaled to the video,
//!   composited by the system `ffmpeg` ([`parse_srt`], [`generate_ass`],
//!   [`run_burnin`]).
//!
//! Rasterization runs on the CPU through `vello_cpu`; text is shaped with
//! `parley` from font files found by a [`FontLocator`].
#![forbid(unsafe_code)]

mod assets;
mod burnin;
mod encode;
mod foundation;
mod nametag;
mod placard;
mod render;
mod subtitle;

pub use crate::foundation::core::{
    Affine, MM_PER_INCH, POINTS_PER_INCH, Point, Rect, Rgba8, Vec2, center_offset, mm,
};
pub use crate::foundation::error::{EventkitError, EventkitResult};

pub use crate::assets::decode::{RgbaImage, decode_image, force_opaque, load_image, resize_exact};
pub use crate::assets::fonts::{
    FontChain, FontFace, FontLocator, FontStyle, MemoryFontLocator, PathListLocator, resolve_font,
};
pub use crate::render::canvas::{Canvas, RasterFrame};
pub use crate::render::text::{TextBlock, TextBrushRgba8, TextEngine};

pub use crate::nametag::attendee::{
    Attendee, AttendeeLoad, NAME_HEADER, ORGANIZATION_HEADER, PLACEHOLDER_ORGANIZATION,
    ROLE_HEADER, Role, load_attendees, parse_attendees,
};
pub use crate::nametag::layout::{
    Caption, CenteredLine, DEFAULT_SCALE, EventBranding, ImagePanel, NametagLayout, RuledLine,
};
pub use crate::nametag::render::{
    CODE_FILE, ICON_FILE, NametagAssets, NametagBatch, NametagRenderer, ROCKET_MARKER,
    SPONSOR_FILE, nametag_filename, render_nametag, render_nametag_batch, write_nametag,
};

pub use crate::placard::layout::{A4_HEIGHT_PT, A4_WIDTH_PT, PlacardLayout};
pub use crate::placard::pdf::{PlacardFormat, encode_pdf, write_placard};
pub use crate::placard::render::render_placard;

pub use crate::subtitle::ass::{
    AssStyle, FONT_NAME, REFERENCE_HEIGHT, REFERENCE_WIDTH, SCRIPT_TITLE, dialogue_line,
    generate_ass, render_ass, write_ass,
};
pub use crate::subtitle::srt::{ASS_LINE_BREAK, Cue, SrtDocument, parse_srt, read_srt};
pub use crate::subtitle::timestamp::{SrtTimestamp, srt_to_ass_time};

pub use crate::burnin::{BurnInPaths, BurnInReport, MARKUP_DIR, OUTPUT_DIR, run_burnin};
pub use crate::encode::ffmpeg::{
    BurnInCommand, ensure_parent_dir, escape_filter_path, is_ffmpeg_on_path, is_tool_on_path,
    probe_resolution,
};
