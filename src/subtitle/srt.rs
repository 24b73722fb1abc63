use std::{path::Path, sync::LazyLock};

use anyhow::Context as _;
use regex::Regex;

use crate::{
    foundation::error::EventkitResult,
    subtitle::timestamp::SrtTimestamp,
};

/// ASS hard line-break marker substituted for embedded newlines.
pub const ASS_LINE_BREAK: &str = "\\N";

static CUE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\n(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})\n")
        .expect("cue header pattern is valid")
});

// Cue text stops at a blank line or at a line holding nothing but digits.
static CUE_TEXT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n|\n\d+\n").expect("cue terminator pattern is valid"));

/// One timed subtitle unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    pub index: u32,
    pub start: SrtTimestamp,
    pub end: SrtTimestamp,
    /// Text with line breaks already replaced by [`ASS_LINE_BREAK`].
    pub text: String,
}

/// Parsed cues plus counts of the input that produced no cue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SrtDocument {
    pub cues: Vec<Cue>,
    /// Blocks that carried no recognizable header.
    pub skipped_blocks: usize,
    /// Blocks with a header whose index or timestamps are out of range.
    pub dropped_cues: usize,
}

/// Extract cues from SRT text.
///
/// Blocks that do not have the `index / start --> end / text` shape produce no
/// cue. Malformed input yields fewer cues, never an error.
pub fn parse_srt(text: &str) -> SrtDocument {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let src = normalized.as_str();

    let mut cues = Vec::new();
    let mut dropped_cues = 0usize;
    let mut pos = 0usize;
    while let Some(caps) = CUE_HEADER.captures_at(src, pos) {
        let (Some(whole), Some(idx), Some(start), Some(end)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            break;
        };

        let text_start = whole.end();
        let text_end = CUE_TEXT_END
            .find_at(src, text_start)
            .map(|m| m.start())
            .unwrap_or(src.len());
        pos = text_end.max(text_start);

        let parsed = (
            idx.as_str().parse::<u32>(),
            SrtTimestamp::parse(start.as_str()),
            SrtTimestamp::parse(end.as_str()),
        );
        let (Ok(index), Ok(start), Ok(end)) = parsed else {
            tracing::warn!(header = whole.as_str(), "dropping cue with out-of-range fields");
            dropped_cues += 1;
            continue;
        };

        cues.push(Cue {
            index,
            start,
            end,
            text: src[text_start..text_end]
                .trim()
                .replace('\n', ASS_LINE_BREAK),
        });
    }

    let skipped_blocks = count_headerless_blocks(src);
    if skipped_blocks > 0 {
        tracing::warn!(skipped_blocks, "SRT blocks without a cue header were ignored");
    }

    SrtDocument {
        cues,
        skipped_blocks,
        dropped_cues,
    }
}

fn count_headerless_blocks(src: &str) -> usize {
    src.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .filter(|block| {
            // Re-append the newline the split consumed so a header on the
            // block's last line still matches.
            let mut b = String::with_capacity(block.len() + 1);
            b.push_str(block);
            b.push('\n');
            !CUE_HEADER.is_match(&b)
        })
        .count()
}

pub fn read_srt(path: &Path) -> EventkitResult<SrtDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read subtitle file '{}'", path.display()))?;
    Ok(parse_srt(&text))
}

#[cfg(test)]
#[path = "../../tests/unit/subtitle/srt.rs"]
mod tests;
