use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::ffmpeg::{BurnInCommand, probe_resolution},
    foundation::error::{EventkitError, EventkitResult},
    subtitle::{ass::write_ass, srt::read_srt},
};

pub const MARKUP_DIR: &str = "ass";
pub const OUTPUT_DIR: &str = "burnin_output";

/// Where the intermediate markup and the burned video go.
///
/// Inputs are expected two levels below a project directory (for example
/// `videos/raw/clip.mp4` and `subtitles/corrected/clip.srt`); generated files
/// land in sibling folders of those second-level directories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnInPaths {
    pub markup: PathBuf,
    pub output: PathBuf,
}

impl BurnInPaths {
    pub fn derive(video: &Path, srt: &Path, output: Option<&Path>) -> Self {
        let srt_stem = srt
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "subtitles".to_string());
        let markup = grandparent(srt)
            .join(MARKUP_DIR)
            .join(format!("{srt_stem}.ass"));

        let output = match output {
            Some(p) => p.to_path_buf(),
            None => {
                let video_stem = video
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "video".to_string());
                grandparent(video)
                    .join(OUTPUT_DIR)
                    .join(format!("{video_stem}_burnin.mp4"))
            }
        };
        Self { markup, output }
    }
}

fn grandparent(p: &Path) -> &Path {
    p.parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnInReport {
    pub markup: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub cues: usize,
    pub skipped_blocks: usize,
    pub dropped_cues: usize,
    pub size_bytes: u64,
}

impl BurnInReport {
    pub fn size_mib(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

fn require_file(path: &Path, what: &str) -> EventkitResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(EventkitError::validation(format!(
            "{what} file not found: {}",
            path.display()
        )))
    }
}

/// Probe `video`, convert `srt` to ASS sized for it, and burn it in with ffmpeg.
///
/// Blocks until ffmpeg exits. The markup file is left on disk.
#[tracing::instrument(skip_all, fields(video = %video.display(), srt = %srt.display()))]
pub fn run_burnin(video: &Path, srt: &Path, output: Option<&Path>) -> EventkitResult<BurnInReport> {
    require_file(video, "video")?;
    require_file(srt, "subtitle")?;

    let (width, height) = probe_resolution(video).context("cannot get video info")?;
    tracing::info!(width, height, "video resolution");

    let paths = BurnInPaths::derive(video, srt, output);
    let doc = read_srt(srt).context("ASS file generation failed")?;
    write_ass(&doc.cues, width, height, &paths.markup).context("ASS file generation failed")?;

    tracing::info!(output = %paths.output.display(), "starting ffmpeg burn-in");
    BurnInCommand {
        video: video.to_path_buf(),
        markup: paths.markup.clone(),
        output: paths.output.clone(),
    }
    .run()
    .context("ffmpeg execution failed")?;

    let size_bytes = std::fs::metadata(&paths.output)
        .with_context(|| format!("stat output '{}'", paths.output.display()))?
        .len();

    let report = BurnInReport {
        markup: paths.markup,
        output: paths.output,
        width,
        height,
        cues: doc.cues.len(),
        skipped_blocks: doc.skipped_blocks,
        dropped_cues: doc.dropped_cues,
        size_bytes,
    };
    tracing::info!(
        output = %report.output.display(),
        size_mib = %format!("{:.1}", report.size_mib()),
        "burn-in complete"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/burnin.rs"]
mod tests;
