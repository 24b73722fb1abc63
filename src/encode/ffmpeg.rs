use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::foundation::error::{EventkitError, EventkitResult};

pub fn is_tool_on_path(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn is_ffmpeg_on_path() -> bool {
    is_tool_on_path("ffmpeg")
}

pub fn ensure_parent_dir(path: &Path) -> EventkitResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Width and height of the first video stream, as reported by `ffprobe`.
pub fn probe_resolution(video: &Path) -> EventkitResult<(u32, u32)> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "json",
        ])
        .arg(video)
        .output()
        .map_err(|e| EventkitError::external(format!("failed to run ffprobe: {e}")))?;

    if !out.status.success() {
        return Err(EventkitError::external(format!(
            "ffprobe failed for '{}': {}",
            video.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    parse_probe_json(&out.stdout)
}

pub(crate) fn parse_probe_json(stdout: &[u8]) -> EventkitResult<(u32, u32)> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        width: Option<u32>,
        height: Option<u32>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
    }

    let parsed: ProbeOut = serde_json::from_slice(stdout)
        .map_err(|e| EventkitError::external(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .first()
        .ok_or_else(|| EventkitError::external("no video stream found"))?;
    let width = stream
        .width
        .ok_or_else(|| EventkitError::external("missing video width from ffprobe"))?;
    let height = stream
        .height
        .ok_or_else(|| EventkitError::external("missing video height from ffprobe"))?;
    if width == 0 || height == 0 {
        return Err(EventkitError::external(format!(
            "ffprobe reported an empty frame size {width}x{height}"
        )));
    }
    Ok((width, height))
}

/// Escape a file path for use as the value of a filter option inside `-vf`.
///
/// ffmpeg unescapes filter arguments twice: once for the option value
/// (`\ ' :`) and once for the filtergraph (`\ ' [ ] , ;`).
pub fn escape_filter_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let level1 = escape_chars(&raw, &['\\', '\'', ':']);
    escape_chars(&level1, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_chars(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `ffmpeg` invocation compositing an ASS file onto a video.
///
/// Video is re-encoded with the overlay, audio is copied untouched, and any
/// existing file at `output` is overwritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnInCommand {
    pub video: PathBuf,
    pub markup: PathBuf,
    pub output: PathBuf,
}

impl BurnInCommand {
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "-i".into(),
            self.video.clone().into_os_string(),
            "-vf".into(),
            format!("ass={}", escape_filter_path(&self.markup)).into(),
            "-c:a".into(),
            "copy".into(),
            "-y".into(),
            self.output.clone().into_os_string(),
        ]
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(self.args());
        cmd
    }

    /// Run ffmpeg to completion; stdout/stderr stay attached to the terminal.
    #[tracing::instrument(skip(self), fields(output = %self.output.display()))]
    pub fn run(&self) -> EventkitResult<()> {
        ensure_parent_dir(&self.output)?;

        let status = self.command().status().map_err(|e| {
            EventkitError::external(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        if !status.success() {
            return Err(EventkitError::external(format!(
                "ffmpeg exited with status {status}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
