use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use sha2::Digest as _;

use crate::foundation::error::{EventkitError, EventkitResult};

/// Weight class requested by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl std::fmt::Display for FontStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => f.write_str("regular"),
            Self::Bold => f.write_str("bold"),
        }
    }
}

/// Raw font file bytes plus a label naming where they came from.
#[derive(Clone)]
pub struct FontFace {
    pub source: String,
    pub bytes: Arc<Vec<u8>>,
}

impl FontFace {
    pub fn from_bytes(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("source", &self.source)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Strategy for finding a font file for a given style.
///
/// Implementations return `None` when they have nothing to offer so that
/// several locators can be chained with a first-match policy.
pub trait FontLocator {
    fn locate(&self, style: FontStyle) -> Option<FontFace>;
}

/// Probes a fixed list of file system paths, first readable file wins.
#[derive(Clone, Debug, Default)]
pub struct PathListLocator {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
}

const SYSTEM_REGULAR: &[&str] = &[
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/AppleGothic.ttf",
    "/System/Library/Fonts/Supplemental/AppleGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

const SYSTEM_BOLD: &[&str] = &[
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothicBold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
];

impl PathListLocator {
    /// Well-known macOS and Linux locations, Hangul-capable faces first.
    pub fn system() -> Self {
        Self {
            regular: SYSTEM_REGULAR.iter().map(PathBuf::from).collect(),
            bold: SYSTEM_BOLD.iter().map(PathBuf::from).collect(),
        }
    }

    /// A locator that offers the given files for every style, in order.
    pub fn explicit(paths: &[PathBuf]) -> Self {
        Self {
            regular: paths.to_vec(),
            bold: paths.to_vec(),
        }
    }

    fn candidates(&self, style: FontStyle) -> impl Iterator<Item = &PathBuf> {
        let (first, rest) = match style {
            FontStyle::Regular => (self.regular.as_slice(), &[][..]),
            // A regular face still beats no face at all.
            FontStyle::Bold => (self.bold.as_slice(), self.regular.as_slice()),
        };
        first.iter().chain(rest.iter())
    }
}

impl FontLocator for PathListLocator {
    fn locate(&self, style: FontStyle) -> Option<FontFace> {
        self.candidates(style).find_map(|path| read_font_file(path))
    }
}

fn read_font_file(path: &Path) -> Option<FontFace> {
    if !path.is_file() {
        return None;
    }
    match std::fs::read(path) {
        Ok(bytes) if !bytes.is_empty() => {
            Some(FontFace::from_bytes(path.display().to_string(), bytes))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
            None
        }
    }
}

/// Hands out one in-memory face for every style.
#[derive(Clone, Debug)]
pub struct MemoryFontLocator {
    pub face: FontFace,
}

impl FontLocator for MemoryFontLocator {
    fn locate(&self, _style: FontStyle) -> Option<FontFace> {
        Some(self.face.clone())
    }
}

/// First-match composition of several locators.
#[derive(Default)]
pub struct FontChain {
    locators: Vec<Box<dyn FontLocator>>,
}

impl FontChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl FontLocator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }

    /// Explicit files first, then the system list.
    pub fn with_overrides(overrides: &[PathBuf]) -> Self {
        let chain = Self::new();
        let chain = if overrides.is_empty() {
            chain
        } else {
            chain.with(PathListLocator::explicit(overrides))
        };
        chain.with(PathListLocator::system())
    }
}

impl FontLocator for FontChain {
    fn locate(&self, style: FontStyle) -> Option<FontFace> {
        self.locators.iter().find_map(|l| l.locate(style))
    }
}

/// Locate a face or fail with a [`EventkitError::Font`].
pub fn resolve_font(locator: &dyn FontLocator, style: FontStyle) -> EventkitResult<FontFace> {
    let face = locator.locate(style).ok_or_else(|| {
        EventkitError::font(format!(
            "no usable {style} font found (pass --font <path> to supply one)"
        ))
    })?;
    tracing::debug!(%style, source = %face.source, "resolved font");
    Ok(face)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
