use std::path::Path;

use anyhow::Context as _;
use pdf_writer::{Content, Filter, Finish as _, Name, Pdf, Rect, Ref};

use crate::{
    foundation::error::{EventkitError, EventkitResult},
    placard::layout::PlacardLayout,
    render::canvas::RasterFrame,
};

const DEFLATE_LEVEL: u8 = 6;
const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// Output container chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacardFormat {
    Pdf,
    Png,
}

impl PlacardFormat {
    /// `.pdf` (any case) selects PDF; everything else is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Self::Pdf,
            _ => Self::Png,
        }
    }
}

/// Wrap the rasterized page into a single-page PDF sized in points.
///
/// The raster is stored zlib-compressed (`FlateDecode`), so text edges survive
/// unchanged.
pub fn encode_pdf(frame: &RasterFrame, layout: &PlacardLayout) -> EventkitResult<Vec<u8>> {
    let rgb = frame.to_rgb8()?;
    let deflated = miniz_oxide::deflate::compress_to_vec_zlib(rgb.as_raw(), DEFLATE_LEVEL);

    let img_w = i32::try_from(frame.width)
        .map_err(|_| EventkitError::render("placard raster too wide for pdf"))?;
    let img_h = i32::try_from(frame.height)
        .map_err(|_| EventkitError::render("placard raster too tall for pdf"))?;
    let page_w = layout.width_pt as f32;
    let page_h = layout.height_pt as f32;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(IMAGE_NAME, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &deflated);
    image.filter(Filter::FlateDecode);
    image.width(img_w);
    image.height(img_h);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    // Stretch the unit-square image over the whole page.
    let mut content = Content::new();
    content.save_state();
    content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

/// Write the page as PDF or PNG depending on the extension of `path`.
#[tracing::instrument(skip(frame, layout))]
pub fn write_placard(
    frame: &RasterFrame,
    layout: &PlacardLayout,
    path: &Path,
) -> EventkitResult<PlacardFormat> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let format = PlacardFormat::from_path(path);
    match format {
        PlacardFormat::Pdf => {
            let bytes = encode_pdf(frame, layout)?;
            std::fs::write(path, bytes)
                .with_context(|| format!("write pdf '{}'", path.display()))?;
        }
        PlacardFormat::Png => frame.save_png(path)?,
    }
    tracing::info!(path = %path.display(), ?format, "wrote placard");
    Ok(format)
}

#[cfg(test)]
#[path = "../../tests/unit/placard/pdf.rs"]
mod tests;
