use std::path::PathBuf;

use super::*;
use crate::{foundation::core::Rgba8, render::canvas::Canvas};

fn small_frame() -> RasterFrame {
    let mut canvas = Canvas::new(31, 44, Rgba8::WHITE).unwrap();
    canvas.hline(2.0, 29.0, 22.0, 2.0, Rgba8::gray(0.7));
    canvas.finish()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn format_follows_extension() {
    assert_eq!(PlacardFormat::from_path(Path::new("a/seats.pdf")), PlacardFormat::Pdf);
    assert_eq!(PlacardFormat::from_path(Path::new("SEATS.PDF")), PlacardFormat::Pdf);
    assert_eq!(PlacardFormat::from_path(Path::new("seats.png")), PlacardFormat::Png);
    assert_eq!(PlacardFormat::from_path(Path::new("seats")), PlacardFormat::Png);
}

#[test]
fn pdf_embeds_a_lossless_page_image() {
    let frame = small_frame();
    let bytes = encode_pdf(&frame, &PlacardLayout::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/MediaBox"));
    assert!(contains(&bytes, b"/FlateDecode"));
    assert!(!contains(&bytes, b"/DCTDecode"));
    assert!(contains(&bytes, b"/Im1"));
    assert!(contains(&bytes, b"/Width 31"));
    assert!(contains(&bytes, b"/Height 44"));

    // The image stream inflates back to the exact RGB pixels.
    let rgb = frame.to_rgb8().unwrap();
    let deflated = miniz_oxide::deflate::compress_to_vec_zlib(rgb.as_raw(), DEFLATE_LEVEL);
    assert!(contains(&bytes, &deflated));
    let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(&deflated).unwrap();
    assert_eq!(inflated, rgb.into_raw());
}

#[test]
fn write_placard_picks_the_container() {
    let dir = PathBuf::from("target").join("placard_write_unit");
    let _ = std::fs::remove_dir_all(&dir);
    let frame = small_frame();
    let layout = PlacardLayout::default();

    let pdf = dir.join("nested").join("seats.pdf");
    assert_eq!(write_placard(&frame, &layout, &pdf).unwrap(), PlacardFormat::Pdf);
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-"));

    let png = dir.join("seats.png");
    assert_eq!(write_placard(&frame, &layout, &png).unwrap(), PlacardFormat::Png);
    let decoded = image::open(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (31, 44));
}
