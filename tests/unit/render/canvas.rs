use super::*;

const BLUE: Rgba8 = Rgba8::rgb(0, 120, 255);

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn rejects_degenerate_and_oversized_canvases() {
    assert!(Canvas::new(0, 10, BLUE).is_err());
    assert!(Canvas::new(10, 0, BLUE).is_err());
    assert!(Canvas::new(70_000, 10, BLUE).is_err());
}

#[test]
fn new_canvas_is_filled_with_background() {
    let frame = Canvas::new(16, 8, BLUE).unwrap().finish();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert!(close(frame.pixel(0, 0).unwrap(), [0, 120, 255, 255]));
    assert!(close(frame.pixel(15, 7).unwrap(), [0, 120, 255, 255]));
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn opaque_rect_replaces_pixels_inside_only() {
    let mut canvas = Canvas::new(20, 20, BLUE).unwrap();
    canvas.fill_rect(Rect::new(5.0, 5.0, 10.0, 10.0), Rgba8::WHITE);
    let frame = canvas.finish();
    assert!(close(frame.pixel(7, 7).unwrap(), [255, 255, 255, 255]));
    assert!(close(frame.pixel(2, 2).unwrap(), [0, 120, 255, 255]));
    assert!(close(frame.pixel(12, 12).unwrap(), [0, 120, 255, 255]));
}

#[test]
fn translucent_ellipse_lightens_background() {
    let mut canvas = Canvas::new(40, 40, BLUE).unwrap();
    canvas.fill_ellipse(
        Rect::new(0.0, 0.0, 40.0, 40.0),
        Rgba8::rgba(255, 255, 255, 13),
    );
    let frame = canvas.finish();
    let center = frame.pixel(20, 20).unwrap();
    assert!(center[0] > 5 && center[0] < 30);
    assert_eq!(center[3], 255);
    // Corners are outside the inscribed ellipse.
    assert!(close(frame.pixel(0, 0).unwrap(), [0, 120, 255, 255]));
}

#[test]
fn dashed_rule_leaves_gaps() {
    let mut canvas = Canvas::new(30, 10, Rgba8::WHITE).unwrap();
    canvas.dashed_hline(0.0, 30.0, 5.0, 2.0, (4.0, 4.0), Rgba8::BLACK);
    let frame = canvas.finish();
    assert!(close(frame.pixel(1, 4).unwrap(), [0, 0, 0, 255]));
    assert!(close(frame.pixel(5, 4).unwrap(), [255, 255, 255, 255]));
    assert!(close(frame.pixel(9, 4).unwrap(), [0, 0, 0, 255]));
    assert!(close(frame.pixel(1, 0).unwrap(), [255, 255, 255, 255]));
}

#[test]
fn draw_image_places_pixels_at_origin() {
    let img = RgbaImage::from_pixel(6, 6, image::Rgba([255, 0, 0, 255]));
    let mut canvas = Canvas::new(20, 20, Rgba8::WHITE).unwrap();
    canvas.draw_image(&img, Point::new(10.0, 10.0)).unwrap();
    let frame = canvas.finish();
    assert!(close(frame.pixel(13, 13).unwrap(), [255, 0, 0, 255]));
    assert!(close(frame.pixel(5, 5).unwrap(), [255, 255, 255, 255]));
}

#[test]
fn transparent_image_pixels_keep_background() {
    let img = RgbaImage::from_pixel(6, 6, image::Rgba([255, 0, 0, 0]));
    let mut canvas = Canvas::new(10, 10, BLUE).unwrap();
    canvas.draw_image(&img, Point::new(2.0, 2.0)).unwrap();
    let frame = canvas.finish();
    assert!(close(frame.pixel(4, 4).unwrap(), [0, 120, 255, 255]));
}

#[test]
fn rgb_flatten_drops_alpha() {
    let frame = RasterFrame {
        width: 1,
        height: 1,
        background: Rgba8::BLACK,
        data: vec![128, 0, 0, 128],
    };
    let rgb = frame.to_rgb8().unwrap();
    assert_eq!(rgb.get_pixel(0, 0).0, [128, 0, 0]);
}
