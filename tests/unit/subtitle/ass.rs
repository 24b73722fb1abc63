use super::*;
use crate::subtitle::{srt::parse_srt, timestamp::SrtTimestamp};

fn cue(index: u32, start: &str, end: &str, text: &str) -> Cue {
    Cue {
        index,
        start: SrtTimestamp::parse(start).unwrap(),
        end: SrtTimestamp::parse(end).unwrap(),
        text: text.to_string(),
    }
}

#[test]
fn full_hd_scales_by_four_thirds() {
    let style = AssStyle::for_resolution(1920, 1080).unwrap();
    assert!((style.scale - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(style.font_size, 37);
    assert_eq!(style.margin_v, 66);
    assert_eq!(style.outline, 16);
    assert_eq!(style.shadow, 10);
}

#[test]
fn reference_resolution_keeps_base_values() {
    let style = AssStyle::for_resolution(1440, 810).unwrap();
    assert_eq!(
        (style.font_size, style.margin_v, style.outline, style.shadow),
        (28, 50, 12, 8)
    );
}

#[test]
fn scale_uses_the_tighter_axis() {
    // Portrait video: width is the limiting axis.
    let style = AssStyle::for_resolution(1080, 1920).unwrap();
    assert!((style.scale - 0.75).abs() < 1e-12);
    assert_eq!(style.font_size, 21);
    assert_eq!(style.shadow, 6);
}

#[test]
fn zero_resolution_is_rejected() {
    assert!(AssStyle::for_resolution(0, 1080).is_err());
    assert!(generate_ass(&[], 1920, 0).is_err());
}

#[test]
fn header_declares_box_opaque_default_style() {
    let doc = generate_ass(&[], 1920, 1080).unwrap();
    assert!(doc.starts_with("[Script Info]\nTitle: BizCafe Subtitles\n"));
    assert!(doc.contains("PlayResX: 1920\nPlayResY: 1080\n"));
    assert!(doc.contains(
        "Style: Default,Noto Sans CJK KR,37,&H00FFFFFF,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,3,16,10,2,20,20,66,1\n"
    ));
    assert!(doc.ends_with(
        "[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n"
    ));
}

#[test]
fn one_dialogue_per_cue_joined_by_newlines() {
    let cues = vec![
        cue(1, "00:00:01,000", "00:00:02,345", "Hello"),
        cue(2, "00:01:02,345", "01:00:00,009", "Two\\NLines"),
    ];
    let doc = generate_ass(&cues, 1440, 810).unwrap();
    let events: Vec<&str> = doc
        .lines()
        .filter(|l| l.starts_with("Dialogue:"))
        .collect();
    assert_eq!(
        events,
        vec![
            "Dialogue: 0,0:00:01.00,0:00:02.34,Default,,0,0,0,,Hello",
            "Dialogue: 0,0:01:02.34,1:00:00.00,Default,,0,0,0,,Two\\NLines",
        ]
    );
    assert!(!doc.ends_with('\n'));
}

#[test]
fn line_breaks_survive_parse_and_serialize() {
    let doc = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nA\nB\nC\n");
    let ass = generate_ass(&doc.cues, 1440, 810).unwrap();
    let last = ass.lines().last().unwrap();
    assert_eq!(last, "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,A\\NB\\NC");
}

#[test]
fn write_ass_creates_directory_and_file() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_ass")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("talk.ass");

    let cues = vec![cue(1, "00:00:00,000", "00:00:01,000", "Hi")];
    let style = write_ass(&cues, 1920, 1080, &path).unwrap();
    assert_eq!(style.font_size, 37);

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.ends_with("Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,Hi"));
}
