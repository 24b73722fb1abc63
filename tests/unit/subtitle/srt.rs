use super::*;

const THREE_CUES: &str = "1
00:00:01,000 --> 00:00:02,500
Hello

2
00:00:03,000 --> 00:00:04,010
First line
Second line

3
00:01:02,345 --> 00:01:03,999
Bye
";

#[test]
fn well_formed_blocks_become_cues_in_order() {
    let doc = parse_srt(THREE_CUES);
    assert_eq!(doc.cues.len(), 3);
    assert_eq!(doc.skipped_blocks, 0);

    let indices: Vec<u32> = doc.cues.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    let first = &doc.cues[0];
    assert_eq!(first.start, SrtTimestamp::new(0, 0, 1, 0).unwrap());
    assert_eq!(first.end, SrtTimestamp::new(0, 0, 2, 500).unwrap());
    assert_eq!(first.text, "Hello");
    assert_eq!(doc.cues[2].start.to_ass(), "0:01:02.34");
}

#[test]
fn embedded_newlines_become_line_break_markers() {
    let doc = parse_srt(THREE_CUES);
    let text = &doc.cues[1].text;
    assert_eq!(text, "First line\\NSecond line");
    assert!(!text.contains('\n'));
}

#[test]
fn block_without_timing_line_is_skipped_silently() {
    let src = "1
00:00:01,000 --> 00:00:02,000
Hello

2
Missing timing

3
00:00:05,000 --> 00:00:06,000
World";
    let doc = parse_srt(src);
    let texts: Vec<&str> = doc.cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "World"]);
    assert_eq!(doc.skipped_blocks, 1);
}

#[test]
fn crlf_input_parses_like_lf() {
    let doc = parse_srt(&THREE_CUES.replace('\n', "\r\n"));
    assert_eq!(doc.cues.len(), 3);
    assert_eq!(doc.cues[1].text, "First line\\NSecond line");
}

#[test]
fn blocks_separated_only_by_next_index_are_split() {
    let src = "1
00:00:01,000 --> 00:00:02,000
Hello
2
00:00:03,000 --> 00:00:04,000
World
";
    let doc = parse_srt(src);
    assert_eq!(doc.cues.len(), 2);
    assert_eq!(doc.cues[0].text, "Hello");
    assert_eq!(doc.cues[1].text, "World");
}

#[test]
fn digits_only_text_line_ends_the_cue() {
    let src = "1
00:00:01,000 --> 00:00:02,000
The year was
2024
";
    let doc = parse_srt(src);
    assert_eq!(doc.cues.len(), 1);
    assert_eq!(doc.cues[0].text, "The year was");
}

#[test]
fn leading_byte_order_mark_does_not_hide_first_cue() {
    let doc = parse_srt(&format!("\u{feff}{THREE_CUES}"));
    assert_eq!(doc.cues.len(), 3);
    assert_eq!(doc.cues[0].index, 1);
}

#[test]
fn out_of_range_timestamp_drops_only_that_cue() {
    let src = "1
00:99:01,000 --> 00:00:02,000
Broken

2
00:00:03,000 --> 00:00:04,000
Fine
";
    let doc = parse_srt(src);
    assert_eq!(doc.cues.len(), 1);
    assert_eq!(doc.cues[0].text, "Fine");
    assert_eq!(doc.dropped_cues, 1);
    assert_eq!(doc.skipped_blocks, 0);
}

#[test]
fn shape_valid_cues_with_unusable_fields_are_counted() {
    let src = "1
00:99:01,000 --> 00:99:02,000
Minutes overflow

2
00:00:03,000 --> 00:00:04,000
Fine

99999999999
00:00:05,000 --> 00:00:06,000
Index overflow
";
    let doc = parse_srt(src);
    let texts: Vec<&str> = doc.cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Fine"]);
    assert_eq!(doc.dropped_cues, 2);
    assert_eq!(doc.skipped_blocks, 0);
}

#[test]
fn lone_carriage_returns_parse_like_lf() {
    let doc = parse_srt(&THREE_CUES.replace('\n', "\r"));
    assert_eq!(doc.cues.len(), 3);
    assert_eq!(doc.skipped_blocks, 0);
    assert_eq!(doc.cues[1].text, "First line\\NSecond line");
}

#[test]
fn empty_and_garbage_input_yield_no_cues() {
    assert_eq!(parse_srt(""), SrtDocument::default());
    let doc = parse_srt("not a subtitle file\n\nstill not");
    assert!(doc.cues.is_empty());
    assert_eq!(doc.skipped_blocks, 2);
}

#[test]
fn read_srt_reports_missing_file() {
    let err = read_srt(Path::new("target/no-such-dir/missing.srt")).unwrap_err();
    assert!(err.to_string().contains("missing.srt"));
}
