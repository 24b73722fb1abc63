use super::*;

#[test]
fn burnin_args_are_exact() {
    let cmd = BurnInCommand {
        video: PathBuf::from("videos/raw/talk.mp4"),
        markup: PathBuf::from("subtitles/ass/talk.ass"),
        output: PathBuf::from("videos/burnin_output/talk_burnin.mp4"),
    };
    let args: Vec<String> = cmd
        .args()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        args,
        vec![
            "-i",
            "videos/raw/talk.mp4",
            "-vf",
            "ass=subtitles/ass/talk.ass",
            "-c:a",
            "copy",
            "-y",
            "videos/burnin_output/talk_burnin.mp4",
        ]
    );

    let built = cmd.command();
    assert_eq!(built.get_program(), "ffmpeg");
    assert_eq!(built.get_args().count(), 8);
}

#[test]
fn filter_path_escaping_handles_both_levels() {
    assert_eq!(escape_filter_path(Path::new("/tmp/a.ass")), "/tmp/a.ass");
    assert_eq!(escape_filter_path(Path::new("C:/subs/a.ass")), "C\\\\:/subs/a.ass");
    assert_eq!(
        escape_filter_path(Path::new("it's,[x].ass")),
        "it\\\\\\'s\\,\\[x\\].ass"
    );
}

#[test]
fn probe_json_yields_first_stream_size() {
    let json = br#"{"programs":[],"streams":[{"width":1920,"height":1080}]}"#;
    assert_eq!(parse_probe_json(json).unwrap(), (1920, 1080));
}

#[test]
fn probe_json_without_streams_is_an_external_error() {
    let err = parse_probe_json(br#"{"programs":[],"streams":[]}"#).unwrap_err();
    assert!(matches!(err, EventkitError::External(_)));

    let err = parse_probe_json(br#"{}"#).unwrap_err();
    assert!(err.to_string().contains("no video stream"));
}

#[test]
fn probe_json_rejects_partial_or_bogus_output() {
    assert!(parse_probe_json(br#"{"streams":[{"width":1920}]}"#).is_err());
    assert!(parse_probe_json(br#"{"streams":[{"width":0,"height":0}]}"#).is_err());
    assert!(parse_probe_json(b"1920,1080").is_err());
}

#[test]
fn probe_of_missing_file_fails() {
    if !is_tool_on_path("ffprobe") {
        eprintln!("skipping: ffprobe not on PATH");
        return;
    }
    let err = probe_resolution(Path::new("target/no-such-video.mp4")).unwrap_err();
    assert!(matches!(err, EventkitError::External(_)));
}

#[test]
fn failed_encode_is_an_external_error() {
    // A missing input fails whether ffmpeg is absent (spawn error) or present
    // (non-zero exit).
    let cmd = BurnInCommand {
        video: PathBuf::from("target/unit_ffmpeg/missing/input.mp4"),
        markup: PathBuf::from("target/unit_ffmpeg/missing/input.ass"),
        output: PathBuf::from("target/unit_ffmpeg/failed/out.mp4"),
    };
    let err = cmd.run().unwrap_err();
    assert!(matches!(err, EventkitError::External(_)), "{err}");
    assert!(!cmd.output.exists());
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("out.mp4")).unwrap();
    let nested = PathBuf::from("target/unit_ffmpeg/a/b/out.mp4");
    ensure_parent_dir(&nested).unwrap();
    assert!(nested.parent().unwrap().is_dir());
}
