use super::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

/// Replies keyed by program name; records every invocation.
#[derive(Default)]
struct FakeRunner {
    replies: HashMap<&'static str, CommandOutput>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    fn reply(mut self, program: &'static str, status: i32, stdout: &str) -> Self {
        self.replies.insert(
            program,
            CommandOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: if status == 0 { String::new() } else { "boom\n".to_string() },
            },
        );
        self
    }

    fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c[0].clone()).collect()
    }
}

impl CommandRunner for &FakeRunner {
    fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        self.replies
            .get(args[0].as_str())
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such program"))
    }
}

fn classifier(runner: &FakeRunner) -> Classifier<&FakeRunner> {
    Classifier::new(runner, ClassifierSettings::default())
}

#[test]
fn mime_parse_accepts_exactly_type_and_subtype() {
    let m = MimeType::parse("video/x-matroska").unwrap();
    assert_eq!(m.kind, "video");
    assert_eq!(m.subtype, "x-matroska");
    assert_eq!(m.to_string(), "video/x-matroska");

    assert!(MimeType::parse("").is_none());
    assert!(MimeType::parse("video").is_none());
    assert!(MimeType::parse("a/b/c").is_none());
    assert!(MimeType::parse("video/mp4\naudio/mpeg").is_none());
    assert!(MimeType::parse("/mp4").is_none());
    assert!(MimeType::parse("video/").is_none());
}

#[test]
fn mime_maps_to_media_type() {
    let kind = |s: &str| MimeType::parse(s).unwrap().media_type();
    assert_eq!(kind("audio/flac"), MediaType::Audio);
    assert_eq!(kind("video/mp4"), MediaType::Video);
    assert_eq!(kind("text/plain"), MediaType::Other);
    assert_eq!(kind("application/octet-stream"), MediaType::Other);
    assert!(MediaType::Audio.is_playable());
    assert!(MediaType::Video.is_playable());
    assert!(!MediaType::Other.is_playable());
}

#[test]
fn fast_path_extension_never_queries_registry() {
    let runner = FakeRunner::default()
        .reply("file", 0, "video/mp2t\n")
        .reply("xdg-mime", 0, "text/vnd.qt.linguist\n");
    let c = classifier(&runner);

    assert_eq!(c.classify("/media/clip.ts").unwrap(), MediaType::Video);
    assert_eq!(runner.programs(), vec!["file"]);
    assert_eq!(
        runner.calls.borrow()[0],
        vec!["file", "-Lb", "--mime-type", "/media/clip.ts"]
    );
}

#[test]
fn fast_path_match_is_case_sensitive() {
    let runner = FakeRunner::default()
        .reply("file", 0, "text/plain\n")
        .reply("xdg-mime", 0, "video/mp2t\n");
    let c = classifier(&runner);

    assert!(c.uses_fast_path("/a/notes.TXT"));
    assert!(c.uses_fast_path("/a/notes.txt"));
    assert!(!c.uses_fast_path("/a/clip.TS"));
    assert!(!c.uses_fast_path("/a/.ts"));

    assert_eq!(c.classify("/a/clip.TS").unwrap(), MediaType::Video);
    assert_eq!(runner.programs(), vec!["xdg-mime"]);
}

#[test]
fn other_extensions_ask_registry_first() {
    let runner = FakeRunner::default()
        .reply("file", 0, "application/octet-stream\n")
        .reply("xdg-mime", 0, "audio/mpeg\n");
    let c = classifier(&runner);

    assert_eq!(c.classify("/music/song.mp3").unwrap(), MediaType::Audio);
    assert_eq!(runner.programs(), vec!["xdg-mime"]);
    assert_eq!(
        runner.calls.borrow()[0],
        vec!["xdg-mime", "query", "filetype", "/music/song.mp3"]
    );
}

#[test]
fn malformed_registry_answer_falls_back_to_sniffer_once() {
    let runner = FakeRunner::default()
        .reply("file", 0, "video/x-matroska\n")
        .reply("xdg-mime", 0, "\n");
    let c = classifier(&runner);

    assert_eq!(c.classify("/show/ep1.mkv").unwrap(), MediaType::Video);
    assert_eq!(runner.programs(), vec!["xdg-mime", "file"]);
}

#[test]
fn failed_fallback_reports_sniffer_output_and_args() {
    let runner = FakeRunner::default()
        .reply("file", 0, "garbage\n")
        .reply("xdg-mime", 0, "a/b/c\n");
    let c = classifier(&runner);

    match c.classify("/show/ep1.mkv") {
        Err(ClassifyError::ClassificationFailure { output, args }) => {
            assert_eq!(output, "garbage");
            assert_eq!(args, vec!["file", "-Lb", "--mime-type", "/show/ep1.mkv"]);
        }
        other => panic!("expected classification failure, got {other:?}"),
    }
    assert_eq!(runner.programs(), vec!["xdg-mime", "file"]);
}

#[test]
fn malformed_fast_path_answer_fails_without_fallback() {
    let runner = FakeRunner::default()
        .reply("file", 0, "")
        .reply("xdg-mime", 0, "video/mp2t\n");
    let c = classifier(&runner);

    let err = c.classify("/a/clip.ts").unwrap_err();
    assert!(matches!(err, ClassifyError::ClassificationFailure { .. }));
    assert_eq!(runner.programs(), vec!["file"]);
}

#[test]
fn nonzero_exit_is_a_process_failure_not_other() {
    let runner = FakeRunner::default()
        .reply("file", 0, "video/mp4\n")
        .reply("xdg-mime", 4, "");
    let c = classifier(&runner);

    let err = c.classify("/a/movie.mp4").unwrap_err();
    match &err {
        ClassifyError::ProcessFailure { stderr, args, status } => {
            assert_eq!(stderr, "boom\n");
            assert_eq!(args[0], "xdg-mime");
            assert_eq!(*status, Some(4));
        }
        other => panic!("expected process failure, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "boom\ncommand [\"xdg-mime\", \"query\", \"filetype\", \"/a/movie.mp4\"] returned non-zero exit status 4"
    );
    // A failed process is not retried with the sniffer.
    assert_eq!(runner.programs(), vec!["xdg-mime"]);
}

#[test]
fn missing_tool_is_a_spawn_error() {
    let runner = FakeRunner::default();
    let c = classifier(&runner);

    let err = c.classify("/a/movie.mp4").unwrap_err();
    assert!(matches!(err, ClassifyError::Spawn { .. }));
}

#[test]
fn configured_commands_are_used() {
    let runner = FakeRunner::default().reply("mimetype", 0, "audio/ogg\n");
    let settings = ClassifierSettings {
        registry_command: vec!["mimetype".into(), "-b".into()],
        ..ClassifierSettings::default()
    };
    let c = Classifier::new(&runner, settings);

    assert_eq!(c.classify("/a/b.ogg").unwrap(), MediaType::Audio);
    assert_eq!(runner.calls.borrow()[0], vec!["mimetype", "-b", "/a/b.ogg"]);
}

#[test]
fn system_runner_rejects_empty_command() {
    assert!(SystemRunner.run(&[]).is_err());
}
