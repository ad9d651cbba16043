// Tests for console progress and logging options.

use async_trait::async_trait;
use novelwriter::{
    IDEA_STEPS, LogLevel, LogOptions, MemoryDocumentSink, NovelwriterConfig, NovelwriterResult,
    ProgressReporter, Stage, StageController, StageObserver, TextGenerator, genre_request,
    idea_step, model_stages, open_log_file,
};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;

const CONFIG: &str = r#"
[provider]
primary_key_env = "NOVELWRITER_TEST_UNSET_FREE_KEY"
secondary_key_env = "NOVELWRITER_TEST_UNSET_PAID_KEY"

[workflow]
pitch_count = 1

[[genres]]
name = "Horror"
subgenres = ["Folk Horror"]
"#;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Replies(Mutex<Vec<&'static str>>);

#[async_trait]
impl TextGenerator for Replies {
    async fn complete(&self, _prompt: &str) -> NovelwriterResult<String> {
        let mut replies = self.0.lock().unwrap();
        Ok(if replies.is_empty() {
            String::new()
        } else {
            replies.remove(0).to_string()
        })
    }
}

fn config() -> anyhow::Result<(tempfile::TempDir, NovelwriterConfig)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("novelwriter.toml");
    std::fs::write(&path, CONFIG)?;
    let config = NovelwriterConfig::from_file(&path)?;
    Ok((dir, config))
}

#[test]
fn test_idea_steps_cover_every_working_stage() {
    assert_eq!(idea_step(Stage::GenreSelection), Some((1, "Selecting genre and tone")));
    assert_eq!(idea_step(Stage::Documentation), Some((7, "Compiling final document")));
    assert_eq!(idea_step(Stage::Initial), None);
    assert_eq!(idea_step(Stage::Completed), None);
    assert_eq!(IDEA_STEPS.len(), 7);
}

#[test]
fn test_failure_line_names_the_step() {
    let buffer = SharedBuffer::default();
    let reporter = ProgressReporter::new(buffer.clone());

    reporter.on_stage_started(Stage::TropeAnalysis);
    reporter.on_stage_completed(Stage::TropeAnalysis);
    reporter.on_stage_failed(Stage::Documentation, "disk full");

    assert_eq!(
        buffer.lines(),
        [
            "[6/7] Analyzing story tropes...",
            "Error: Compiling final document failed: disk full",
        ]
    );
}

#[tokio::test]
async fn test_progress_follows_a_full_run() -> anyhow::Result<()> {
    let (_dir, config) = config()?;
    let generator = Arc::new(Replies(Mutex::new(vec![
        "# Pitch 1\n## Title\nThe Hollow Field\n## Hook\nThe scarecrows vote.\n## Premise\nA village elects its harvest.\n## Main Conflict\nThe votes are rigged.\n## Unique Twist\nThe narrator is the crop.",
        "## Scores\n- Originality: 9/10\n- Overall Score: 9/10\n## Key Strengths\n- Dread",
        "## Winner\nThe Hollow Field\n## Selection Criteria\n- Only candidate",
        "## Identified Tropes\n1. Creepy Village: Everyone knows | Overuse Level: High\n## Summary\nKeep it quiet.",
    ])));
    let stages = model_stages(generator, &config, Arc::new(MemoryDocumentSink::new()))?;
    let buffer = SharedBuffer::default();
    let mut controller = StageController::new(stages, tracing::Span::none())
        .with_observer(Arc::new(ProgressReporter::new(buffer.clone())));

    let request = genre_request(
        Some("folk horror".to_string()),
        Some("dread".to_string()),
        Some("harvest".to_string()),
    );
    controller.run(request).await?;

    let expected: Vec<String> = IDEA_STEPS
        .iter()
        .enumerate()
        .map(|(index, (_, label))| format!("[{}/7] {}...", index + 1, label))
        .collect();
    assert_eq!(buffer.lines(), expected);
    Ok(())
}

#[test]
fn test_superdebug_is_the_most_verbose_level() {
    assert_eq!(LogLevel::Superdebug.directive(), "trace");
    assert_eq!(LogLevel::Debug.directive(), "debug");
    assert_eq!(LogLevel::default(), LogLevel::Info);
}

#[test]
fn test_console_keeps_warnings_unless_asked() {
    let quiet = LogOptions::default();
    assert_eq!(quiet.console_level(), LevelFilter::WARN);

    let detailed = LogOptions {
        console: true,
        ..LogOptions::default()
    };
    assert_eq!(detailed.console_level(), LevelFilter::TRACE);
}

#[test]
fn test_log_file_parents_are_created() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("logs").join("nested").join("novelwriter.log");

    let mut file = open_log_file(&path)?;
    writeln!(file, "first")?;
    drop(file);
    let mut file = open_log_file(&path)?;
    writeln!(file, "second")?;
    drop(file);

    assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");
    Ok(())
}
