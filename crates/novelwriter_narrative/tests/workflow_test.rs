// Tests for the stage controller, with fakes and with scripted model replies.

mod test_utils;

use novelwriter_core::{GenreRequest, MISSING, OverallSource, Stage, WinnerFallback};
use novelwriter_error::{NovelwriterError, NovelwriterErrorKind, ParseErrorKind, ProviderErrorKind};
use novelwriter_interface::{StageObserver, TextGenerator};
use novelwriter_narrative::{
    MemoryDocumentSink, PitchCritic, PitchGenerator, PitchImprover, PitchVoter, StageController,
    StageSet, TropeAnalyst, VibeGenerator,
};
use novelwriter_rate_limit::GenreEntry;
use std::sync::{Arc, Mutex};
use test_utils::{CountingImprover, ScriptedGenerator, fake_stages, pitch};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl StageObserver for Recorder {
    fn on_stage_completed(&self, stage: Stage) {
        self.events.lock().unwrap().push(format!("done {}", stage));
    }

    fn on_stage_failed(&self, stage: Stage, _message: &str) {
        self.events.lock().unwrap().push(format!("failed {}", stage));
    }
}

fn controller(stages: StageSet) -> StageController {
    StageController::new(stages, tracing::info_span!("test_run"))
}

#[tokio::test]
async fn test_threshold_is_strict() -> anyhow::Result<()> {
    let improver = Arc::new(CountingImprover::default());
    let sink = MemoryDocumentSink::new();
    let stages = fake_stages(
        Some(vec![pitch("At Threshold"), pitch("Just Under")]),
        vec![7.5, 7.49],
        "At Threshold",
        improver.clone(),
        sink.clone(),
    );
    let mut controller = controller(stages);

    controller.run(GenreRequest::default()).await?;

    let state = controller.state();
    assert_eq!(*improver.calls.lock().unwrap(), 1);
    assert_eq!(state.improved_pitches()[0].title, "At Threshold");
    assert_eq!(state.improved_pitches()[1].title, "Improved Just Under");
    assert_eq!(*state.stage(), Stage::Completed);
    Ok(())
}

#[tokio::test]
async fn test_unmatched_winner_uses_first_candidate() -> anyhow::Result<()> {
    let sink = MemoryDocumentSink::new();
    let stages = fake_stages(
        Some(vec![pitch("Salt"), pitch("Iron")]),
        vec![9.0, 9.5],
        "A Title Nobody Wrote",
        Arc::new(CountingImprover::default()),
        sink.clone(),
    );
    let mut controller = controller(stages);

    let location = controller.run(GenreRequest::default()).await?;

    let state = controller.state();
    let selection = state.selection().as_ref().unwrap();
    assert_eq!(state.selected_pitch().as_ref().unwrap().title, "Salt");
    assert_eq!(selection.fallback, Some(WinnerFallback::FirstCandidate));
    assert_eq!(selection.winner, "Salt");
    assert_eq!(location, "memory://ideas/1");
    assert_eq!(sink.documents().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_stage_failure_moves_to_error() {
    let recorder = Arc::new(Recorder::default());
    let stages = fake_stages(
        None,
        vec![],
        "unused",
        Arc::new(CountingImprover::default()),
        MemoryDocumentSink::new(),
    );
    let mut controller = controller(stages).with_observer(recorder.clone());

    let err = controller.run(GenreRequest::default()).await.unwrap_err();

    match err.kind() {
        NovelwriterErrorKind::Stage(e) => {
            assert_eq!(e.stage, "PITCH_GENERATION");
            match e.source.kind() {
                NovelwriterErrorKind::Provider(p) => {
                    assert_eq!(p.kind, ProviderErrorKind::RateLimit("quota exceeded".to_string()));
                }
                other => panic!("unexpected source: {}", other),
            }
        }
        other => panic!("unexpected error: {}", other),
    }

    let state = controller.state();
    assert_eq!(*state.stage(), Stage::Error);
    assert!(state.error().as_deref().unwrap().contains("quota exceeded"));
    assert_eq!(
        *recorder.events.lock().unwrap(),
        ["done GENRE_SELECTION", "failed PITCH_GENERATION"]
    );

    // No resume from ERROR.
    let again = controller.generate_pitches().await.unwrap_err();
    assert!(again.to_string().contains("terminal"));
    assert_eq!(*controller.state().stage(), Stage::Error);
}

#[tokio::test]
async fn test_evaluation_count_mismatch_fails_run() {
    let stages = fake_stages(
        Some(vec![pitch("Salt"), pitch("Iron")]),
        vec![8.0],
        "Salt",
        Arc::new(CountingImprover::default()),
        MemoryDocumentSink::new(),
    );
    let mut controller = controller(stages);

    let err = controller.run(GenreRequest::default()).await.unwrap_err();

    assert!(err.to_string().contains("Expected 2 evaluations, got 1"));
    assert_eq!(*controller.state().stage(), Stage::Error);
}

#[tokio::test]
async fn test_out_of_order_call_leaves_state_untouched() -> anyhow::Result<()> {
    let stages = fake_stages(
        Some(vec![pitch("Salt")]),
        vec![8.0],
        "Salt",
        Arc::new(CountingImprover::default()),
        MemoryDocumentSink::new(),
    );
    let mut controller = controller(stages);

    let err = controller.evaluate_pitches().await.unwrap_err();
    assert!(err.to_string().contains("cannot run from stage INITIAL"));
    assert_eq!(*controller.state().stage(), Stage::Initial);
    assert!(controller.state().error().is_none());

    controller.select_genre(&GenreRequest::default()).await?;
    controller.generate_pitches().await?;
    assert_eq!(*controller.state().stage(), Stage::PitchGeneration);
    assert_eq!(controller.state().pitches().len(), 1);
    Ok(())
}

const PITCHES: &str = "\
# Pitch 1
## Title
Salt and Iron
## Hook
A smuggler owes the tide a life.
## Premise
In a drowned city, debts are paid in memories.
## Main Conflict
Betray her crew or lose her daughter.
## Unique Twist
The sea is her mother.

# Pitch 2
## Title
The Lantern Court
## Hook
Every streetlight is a sworn witness.
## Premise
A night clerk hears the lamps testify.
## Main Conflict
The lamps accuse the mayor.

# Pitch 3
## Title
Glass Saints
## Hook
Relics that remember their martyrs.
## Premise
A forger of relics finds one real.
## Main Conflict
The church wants it destroyed.
## Unique Twist
The saint is still alive inside it.";

const CRITIC_STRONG: &str = "\
# Evaluation
## Scores
- Originality: 8/10
- Emotional Impact: 8/10
- Overall Score: 8/10
## Key Strengths
- Vivid world
## Areas for Improvement
- Pacing";

const CRITIC_WEAK: &str = "\
# Evaluation
## Scores
- Originality: 7/10
- Emotional Impact: 7/10
- Genre Fit: 6/10
- Theme Integration: 7/10
- Commercial Potential: 7/10
## Key Strengths
- Striking image
## Areas for Improvement
- No twist";

const CRITIC_BEST: &str = "\
# Evaluation
## Scores
- Originality: 9/10
- Overall Score: 9/10
## Key Strengths
- Fresh premise";

const IMPROVED: &str = "\
# Improved Pitch
## Title
The Lantern Court
## Hook
Every streetlight is a sworn witness, and one is lying.
## Premise
A night clerk hears the lamps testify.
## Main Conflict
The lamps accuse the mayor.
## Unique Twist
The lying lamp is the clerk's late father.";

const SELECTION: &str = "\
# Selection
## Winner
Glass Saints
## Selection Criteria
- Most original premise
## Development Recommendations
- Give the saint a voice
## Potential Challenges
- Religious sensitivity";

const TROPES: &str = "\
# Trope Analysis
## Identified Tropes
1. Chosen One: Only the forger can hear the relic | Overuse Level: High
## Suggested Alternatives
### For Chosen One
- Accidental Witness: Anyone could hear it
## Summary
Make the gift common and the choice rare.";

const UNUSABLE: &str = "Error: upstream provider returned an error, please retry later.";

fn scripted_stages(
    generator: &ScriptedGenerator,
    sink: &MemoryDocumentSink,
) -> anyhow::Result<StageSet> {
    let shared: Arc<dyn TextGenerator> = Arc::new(generator.clone());
    let catalog = vec![GenreEntry {
        name: "Fantasy".to_string(),
        subgenres: vec!["Urban Fantasy".to_string()],
    }];
    Ok(StageSet {
        genre: Arc::new(VibeGenerator::with_seed(shared.clone(), catalog, 11)),
        pitch: Arc::new(PitchGenerator::new(shared.clone(), 3)?),
        critic: Arc::new(PitchCritic::new(shared.clone())?),
        improver: Arc::new(PitchImprover::new(shared.clone())?),
        voter: Arc::new(PitchVoter::new(shared.clone())),
        tropes: Arc::new(TropeAnalyst::new(shared)?),
        sink: Arc::new(sink.clone()),
    })
}

fn grim_request() -> GenreRequest {
    GenreRequest::default()
        .with_tone("grim")
        .with_themes(vec!["betrayal".to_string(), "hope".to_string()])
}

fn assert_no_records(err: &NovelwriterError, stage: &str, expected: &str) {
    match err.kind() {
        NovelwriterErrorKind::Stage(e) => {
            assert_eq!(e.stage, stage);
            match e.source.kind() {
                NovelwriterErrorKind::Parse(p) => assert_eq!(
                    p.kind,
                    ParseErrorKind::NoRecords {
                        stage: expected.to_string()
                    }
                ),
                other => panic!("unexpected source: {}", other),
            }
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_unusable_critic_reply_fails_run() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new([PITCHES, UNUSABLE, UNUSABLE, UNUSABLE]);
    let sink = MemoryDocumentSink::new();
    let mut controller = controller(scripted_stages(&generator, &sink)?);

    let err = controller.run(grim_request()).await.unwrap_err();

    assert_no_records(&err, "CRITIC_EVALUATION", "critic");
    let state = controller.state();
    assert_eq!(*state.stage(), Stage::Error);
    assert!(state.evaluations().is_empty());
    assert!(state.error().as_deref().unwrap().contains("critic"));
    assert!(sink.documents().is_empty());
    // The critic stops at the first unusable reply.
    assert_eq!(generator.prompts().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_unusable_voter_reply_fails_run() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new([
        PITCHES,
        CRITIC_STRONG,
        CRITIC_WEAK,
        CRITIC_BEST,
        IMPROVED,
        UNUSABLE,
    ]);
    let sink = MemoryDocumentSink::new();
    let mut controller = controller(scripted_stages(&generator, &sink)?);

    let err = controller.run(grim_request()).await.unwrap_err();

    assert_no_records(&err, "PITCH_SELECTION", "voter");
    assert_eq!(*controller.state().stage(), Stage::Error);
    assert!(controller.state().selected_pitch().is_none());
    assert!(sink.documents().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unusable_trope_reply_fails_run() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new([
        PITCHES,
        CRITIC_STRONG,
        CRITIC_WEAK,
        CRITIC_BEST,
        IMPROVED,
        SELECTION,
        UNUSABLE,
    ]);
    let sink = MemoryDocumentSink::new();
    let mut controller = controller(scripted_stages(&generator, &sink)?);

    let err = controller.run(grim_request()).await.unwrap_err();

    assert_no_records(&err, "TROPE_ANALYSIS", "tropes");
    let state = controller.state();
    assert_eq!(*state.stage(), Stage::Error);
    assert_eq!(state.selected_pitch().as_ref().unwrap().title, "Glass Saints");
    assert!(state.trope_analysis().is_none());
    assert!(sink.documents().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_scripted_replies() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new([
        PITCHES,
        CRITIC_STRONG,
        CRITIC_WEAK,
        CRITIC_BEST,
        IMPROVED,
        SELECTION,
        TROPES,
    ]);
    let sink = MemoryDocumentSink::new();
    let mut controller = controller(scripted_stages(&generator, &sink)?);

    controller.run(grim_request()).await?;

    let state = controller.state();
    assert_eq!(*state.stage(), Stage::Completed);
    assert_eq!(state.tone(), Some("grim"));
    assert_eq!(state.themes(), ["betrayal", "hope"]);

    assert_eq!(state.pitches().len(), 3);
    assert_eq!(state.pitches()[1].unique_twist, MISSING);

    let weak = &state.evaluations()[1];
    assert_eq!(weak.overall_source, OverallSource::Mean);
    assert!((weak.overall_score - 6.8).abs() < 1e-9);

    assert_eq!(
        state.improved_pitches()[1].unique_twist,
        "The lying lamp is the clerk's late father."
    );
    assert_eq!(state.improved_pitches()[0], state.pitches()[0]);

    assert_eq!(state.selected_pitch().as_ref().unwrap().title, "Glass Saints");
    assert_eq!(state.trope_analysis().as_ref().unwrap().tropes.len(), 1);
    assert_eq!(state.output_location().as_deref(), Some("memory://ideas/1"));

    // One pitch call, three critic calls, one improvement, one vote, one trope call.
    assert_eq!(generator.prompts().len(), 7);
    assert_eq!(generator.remaining(), 0);

    let documents = sink.documents();
    assert_eq!(documents[0].brief.subgenre(), "Urban Fantasy");
    assert_eq!(documents[0].selection.fallback, None);
    Ok(())
}
