// Tests for the tolerant reply parsers.

use novelwriter_core::{MISSING, OverallSource, OveruseLevel, PitchRecord};
use novelwriter_narrative::{
    EvaluationParser, FieldSpec, Grammar, PitchParser, SelectionParser, TropeParser, parse, render,
};

const THREE_PITCHES: &str = "\
# Pitch 1
## Title
Salt and Iron
## Hook
A smuggler owes the tide a life.
## Premise
In a drowned city, debts are paid in memories.
The harbor keeps count.
## Main Conflict
The smuggler must betray her crew or the sea takes her daughter.
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
The saint is still alive inside it.
";

#[test]
fn test_pitch_blocks_parse_with_sentinels() {
    let pitches = PitchParser::new().unwrap().parse(THREE_PITCHES);

    assert_eq!(pitches.len(), 3);
    assert_eq!(
        pitches[0].premise,
        "In a drowned city, debts are paid in memories. The harbor keeps count."
    );
    assert_eq!(pitches[1].unique_twist, MISSING);
    assert_eq!(pitches[1].missing_count(), 1);
    assert_eq!(pitches[2].title, "Glass Saints");
}

#[test]
fn test_every_declared_field_present() {
    let pitches = PitchParser::new().unwrap().parse("# Pitch 1\n## Title\nOnly a title");

    assert_eq!(pitches.len(), 1);
    let pitch = &pitches[0];
    assert_eq!(pitch.title, "Only a title");
    for value in [&pitch.hook, &pitch.premise, &pitch.main_conflict, &pitch.unique_twist] {
        assert_eq!(value, MISSING);
    }
}

#[test]
fn test_validity_gate_drops_at_four_missing() {
    let parser = PitchParser::new().unwrap();
    let reply = "\
# Pitch 1
## Title
Kept
## Hook
Two fields present

# Pitch 2
## Title
Dropped
";
    let pitches = parser.parse(reply);

    assert_eq!(pitches.len(), 1);
    assert_eq!(pitches[0].title, "Kept");
    assert_eq!(pitches[0].missing_count(), 3);
}

#[test]
fn test_pitch_markdown_reparses_identically() {
    let parser = PitchParser::new().unwrap();
    let pitches = parser.parse(THREE_PITCHES);

    let rendered: String = pitches
        .iter()
        .enumerate()
        .map(|(i, pitch)| pitch.to_markdown(&format!("Pitch {}", i + 1)))
        .collect();

    assert_eq!(parser.parse(&rendered), pitches);
}

#[test]
fn test_generic_render_reparses_identically() {
    let grammar = Grammar::new("notes")
        .with_separator(r"^#\s*Note\b")
        .unwrap()
        .field(FieldSpec::scalar("subject", "Subject"))
        .field(FieldSpec::list("points", "Points"));
    let records = parse(
        "# Note\n## Subject\nHarbor\n## Points\n- tides\n- debts\n# Note\n## Points\n- lamps",
        &grammar,
    );

    let rendered: String = records
        .iter()
        .map(|record| render(record, &grammar, Some("# Note")))
        .collect();

    assert_eq!(parse(&rendered, &grammar), records);
    assert_eq!(records[1].text("subject"), MISSING);
}

#[test]
fn test_improved_pitch_separator() {
    let parser = PitchParser::improved().unwrap();
    let improved = parser
        .parse_one("Here you go.\n\n# Improved Pitch\n## Title\nLantern Court\n## Hook\nLamps testify.")
        .unwrap();

    assert_eq!(improved.title, "Lantern Court");
    assert!(parser.parse_one("No headings at all").is_none());
    assert_eq!(PitchRecord::missing().missing_count(), 5);
}

#[test]
fn test_stated_overall_wins_over_mean() {
    let evaluation = EvaluationParser::new().unwrap().parse(
        "# Evaluation\n## Scores\n- A: 10/10\n- B: 4/10\n- Overall: 5/10\n## Key Strengths\n- voice",
    ).unwrap();

    assert_eq!(evaluation.scores.len(), 2);
    assert_eq!(evaluation.overall_score, 5.0);
    assert_eq!(evaluation.overall_source, OverallSource::Stated);
    assert_eq!(evaluation.key_strengths, ["voice"]);
    assert!(evaluation.areas_for_improvement.is_empty());
}

#[test]
fn test_mean_used_without_overall_line() {
    let evaluation = EvaluationParser::new().unwrap().parse(
        "## Scores\n- Originality: 7/10\n- Emotional Impact: 7/10\n- Genre Fit: 6/10\n- Theme Integration: 7/10\n- Commercial Potential: 7/10",
    ).unwrap();

    assert_eq!(evaluation.overall_source, OverallSource::Mean);
    assert!((evaluation.overall_score - 6.8).abs() < 1e-9);
    assert_eq!(evaluation.scores.get("emotional_impact"), Some(7.0));
}

#[test]
fn test_unscored_reply_still_has_overall() {
    let evaluation = EvaluationParser::new()
        .unwrap()
        .parse("## Key Strengths\n- I liked it a lot.")
        .unwrap();

    assert_eq!(evaluation.overall_source, OverallSource::Unscored);
    assert_eq!(evaluation.overall_score, 0.0);
    assert!(evaluation.needs_improvement());
}

#[test]
fn test_prose_reply_is_not_an_evaluation() {
    let parser = EvaluationParser::new().unwrap();
    assert!(parser.parse("I liked it a lot.").is_none());
    assert!(SelectionParser::new().parse("Pick the second one.").is_none());
    assert!(TropeParser::new().unwrap().parse("No tropes here.").is_none());
}

#[test]
fn test_selection_sections() {
    let selection = SelectionParser::new().parse(
        "# Selection\n## Winner\nGlass Saints\n## Selection Criteria\n- Original\n- Marketable\n## Potential Challenges\n- Theology",
    ).unwrap();

    assert_eq!(selection.winner, "Glass Saints");
    assert_eq!(selection.selection_criteria, ["Original", "Marketable"]);
    assert!(selection.development_recommendations.is_empty());
    assert_eq!(selection.potential_challenges, ["Theology"]);
    assert_eq!(selection.fallback, None);
}

#[test]
fn test_trope_analysis() {
    let reply = "\
# Trope Analysis

## Identified Tropes
1. Chosen One: The forger alone can hear the relic | Overuse Level: High
2. Corrupt Church: The clergy hide the truth | Overuse Level: medium
3. Mentor Dies: Not really present | Overuse Level: Extreme

## Suggested Alternatives

### For Chosen One
- Accidental Heir: Anyone could hear it, she just listened first
- Shared Burden: The whole guild hears it

### For Heist Crew
- Solo Job: She works alone

## Summary
Lean into the forger's guilt.
Let the church be divided.
";
    let analysis = TropeParser::new().unwrap().parse(reply).unwrap();

    assert_eq!(analysis.tropes.len(), 2);
    assert_eq!(analysis.tropes[0].name, "Chosen One");
    assert_eq!(analysis.tropes[1].overuse_level, OveruseLevel::Medium);
    assert_eq!(analysis.count_at(OveruseLevel::High), 1);

    let alternatives = analysis.alternatives_for("Chosen One").unwrap();
    assert_eq!(alternatives.len(), 2);
    assert_eq!(alternatives[0].name, "Accidental Heir");

    assert_eq!(analysis.orphaned(), ["Heist Crew"]);
    assert_eq!(
        analysis.summary,
        "Lean into the forger's guilt. Let the church be divided."
    );
}
