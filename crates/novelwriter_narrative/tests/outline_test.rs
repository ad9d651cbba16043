// Tests for outlining a finished idea.

mod test_utils;

use chrono::{TimeZone, Utc};
use novelwriter_core::{
    Act, IdeaDocument, IdeaSummary, OUTLINE_CHAPTERS, SelectionRecord, TropeRecord,
};
use novelwriter_error::{DocumentErrorKind, NovelwriterErrorKind, ParseErrorKind};
use novelwriter_interface::OutlineStage;
use novelwriter_narrative::{
    OutlineParser, PlotOutliner, outline_story, parse_idea_file, render_document, write_outline,
};
use std::sync::Arc;
use strum::IntoEnumIterator;
use test_utils::{ScriptedGenerator, brief, pitch};

const IDEA: &str = "---
doc_type: idea
doc_id: idea_20240319_123456
title: The Digital Dawn
genre: Science Fiction
tone: Optimistic yet cautious
themes: [artificial intelligence, human connection, ethical progress]
summary: A young programmer finds a mind in a routine code review.
---

# Story Concept
";

fn idea() -> IdeaSummary {
    IdeaSummary {
        doc_id: Some("idea_1a2b3c4d".to_string()),
        title: "The Digital Dawn".to_string(),
        genre: "Science Fiction".to_string(),
        tone: "hopeful".to_string(),
        themes: vec!["trust".to_string()],
        summary: "A programmer finds a mind in the code.".to_string(),
    }
}

fn act_reply(act: Act) -> String {
    act.chapters()
        .map(|number| {
            format!(
                "## Chapter {n}: Turning {n}\n\n**Act:** {act}\n\n**Key Events:**\n- Event {n}\n\n**Emotional Turn:** Change {n}\n\n**Character Focus:** Sarah Chen, ARIA\n\n**Summary:** Chapter {n} happens.\n\n---\n",
                n = number,
                act = act,
            )
        })
        .collect()
}

fn error_kind(err: &novelwriter_error::NovelwriterError) -> Option<ParseErrorKind> {
    match err.kind() {
        NovelwriterErrorKind::Parse(e) => Some(e.kind.clone()),
        _ => None,
    }
}

#[test]
fn test_idea_file_frontmatter() -> anyhow::Result<()> {
    let idea = parse_idea_file(IDEA)?;

    assert_eq!(idea.doc_id.as_deref(), Some("idea_20240319_123456"));
    assert_eq!(idea.title, "The Digital Dawn");
    assert_eq!(idea.genre, "Science Fiction");
    assert_eq!(idea.themes.len(), 3);
    assert_eq!(idea.themes[1], "human connection");
    Ok(())
}

#[test]
fn test_idea_documents_read_back() -> anyhow::Result<()> {
    let document = IdeaDocument {
        brief: brief(),
        selected_pitch: pitch("Glass \"Saints\""),
        selection: SelectionRecord::default(),
        trope_analysis: TropeRecord::default(),
    };
    let at = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let rendered = render_document(&document, "idea_0badf00d", at);

    let idea = parse_idea_file(&rendered)?;

    assert_eq!(idea.doc_id.as_deref(), Some("idea_0badf00d"));
    assert_eq!(idea.title, "Glass \"Saints\"");
    assert_eq!(idea.genre, "Fantasy");
    assert_eq!(idea.tone, "grim");
    assert_eq!(idea.themes, ["betrayal", "hope"]);
    assert_eq!(idea.summary, "Glass \"Saints\" premise");
    Ok(())
}

#[test]
fn test_idea_file_missing_fields_are_listed() {
    let err = parse_idea_file("---\ndoc_type: idea\ntitle: Test\n---\n").unwrap_err();

    match err.kind() {
        NovelwriterErrorKind::Document(e) => match &e.kind {
            DocumentErrorKind::InvalidIdea(reason) => {
                assert_eq!(
                    reason,
                    "Missing required metadata fields: genre, tone, themes, summary"
                );
            }
            other => panic!("unexpected document error: {:?}", other),
        },
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_idea_file_rejects_other_documents() {
    let outline = "---\ndoc_type: outline\ntitle: Test\ngenre: Fantasy\ntone: Dark\nthemes: [magic]\nsummary: Test summary\n---\n";
    let err = parse_idea_file(outline).unwrap_err();
    assert!(err.to_string().contains("Invalid doc_type 'outline'"));

    let err = parse_idea_file("# Just a heading\n").unwrap_err();
    assert!(err.to_string().contains("no frontmatter block"));
}

#[test]
fn test_outline_chapters_from_reply() -> anyhow::Result<()> {
    let reply = "## Chapter 1: The Beginning
**Act:** I
**Key Events:**
- Event 1
- Event 2
- Event 3
**Emotional Turn:** Character grows
**Character Focus:** Main Character
**Summary:** A great start
---
## Chapter 2: The Middle
**Act:** I
**Key Events:**
- Event 1
**Emotional Turn:** Character changes
**Summary:** Things happen
---
## Chapter 3: The End
**Act:** I
**Key Events:**
- Event 1
- Event 2
**Emotional Turn:** Character evolves
**Character Focus:** Everyone, The Narrator
**Summary:** It concludes
---";
    let chapters = OutlineParser::new()?.parse(reply, Act::One);

    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].number, 1);
    assert_eq!(chapters[0].title, "The Beginning");
    assert_eq!(chapters[0].key_events, ["Event 1", "Event 2", "Event 3"]);
    assert_eq!(chapters[0].summary, "A great start");
    assert_eq!(chapters[1].number, 3);
    assert_eq!(chapters[1].character_focus, ["Everyone", "The Narrator"]);
    assert!(chapters.iter().all(|chapter| chapter.act == Act::One));
    Ok(())
}

#[tokio::test]
async fn test_outline_covers_every_act() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new(Act::iter().map(act_reply));
    let outliner = PlotOutliner::new(Arc::new(generator.clone()))?;

    let outline = outline_story(&outliner, idea()).await?;

    assert_eq!(outline.chapters.len(), OUTLINE_CHAPTERS);
    for act in Act::iter() {
        assert_eq!(outline.act_chapters(act).count(), 6);
    }
    let numbers: Vec<u32> = outline.chapters.iter().map(|chapter| chapter.number).collect();
    assert_eq!(numbers, (1..=24).collect::<Vec<u32>>());
    assert_eq!(outline.chapters[12].act, Act::TwoB);
    assert_eq!(outline.chapters[0].character_focus, ["Sarah Chen", "ARIA"]);

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[0].contains("Act I: Setup"));
    assert!(prompts[3].contains("Chapters: 19 to 24"));
    Ok(())
}

#[tokio::test]
async fn test_short_act_fails_outline() -> anyhow::Result<()> {
    let short = act_reply(Act::TwoA)
        .split("## Chapter 12")
        .next()
        .unwrap_or_default()
        .to_string();
    let generator = ScriptedGenerator::new([act_reply(Act::One), short, act_reply(Act::TwoB)]);
    let outliner = PlotOutliner::new(Arc::new(generator.clone()))?;

    let err = outline_story(&outliner, idea()).await.unwrap_err();

    assert_eq!(
        error_kind(&err),
        Some(ParseErrorKind::ChapterCount {
            act: "IIa".to_string(),
            expected: 6,
            found: 5,
        })
    );
    assert_eq!(generator.prompts().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_outliner_rejects_prose_reply() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new(["I'd be happy to help with your novel!"]);
    let outliner = PlotOutliner::new(Arc::new(generator))?;

    let err = outliner.outline_act(&idea(), Act::One).await.unwrap_err();

    assert_eq!(
        error_kind(&err),
        Some(ParseErrorKind::NoRecords {
            stage: "outline".to_string(),
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_outline_renumbers_chapters_to_act_range() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new([
        act_reply(Act::One),
        act_reply(Act::One),
        act_reply(Act::TwoB),
        act_reply(Act::Three),
    ]);
    let outliner = PlotOutliner::new(Arc::new(generator))?;

    let outline = outline_story(&outliner, idea()).await?;

    let second_act: Vec<u32> = outline
        .act_chapters(Act::TwoA)
        .map(|chapter| chapter.number)
        .collect();
    assert_eq!(second_act, [7, 8, 9, 10, 11, 12]);
    assert_eq!(outline.chapters[6].title, "Turning 1");
    Ok(())
}

#[tokio::test]
async fn test_written_outline_groups_acts() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new(Act::iter().map(act_reply));
    let outliner = PlotOutliner::new(Arc::new(generator))?;
    let outline = outline_story(&outliner, idea()).await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("outlines").join("dawn.md");

    let written = write_outline(&path, &outline).await?;

    assert_eq!(written, path);
    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("---\ndoc_type: \"outline\"\nidea_id: \"idea_1a2b3c4d\"\n"));
    assert!(text.contains("## Chapter Outlines"));
    assert!(text.contains("### Act IIb: Collapse"));
    for act in ["I", "IIa", "IIb", "III"] {
        assert_eq!(text.matches(&format!("**Act:** {}\n", act)).count(), 6);
    }
    Ok(())
}
