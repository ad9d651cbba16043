//! Prompt templates for each stage.
//!
//! Every template spells out the exact markdown shape its grammar reads back.

use novelwriter_core::{Act, EvaluationRecord, IdeaSummary, PitchField, PitchRecord, StoryBrief};
use strum::IntoEnumIterator;

fn pitch_block(pitch: &PitchRecord) -> String {
    PitchField::iter()
        .map(|field| format!("## {}\n{}\n", field, pitch.field(field)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ask for a tone and 2-5 themes.
pub fn vibe_prompt(genre: &str, subgenre: &str) -> String {
    format!(
        "Generate a tone and themes for a {subgenre} story in the {genre} genre.

The tone should be a clear emotional or narrative style that fits the genre.
The themes should be 2-5 core ideas that will drive the story.

Return your response in this format:

# Tone and Themes

## Tone
[Your tone description here]

## Themes
- [Theme 1]
- [Theme 2]
- [Theme 3]

Make sure each theme is a clear, concise statement of a core idea or conflict.
"
    )
}

/// Ask for `count` pitches in `# Pitch N` blocks.
pub fn pitch_prompt(brief: &StoryBrief, count: usize) -> String {
    format!(
        "Generate {count} compelling and original story pitches for a {subgenre} story ({genre}).
The story should have a {tone} tone and explore the following themes: {themes}.

For each pitch, provide the following:

# Pitch 1
## Title
[Creative and marketable title]

## Hook
[One-sentence hook that captures the core appeal]

## Premise
[2-3 sentences expanding the core concept]

## Main Conflict
[The central conflict or challenge]

## Unique Twist
[What makes this story fresh or unexpected]

# Pitch 2
...

Make each pitch distinct, with different premises, conflicts and twists.
Ensure they fit the {subgenre} subgenre while having commercial and artistic potential.
Be specific and concrete rather than vague or generic.
",
        subgenre = brief.subgenre(),
        genre = brief.genre(),
        tone = brief.tone(),
        themes = brief.themes_line(),
    )
}

/// Ask for a scored evaluation of one pitch.
pub fn critic_prompt(brief: &StoryBrief, pitch: &PitchRecord) -> String {
    format!(
        "Evaluate this story pitch for a {subgenre} story in the {genre} genre.
The story should have a {tone} tone and explore these themes: {themes}.

{pitch}
Provide a comprehensive evaluation using this format:

# Evaluation
## Scores
- Originality: [1-10]/10
- Emotional Impact: [1-10]/10
- Genre Fit: [1-10]/10
- Theme Integration: [1-10]/10
- Commercial Potential: [1-10]/10
- Overall Score: [calculated average]/10

## Key Strengths
- [Specific observation about what works well]

## Areas for Improvement
- [Specific suggestion for improvement]

Be specific, constructive and honest. Consider the expectations of the {subgenre} genre.
",
        subgenre = brief.subgenre(),
        genre = brief.genre(),
        tone = brief.tone(),
        themes = brief.themes_line(),
        pitch = pitch_block(pitch),
    )
}

/// Ask for a revised pitch addressing the critic's feedback.
pub fn improver_prompt(
    brief: &StoryBrief,
    pitch: &PitchRecord,
    evaluation: &EvaluationRecord,
) -> String {
    let weak: Vec<String> = evaluation
        .scores
        .iter()
        .filter(|(_, score)| *score < novelwriter_core::IMPROVEMENT_THRESHOLD)
        .map(|(criterion, _)| criterion.replace('_', " "))
        .collect();
    let focus = if weak.is_empty() {
        "overall quality".to_string()
    } else {
        weak.join(", ")
    };
    format!(
        "Improve this {subgenre} story pitch ({genre}) based on the critic's feedback.
The story should have a {tone} tone and explore these themes: {themes}.

Original pitch:

{pitch}
Overall score: {score:.1}/10

Key strengths:
{strengths}

Areas for improvement:
{areas}

Keep what works and focus especially on: {focus}.
Fill in any section marked [Missing].

Return the improved pitch in this format:

# Improved Pitch
## Title
## Hook
## Premise
## Main Conflict
## Unique Twist
",
        subgenre = brief.subgenre(),
        genre = brief.genre(),
        tone = brief.tone(),
        themes = brief.themes_line(),
        pitch = pitch_block(pitch),
        score = evaluation.overall_score,
        strengths = bullets(&evaluation.key_strengths),
        areas = bullets(&evaluation.areas_for_improvement),
    )
}

/// Ask a literary agent to pick the strongest pitch.
pub fn voter_prompt(
    brief: &StoryBrief,
    pitches: &[PitchRecord],
    evaluations: &[EvaluationRecord],
) -> String {
    let candidates = pitches
        .iter()
        .zip(evaluations)
        .enumerate()
        .map(|(i, (pitch, evaluation))| {
            format!(
                "# Pitch {}: {}\n## Score: {:.1}/10\n\n{}",
                i + 1,
                pitch.title,
                evaluation.overall_score,
                pitch_block(pitch)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are a literary agent selecting the most promising story pitch for a {subgenre} story in the {genre} genre.
The story should have a {tone} tone and explore these themes: {themes}.

Below are {count} pitches with their evaluations. Select the BEST pitch to develop into a full story.

{candidates}
Make your selection based on overall quality, fit with the subgenre and themes,
commercial viability, originality and emotional resonance.

Return your selection in this format:

# Selection
## Winner
[Exact title of the winning pitch]

## Selection Criteria
- [Reason this pitch was selected over others]

## Development Recommendations
- [Recommendation for developing this pitch further]

## Potential Challenges
- [Potential challenge or obstacle to be aware of]
",
        subgenre = brief.subgenre(),
        genre = brief.genre(),
        tone = brief.tone(),
        themes = brief.themes_line(),
        count = pitches.len(),
    )
}

/// Ask for 3-5 tropes with overuse levels and alternatives.
pub fn trope_prompt(brief: &StoryBrief, pitch: &PitchRecord) -> String {
    format!(
        "You are a literary analyst specializing in trope identification and reinvention for {genre} stories.

Analyze this {subgenre} story pitch with a {tone} tone that explores these themes: {themes}.

{pitch}
First, identify 3-5 common or potentially overused tropes in this pitch. For each trope,
name it, explain how it appears, and assess its overuse in {subgenre} stories (High/Medium/Low).
Then suggest 1-2 original alternatives for each identified trope.

Format your response exactly as follows:

# Trope Analysis

## Identified Tropes
1. [TROPE NAME]: [How it appears in the pitch] | Overuse Level: [High/Medium/Low]
2. [TROPE NAME]: [How it appears in the pitch] | Overuse Level: [High/Medium/Low]

## Suggested Alternatives

### For [TROPE NAME]
- [Alternative]: [How it keeps the appeal while being more original]

## Summary
[A brief paragraph on how these changes sharpen the story]
",
        genre = brief.genre(),
        subgenre = brief.subgenre(),
        tone = brief.tone(),
        themes = brief.themes_line(),
        pitch = pitch_block(pitch),
    )
}

/// Ask for the chapters of one act, each as a `## Chapter N: Title` block.
pub fn outline_prompt(idea: &IdeaSummary, act: Act) -> String {
    let chapters = act.chapters();
    let goals = act
        .goals()
        .iter()
        .map(|goal| format!("- {}", goal))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are an expert story outliner tasked with generating detailed chapter outlines for a novel.

STORY CONTEXT
Title: {title}
Genre: {genre}
Tone: {tone}
Themes: {themes}
Summary: {summary}

CURRENT ACT
Act {act}: {name}
Chapters: {first} to {last}
Act Goals:
{goals}

TASK
Generate detailed outlines for chapters {first} to {last} that fulfill the act's goals while maintaining narrative tension and character development.

For each chapter, provide:
1. A compelling chapter title that reflects the content
2. 2-4 key events that drive the story forward
3. The emotional turn (how characters change emotionally)
4. Which characters are the focus
5. A detailed one-paragraph summary

FORMAT
Return exactly {count} chapters in Markdown using this structure for each chapter:

## Chapter [Number]: [Title]

**Act:** {act}

**Key Events:**
- [Event 1]
- [Event 2]
- [Event 3]

**Emotional Turn:** [How characters change emotionally]

**Character Focus:** [Main character(s), comma-separated]

**Summary:** [One paragraph chapter summary]

---

REQUIREMENTS
- Ensure each chapter builds on previous events
- Focus on character development and emotional arcs
- Maintain the specified tone throughout
- Incorporate the themes naturally
- Build tension appropriately for the act's position in the story
- Make each chapter title unique and evocative
- Keep summaries focused and impactful
",
        title = idea.title,
        genre = idea.genre,
        tone = idea.tone,
        themes = idea.themes.join(", "),
        summary = idea.summary,
        act = act,
        name = act.name(),
        first = chapters.start(),
        last = chapters.end(),
        count = act.chapter_count(),
        goals = goals,
    )
}
