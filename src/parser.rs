//! Workout text parser - best-effort structuring of LLM output into cards
//!
//! The chat model answers in free-form prose. This module walks the
//! text line by line, classifies each line, and flushes accumulated
//! state into exercise cards. The contract is best-effort: arbitrary
//! input never errors, and an empty result means the caller should
//! show the raw text instead.

use std::sync::LazyLock;

use regex::Regex;

/// One parsed exercise card
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseCard {
    pub name: String,
    pub description: String,
    /// (sets, reps) when a numeric pair was found in the description
    pub sets_reps: Option<(u32, u32)>,
    /// Rest period as written, e.g. "90 seconds"
    pub rest: Option<String>,
    /// Weight suggestion as written, e.g. "25 lbs"
    pub weight: Option<String>,
    /// Up to three sentences about form and technique
    pub form_tips: Vec<String>,
}

/// Classification of a single input line, checked in priority order
#[derive(Debug, Clone, PartialEq)]
enum LineKind {
    /// Starts a new exercise with the captured name
    ExerciseStart(String),
    /// Warm-up/cool-down/intro/summary header, discards current card
    SectionHeader,
    /// Continuation text appended to the current description
    Text,
}

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.)]\s+(.+)$").expect("numbered pattern"));

static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\s*[:\-]\s*(.+)$")
        .expect("ordinal pattern")
});

static LABELED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*exercise\s+\d+\s*[:\-.]\s*(.+)$").expect("labeled pattern"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\*([^*]+)\*\*:?\s*$").expect("bold pattern"));

static SETS_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*sets?\s*of\s*(\d+)").expect("sets-of pattern"));

static SETS_X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[xX×]\s*(\d+)").expect("sets-x pattern"));

static REST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rest[:\s]+(?:for\s+)?(\d+(?:\.\d+)?)[\s-]*(seconds?|secs?|minutes?|mins?)")
        .expect("rest pattern")
});

static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(lbs?|pounds?|kg|kilograms?)\b").expect("weight pattern")
});

/// Keywords that make a short capitalized line look like an exercise name
const EXERCISE_KEYWORDS: &[&str] = &[
    "squat", "press", "curl", "row", "pull", "push", "deadlift", "lunge", "plank", "crunch",
    "bench", "fly", "extension", "raise", "dip",
];

/// Section headers that reset state without starting a card
const SECTION_KEYWORDS: &[&str] = &["warm-up", "warm up", "cool-down", "cool down", "introduction", "summary"];

const FORM_KEYWORDS: &[&str] = &["form", "technique", "posture", "position", "keep", "maintain", "avoid"];

const MAX_FORM_TIPS: usize = 3;
const MAX_KEYWORD_LINE_LEN: usize = 80;
const MAX_HEADER_LINE_LEN: usize = 60;
const MIN_NAME_LEN: usize = 3;
const FALLBACK_DESC_LINES: usize = 5;

/// Parse free-form workout text into cards.
///
/// Runs the primary line classifier, then the numbered-only fallback
/// when the primary pass finds nothing. An empty vector is a valid
/// outcome for prose with no recognizable exercises.
pub fn parse_workout(text: &str) -> Vec<ExerciseCard> {
    let cards = primary_pass(text);
    let cards = if cards.is_empty() { fallback_pass(text) } else { cards };

    cards
        .into_iter()
        .filter(|c| c.name.chars().count() >= MIN_NAME_LEN)
        .collect()
}

fn primary_pass(text: &str) -> Vec<ExerciseCard> {
    let mut cards = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match classify(trimmed) {
            LineKind::ExerciseStart(name) => {
                flush(&mut cards, current.take());
                current = Some((name, Vec::new()));
            }
            LineKind::SectionHeader => {
                flush(&mut cards, current.take());
            }
            LineKind::Text => {
                if let Some((_, desc)) = current.as_mut() {
                    desc.push(trimmed.to_string());
                }
                // Lines before the first exercise are preamble, dropped.
            }
        }
    }

    flush(&mut cards, current);
    cards
}

/// Simpler rescue pass: any numeric-prefix line is a name, up to five
/// following lines are its description.
fn fallback_pass(text: &str) -> Vec<ExerciseCard> {
    let mut cards = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = NUMBERED.captures(trimmed) {
            flush(&mut cards, current.take());
            current = Some((clean_name(&caps[1]), Vec::new()));
        } else if let Some((_, desc)) = current.as_mut() {
            if desc.len() < FALLBACK_DESC_LINES {
                desc.push(trimmed.to_string());
            }
        }
    }

    flush(&mut cards, current);
    cards
}

fn classify(line: &str) -> LineKind {
    if is_section_header(line) {
        return LineKind::SectionHeader;
    }
    if let Some(caps) = NUMBERED.captures(line) {
        return LineKind::ExerciseStart(clean_name(&caps[1]));
    }
    if let Some(caps) = ORDINAL.captures(line) {
        return LineKind::ExerciseStart(clean_name(&caps[1]));
    }
    if let Some(caps) = LABELED.captures(line) {
        return LineKind::ExerciseStart(clean_name(&caps[1]));
    }
    if let Some(caps) = BOLD.captures(line) {
        return LineKind::ExerciseStart(clean_name(&caps[1]));
    }
    if is_keyword_name(line) {
        return LineKind::ExerciseStart(clean_name(line));
    }
    LineKind::Text
}

fn is_section_header(line: &str) -> bool {
    if line.chars().count() > MAX_HEADER_LINE_LEN {
        return false;
    }
    let lower = line.to_lowercase();
    SECTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Short capitalized line naming a known movement, at most one colon.
fn is_keyword_name(line: &str) -> bool {
    if line.chars().count() >= MAX_KEYWORD_LINE_LEN {
        return false;
    }
    if line.matches(':').count() > 1 {
        return false;
    }
    let starts_upper = line.chars().next().is_some_and(|c| c.is_uppercase());
    if !starts_upper {
        return false;
    }
    let lower = line.to_lowercase();
    EXERCISE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Strip markdown emphasis and trailing separators from a captured name.
fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_matches('*')
        .trim_end_matches(':')
        .trim()
        .to_string()
}

fn flush(cards: &mut Vec<ExerciseCard>, current: Option<(String, Vec<String>)>) {
    if let Some((name, desc_lines)) = current {
        let description = desc_lines.join("\n");
        cards.push(build_card(name, description));
    }
}

/// Secondary extraction over the accumulated description text.
fn build_card(name: String, description: String) -> ExerciseCard {
    let sets_reps = extract_sets_reps(&description);
    let rest = REST
        .captures(&description)
        .map(|c| format!("{} {}", &c[1], c[2].to_lowercase()));
    let weight = WEIGHT
        .captures(&description)
        .map(|c| format!("{} {}", &c[1], c[2].to_lowercase()));
    let form_tips = extract_form_tips(&description);

    ExerciseCard {
        name,
        description,
        sets_reps,
        rest,
        weight,
        form_tips,
    }
}

fn extract_sets_reps(text: &str) -> Option<(u32, u32)> {
    let caps = SETS_OF.captures(text).or_else(|| SETS_X.captures(text))?;
    let sets = caps[1].parse().ok()?;
    let reps = caps[2].parse().ok()?;
    Some((sets, reps))
}

fn extract_form_tips(text: &str) -> Vec<String> {
    let mut tips = Vec::new();
    for sentence in text.split(['.', '\n']) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let lower = sentence.to_lowercase();
        if FORM_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            tips.push(sentence.to_string());
            if tips.len() == MAX_FORM_TIPS {
                break;
            }
        }
    }
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Here is your routine for today.

Warm-up: 5 minutes light cardio

1. Bench Press
Do 3 sets of 10 reps with 95 lbs.
Rest: 90 seconds between sets.
Keep your back flat and feet planted.

2. Squat
4 x 8 at a comfortable weight.
Maintain a neutral spine throughout.

Cool-down: stretch for 5 minutes.";

    #[test]
    fn test_numbered_list_yields_cards_in_order() {
        let cards = parse_workout(SAMPLE);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Bench Press");
        assert_eq!(cards[1].name, "Squat");
    }

    #[test]
    fn test_names_always_longer_than_two_chars() {
        let cards = parse_workout(SAMPLE);
        for card in &cards {
            assert!(card.name.chars().count() > 2);
        }
    }

    #[test]
    fn test_sets_reps_extraction() {
        let cards = parse_workout(SAMPLE);
        assert_eq!(cards[0].sets_reps, Some((3, 10)));
        assert_eq!(cards[1].sets_reps, Some((4, 8)));
    }

    #[test]
    fn test_rest_and_weight_extraction() {
        let cards = parse_workout(SAMPLE);
        assert_eq!(cards[0].rest.as_deref(), Some("90 seconds"));
        assert_eq!(cards[0].weight.as_deref(), Some("95 lbs"));
    }

    #[test]
    fn test_form_tips_surfaced() {
        let cards = parse_workout(SAMPLE);
        assert_eq!(cards[0].form_tips.len(), 1);
        assert!(cards[0].form_tips[0].contains("Keep your back flat"));
        assert!(cards[1].form_tips[0].contains("Maintain a neutral spine"));
    }

    #[test]
    fn test_form_tips_capped_at_three() {
        let text = "1. Deadlift\n\
            Keep the bar close. Keep your chest up. Keep your arms straight.\n\
            Keep breathing. Maintain tension.";
        let cards = parse_workout(text);
        assert_eq!(cards[0].form_tips.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_no_cards() {
        assert!(parse_workout("").is_empty());
    }

    #[test]
    fn test_plain_prose_yields_no_cards() {
        let text = "i went to the store today.\nthe weather was nice.\nnothing else happened.";
        assert!(parse_workout(text).is_empty());
    }

    #[test]
    fn test_preamble_is_dropped() {
        let cards = parse_workout(SAMPLE);
        assert!(!cards[0].description.contains("routine for today"));
    }

    #[test]
    fn test_section_headers_discard_their_text() {
        let cards = parse_workout(SAMPLE);
        for card in &cards {
            assert!(!card.description.to_lowercase().contains("stretch for 5 minutes"));
            assert!(!card.description.to_lowercase().contains("light cardio"));
        }
    }

    #[test]
    fn test_ordinal_prefix_starts_exercise() {
        let text = "First: Overhead Press\n3 sets of 8.\nSecond: Barbell Row\n3 sets of 10.";
        let cards = parse_workout(text);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Overhead Press");
        assert_eq!(cards[1].name, "Barbell Row");
    }

    #[test]
    fn test_explicit_exercise_label() {
        let text = "Exercise 1: Lat Pulldown\n3 sets of 12.";
        let cards = parse_workout(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Lat Pulldown");
    }

    #[test]
    fn test_markdown_bold_name() {
        let text = "**Incline Dumbbell Press**\n3 sets of 10 with 40 lbs.";
        let cards = parse_workout(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Incline Dumbbell Press");
    }

    #[test]
    fn test_keyword_line_starts_exercise() {
        let text = "Goblet Squat\nHold a dumbbell at your chest, 3 sets of 12.";
        let cards = parse_workout(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Goblet Squat");
    }

    #[test]
    fn test_keyword_line_must_start_with_capital() {
        let text = "try some squat variations if you feel like it";
        assert!(parse_workout(text).is_empty());
    }

    #[test]
    fn test_bare_numbered_lines_without_keywords() {
        let text = "1. Alpha Move\nten easy efforts\n2. Beta Move\ntwelve harder efforts";
        let cards = parse_workout(text);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Alpha Move");
        assert_eq!(cards[0].description, "ten easy efforts");
    }

    #[test]
    fn test_fallback_description_capped_at_five_lines() {
        let text = "1. Alpha Move\na\nb\nc\nd\ne\nf\ng";
        let cards = fallback_pass(text);
        assert_eq!(cards[0].description.lines().count(), 5);
    }

    #[test]
    fn test_short_names_filtered_out() {
        let text = "1. Up\nthree sets";
        assert!(parse_workout(text).is_empty());
    }

    #[test]
    fn test_idempotent_on_well_formed_input() {
        let first = parse_workout(SAMPLE);
        let rendered: String = first
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}\n{}\n", i + 1, c.name, c.description))
            .collect();
        let second = parse_workout(&rendered);
        let names_first: Vec<_> = first.iter().map(|c| c.name.clone()).collect();
        let names_second: Vec<_> = second.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names_first, names_second);
    }

    #[test]
    fn test_never_panics_on_arbitrary_text() {
        let inputs = [
            "::::::",
            "1.",
            "1. ",
            "****",
            "Exercise 99:",
            "\u{0000}\u{FFFD}",
            "   \n\t\n   ",
        ];
        for input in inputs {
            let _ = parse_workout(input);
        }
    }

    #[test]
    fn test_description_text_is_subset_of_input() {
        let cards = parse_workout(SAMPLE);
        for card in &cards {
            for line in card.description.lines() {
                assert!(SAMPLE.contains(line), "line {line:?} not from input");
            }
        }
    }
}
