//! Static improvement suggestions keyed by trait label.
//!
//! Keys are kept exactly as authored. The Big Five entries and `well_rounded`
//! use the classifier's snake_case labels; the ten skill entries use
//! title-cased display names ("Leadership", "Analytical Thinking", ...) and
//! therefore never match a predicted label. Lookups for those labels return
//! [`DEFAULT_TIP`]. `missing_tip_labels` reports them so startup can log it.

use crate::personality::taxonomy::TraitCategory;

pub const DEFAULT_TIP: &str = "No tips available";

pub const TIP_CATALOG: &[(&str, &str)] = &[
    (
        "extraversion",
        "Include more examples of teamwork, leadership, and presentations in your resume to showcase social and communication skills.",
    ),
    (
        "conscientiousness",
        "Add detailed project timelines, achievements, and metrics to show organization, discipline, and reliability.",
    ),
    (
        "openness",
        "Highlight creative projects, innovative solutions, and learning new skills to demonstrate curiosity and adaptability.",
    ),
    (
        "agreeableness",
        "Include volunteer work, collaborations, or mentorship experiences to show empathy and teamwork.",
    ),
    (
        "emotional_stability",
        "Show examples of handling stressful projects, multitasking, or problem-solving under pressure to indicate resilience.",
    ),
    (
        "Leadership",
        "Include project lead roles, initiative-taking, mentoring, and strategic decision-making examples.",
    ),
    (
        "Analytical Thinking",
        "Highlight data analysis, research projects, problem-solving examples, and measurable outcomes.",
    ),
    (
        "Creativity",
        "Include creative projects, design thinking, prototype development, and inventive approaches in coursework or personal projects.",
    ),
    (
        "Adaptability",
        "Show experiences learning new technologies, shifting roles, or handling changing requirements.",
    ),
    (
        "Teamwork",
        "Highlight group projects, team achievements, cooperative roles, and conflict resolution experiences.",
    ),
    (
        "Communication Skills",
        "Include presentations, reports, public speaking, teaching, or mentoring experiences.",
    ),
    (
        "Problem-Solving",
        "Mention examples of overcoming obstacles, troubleshooting, and successful project execution.",
    ),
    (
        "Innovation",
        "Highlight projects where you developed something new, optimized processes, or used novel solutions.",
    ),
    (
        "Time Management",
        "Include multi-project handling, timely submissions, and prioritization examples.",
    ),
    (
        "Professionalism",
        "Highlight reliability, integrity, project accountability, and professional conduct.",
    ),
    (
        "well_rounded",
        "Shows a balanced mix of skills,adaptability and teamwork. Can contribute effectively in diverse work environments.",
    ),
];

/// Exact-key lookup. Falls back to [`DEFAULT_TIP`].
pub fn improvement_tip(label: &str) -> &'static str {
    TIP_CATALOG
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, tip)| *tip)
        .unwrap_or(DEFAULT_TIP)
}

/// Taxonomy labels whose lookup falls through to the default tip.
pub fn missing_tip_labels() -> Vec<TraitCategory> {
    TraitCategory::ALL
        .into_iter()
        .filter(|c| !TIP_CATALOG.iter().any(|(key, _)| *key == c.as_str()))
        .collect()
}
