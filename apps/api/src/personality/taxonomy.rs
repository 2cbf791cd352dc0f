use std::fmt;

use serde::Serialize;

/// One label of the fixed trait taxonomy.
///
/// Declaration order matches the keyword rule order in [`LABEL_RULES`],
/// with the fallback last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    Extraversion,
    Conscientiousness,
    Openness,
    Agreeableness,
    EmotionalStability,
    Leadership,
    AnalyticalThinking,
    Creativity,
    Adaptability,
    Teamwork,
    CommunicationSkills,
    ProblemSolving,
    Innovation,
    TimeManagement,
    Professionalism,
    WellRounded,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 16] = [
        TraitCategory::Extraversion,
        TraitCategory::Conscientiousness,
        TraitCategory::Openness,
        TraitCategory::Agreeableness,
        TraitCategory::EmotionalStability,
        TraitCategory::Leadership,
        TraitCategory::AnalyticalThinking,
        TraitCategory::Creativity,
        TraitCategory::Adaptability,
        TraitCategory::Teamwork,
        TraitCategory::CommunicationSkills,
        TraitCategory::ProblemSolving,
        TraitCategory::Innovation,
        TraitCategory::TimeManagement,
        TraitCategory::Professionalism,
        TraitCategory::WellRounded,
    ];

    /// The label as the classifier emits it (always lowercase snake_case).
    pub fn as_str(self) -> &'static str {
        match self {
            TraitCategory::Extraversion => "extraversion",
            TraitCategory::Conscientiousness => "conscientiousness",
            TraitCategory::Openness => "openness",
            TraitCategory::Agreeableness => "agreeableness",
            TraitCategory::EmotionalStability => "emotional_stability",
            TraitCategory::Leadership => "leadership",
            TraitCategory::AnalyticalThinking => "analytical_thinking",
            TraitCategory::Creativity => "creativity",
            TraitCategory::Adaptability => "adaptability",
            TraitCategory::Teamwork => "teamwork",
            TraitCategory::CommunicationSkills => "communication_skills",
            TraitCategory::ProblemSolving => "problem_solving",
            TraitCategory::Innovation => "innovation",
            TraitCategory::TimeManagement => "time_management",
            TraitCategory::Professionalism => "professionalism",
            TraitCategory::WellRounded => "well_rounded",
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label returned when no keyword rule matches.
pub const FALLBACK_CATEGORY: TraitCategory = TraitCategory::WellRounded;

/// Ordered keyword rules. The first rule with any keyword contained in the
/// lowercased description wins, so overlapping keywords ("creative", "idea",
/// "problem-solving") resolve to the earlier entry.
pub const LABEL_RULES: &[(TraitCategory, &[&str])] = &[
    (
        TraitCategory::Extraversion,
        &["social", "present", "communication", "leadership"],
    ),
    (
        TraitCategory::Conscientiousness,
        &["organized", "discipline", "attention", "reliability", "accuracy"],
    ),
    (
        TraitCategory::Openness,
        &["creative", "innovative", "curiosity", "explore", "open"],
    ),
    (
        TraitCategory::Agreeableness,
        &["empathy", "cooperative", "team", "support", "help"],
    ),
    (
        TraitCategory::EmotionalStability,
        &["resilient", "calm", "stress", "pressure", "patience"],
    ),
    (
        TraitCategory::Leadership,
        &["lead", "delegat", "decision", "initiative"],
    ),
    (
        TraitCategory::AnalyticalThinking,
        &["analyze", "logic", "problem-solving", "reasoning", "data"],
    ),
    (
        TraitCategory::Creativity,
        &["creative", "innovation", "original", "idea", "inventive"],
    ),
    (
        TraitCategory::Adaptability,
        &["adapt", "flexible", "adjust", "change", "learning"],
    ),
    (
        TraitCategory::Teamwork,
        &["teamwork", "collaboration", "cooperate", "group", "peer"],
    ),
    (
        TraitCategory::CommunicationSkills,
        &["communicate", "presentation", "report", "verbal", "writing"],
    ),
    (
        TraitCategory::ProblemSolving,
        &["problem-solving", "troubleshoot", "challenge", "solution", "resolve"],
    ),
    (
        TraitCategory::Innovation,
        &["innovate", "new method", "optimization", "idea", "novel"],
    ),
    (
        TraitCategory::TimeManagement,
        &["time management", "deadline", "multi-task", "schedule", "organize"],
    ),
    (
        TraitCategory::Professionalism,
        &["professional", "ethics", "responsible", "integrity", "accountability"],
    ),
];
