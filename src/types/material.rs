use serde::{Deserialize, Serialize};
use std::fmt;

pub const MULTIPLE_CHOICE: &str = "Multiple-choice";
pub const QUIZ_OPTION_COUNT: usize = 4;

/// One encoded image, ready to be attached to a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub mime_type: String,
    /// Standard base64, no data-URL prefix.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "type")]
    pub kind: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
}

impl Exercise {
    pub fn is_multiple_choice(&self) -> bool {
        self.kind.trim().eq_ignore_ascii_case(MULTIPLE_CHOICE)
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGuide {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeTask {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningMaterial {
    pub summary: String,
    /// CEFR code, A1 through C2.
    pub level: String,
    pub exercises: Vec<Exercise>,
    pub study_guide: StudyGuide,
    pub practice_task: PracticeTask,
}

/// A validated, non-empty list of multiple-choice questions.
///
/// Only constructed through `api::validate::parse_quiz`, so every item has
/// exactly four options and an answer that is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Exercise>,
}

impl Quiz {
    pub(crate) fn from_validated(questions: Vec<Exercise>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Exercise] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.questions.get(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Materials,
    Quiz,
}

impl GeneratorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Materials => "materials",
            Self::Quiz => "quiz",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested number of quiz questions, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuestionCount(u8);

impl QuestionCount {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 15;

    pub fn new(value: u32) -> Self {
        let clamped = value.clamp(u32::from(Self::MIN), u32::from(Self::MAX));
        Self(clamped as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::new(u32::from(self.0) + 1)
    }

    pub fn decrement(self) -> Self {
        Self::new(u32::from(self.0).saturating_sub(1))
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(5)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language of the quiz question text. Options and answers stay French.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizLanguage {
    #[default]
    French,
    English,
    Spanish,
}

impl QuizLanguage {
    /// Name embedded in the prompt.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Self::French => "French",
            Self::English => "English",
            Self::Spanish => "Spanish",
        }
    }

    /// Name shown in the selector, in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::French => "Français",
            Self::English => "English",
            Self::Spanish => "Español",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "french" | "fr" | "francais" | "français" => Some(Self::French),
            "english" | "en" => Some(Self::English),
            "spanish" | "es" | "espanol" | "español" => Some(Self::Spanish),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::French => Self::English,
            Self::English => Self::Spanish,
            Self::Spanish => Self::French,
        }
    }
}
