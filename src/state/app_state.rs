use super::quiz::QuizRun;
use crate::i18n::{MessageKey, Translator};
use crate::types::{GeneratorKind, LearningMaterial, QuestionCount, Quiz, QuizLanguage};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Materials,
    Quiz,
    About,
}

impl View {
    pub fn is_results(self) -> bool {
        matches!(self, Self::Materials | Self::Quiz)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    About,
}

/// Error banner shown on the home view. Localized when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBanner {
    UploadRequired,
    GenerationFailed(GeneratorKind),
}

impl ErrorBanner {
    pub fn message(self, translator: &Translator) -> String {
        match self {
            Self::UploadRequired => translator.t(MessageKey::ErrorUpload).to_string(),
            Self::GenerationFailed(kind) => {
                translator.t_with(MessageKey::ErrorGenerate, &[("type", kind.as_str())])
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyContent {
    Materials(LearningMaterial),
    Quiz(QuizRun),
}

/// Bookkeeping for the request in flight, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSession {
    pub active: Option<GeneratorKind>,
    pub error: Option<ErrorBanner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationOptions {
    pub question_count: QuestionCount,
    pub quiz_language: QuizLanguage,
}

/// Everything the background task needs to run one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: GeneratorKind,
    pub files: Vec<PathBuf>,
    pub question_count: QuestionCount,
    pub quiz_language: QuizLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Materials(LearningMaterial),
    Quiz(Quiz),
    Failed(GeneratorKind),
}

impl GenerationOutcome {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Materials(_) => GeneratorKind::Materials,
            Self::Quiz(_) => GeneratorKind::Quiz,
            Self::Failed(kind) => *kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateRejected {
    /// A request is already in flight.
    Busy,
    /// No files selected; the upload-required banner is now set.
    NoFiles,
}

/// The application state machine: view, uploaded files, generated content and
/// the generation session. Mutated only by the event loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    view: View,
    files: Vec<PathBuf>,
    content: Option<StudyContent>,
    session: GenerationSession,
    options: GenerationOptions,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_loading(&self) -> bool {
        self.session.active.is_some()
    }

    pub fn active_generator(&self) -> Option<GeneratorKind> {
        self.session.active
    }

    pub fn error(&self) -> Option<ErrorBanner> {
        self.session.error
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    pub fn content(&self) -> Option<&StudyContent> {
        self.content.as_ref()
    }

    pub fn materials(&self) -> Option<&LearningMaterial> {
        match &self.content {
            Some(StudyContent::Materials(material)) => Some(material),
            _ => None,
        }
    }

    pub fn quiz_run(&self) -> Option<&QuizRun> {
        match &self.content {
            Some(StudyContent::Quiz(run)) => Some(run),
            _ => None,
        }
    }

    pub fn quiz_run_mut(&mut self) -> Option<&mut QuizRun> {
        match &mut self.content {
            Some(StudyContent::Quiz(run)) => Some(run),
            _ => None,
        }
    }

    /// Replaces the selected files. Leaving a results view clears its content
    /// first so old results never sit next to new images.
    pub fn select_files(&mut self, files: Vec<PathBuf>) -> bool {
        if self.is_loading() {
            return false;
        }
        if self.view.is_results() {
            self.clear_content();
        }
        tracing::info!(count = files.len(), "files selected");
        self.files = files;
        true
    }

    pub fn clear_files(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.files.clear();
        self.clear_content();
        true
    }

    /// Drops content and error and returns to the home view.
    pub fn clear_content(&mut self) {
        self.content = None;
        self.session.error = None;
        self.view = View::Home;
    }

    pub fn begin_generation(
        &mut self,
        kind: GeneratorKind,
    ) -> Result<GenerationRequest, GenerateRejected> {
        if self.is_loading() {
            return Err(GenerateRejected::Busy);
        }
        if self.files.is_empty() {
            self.session.error = Some(ErrorBanner::UploadRequired);
            return Err(GenerateRejected::NoFiles);
        }

        self.content = None;
        self.session = GenerationSession {
            active: Some(kind),
            error: None,
        };
        self.view = View::Home;
        tracing::info!(%kind, files = self.files.len(), "generation started");

        Ok(GenerationRequest {
            kind,
            files: self.files.clone(),
            question_count: self.options.question_count,
            quiz_language: self.options.quiz_language,
        })
    }

    /// Applies the result of the request in flight. The loading markers are
    /// cleared whatever the outcome; files are kept.
    pub fn finish_generation(&mut self, outcome: GenerationOutcome) {
        if self.session.active != Some(outcome.kind()) {
            tracing::warn!(
                kind = %outcome.kind(),
                active = ?self.session.active,
                "ignoring generation result with no matching request"
            );
            return;
        }
        self.session.active = None;

        match outcome {
            GenerationOutcome::Materials(material) => {
                self.content = Some(StudyContent::Materials(material));
                self.view = View::Materials;
            }
            GenerationOutcome::Quiz(quiz) => {
                self.content = Some(StudyContent::Quiz(QuizRun::new(quiz)));
                self.view = View::Quiz;
            }
            GenerationOutcome::Failed(kind) => {
                self.content = None;
                self.session.error = Some(ErrorBanner::GenerationFailed(kind));
                self.view = View::Home;
            }
        }
    }

    pub fn navigate(&mut self, target: NavTarget) -> bool {
        if self.is_loading() {
            return false;
        }
        match target {
            NavTarget::Home if self.view.is_results() => self.clear_content(),
            NavTarget::Home => self.view = View::Home,
            NavTarget::About => self.view = View::About,
        }
        true
    }

    /// Quiz "done": same full clear as navigating home from results.
    pub fn finish_quiz(&mut self) {
        if self.view == View::Quiz {
            self.clear_content();
        }
    }

    pub fn set_question_count(&mut self, count: QuestionCount) -> bool {
        if self.is_loading() {
            return false;
        }
        self.options.question_count = count;
        true
    }

    pub fn set_quiz_language(&mut self, language: QuizLanguage) -> bool {
        if self.is_loading() {
            return false;
        }
        self.options.quiz_language = language;
        true
    }
}
