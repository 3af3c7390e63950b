mod app_state;
mod quiz;

pub use app_state::{
    AppState, ErrorBanner, GenerateRejected, GenerationOptions, GenerationOutcome,
    GenerationRequest, GenerationSession, NavTarget, StudyContent, View,
};
pub use quiz::QuizRun;
