mod gemini;
mod material;

pub use gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    PromptFeedback,
};
pub use material::{
    Exercise, GeneratorKind, LearningMaterial, PracticeTask, QuestionCount, Quiz, QuizLanguage,
    StudyGuide, UploadedImage, MULTIPLE_CHOICE, QUIZ_OPTION_COUNT,
};
