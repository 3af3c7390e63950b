use super::mode::RuntimeMode;
use crate::state::NavTarget;
use crate::types::GeneratorKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserInputEvent {
    /// A submitted input line: file paths or a slash command.
    Text(String),
    Generate(GeneratorKind),
    ClearFiles,
    Navigate(NavTarget),
    QuestionCountUp,
    QuestionCountDown,
    CycleQuizLanguage,
    CycleLocale,
    ChooseOption(usize),
    NextQuestion,
    RestartQuiz,
    Quit,
}

pub trait FrontendAdapter<M: RuntimeMode> {
    fn poll_user_input(&mut self, mode: &M) -> Option<UserInputEvent>;
    fn render(&mut self, mode: &M);
    fn should_quit(&self) -> bool;
}
