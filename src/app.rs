use crate::api::ApiClient;
use crate::config::Config;
use crate::i18n::{Locale, Translator};
use crate::runtime::context::RuntimeContext;
use crate::runtime::frontend::UserInputEvent;
use crate::runtime::mode::RuntimeMode;
use crate::runtime::r#loop::Runtime;
use crate::runtime::UiUpdate;
use crate::state::{AppState, GenerateRejected, NavTarget, View};
use crate::types::{GeneratorKind, QuestionCount, QuizLanguage};
use crate::util::split_path_list;
use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Slash commands accepted on the input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Generate(GeneratorKind),
    Clear,
    Navigate(NavTarget),
    Questions(QuestionCount),
    QuizLanguage(QuizLanguage),
    Locale(Locale),
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut words = input.trim().split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    let command = match (name, arg) {
        ("/materials", None) => Command::Generate(GeneratorKind::Materials),
        ("/quiz", None) => Command::Generate(GeneratorKind::Quiz),
        ("/clear", None) => Command::Clear,
        ("/home", None) => Command::Navigate(NavTarget::Home),
        ("/about", None) => Command::Navigate(NavTarget::About),
        ("/quit" | "/exit", None) => Command::Quit,
        ("/questions", Some(value)) => {
            let count = value
                .parse::<u32>()
                .map_err(|_| format!("/questions expects a number, got '{value}'"))?;
            Command::Questions(QuestionCount::new(count))
        }
        ("/lang", Some(value)) => QuizLanguage::parse(value)
            .map(Command::QuizLanguage)
            .ok_or_else(|| format!("unknown quiz language '{value}'"))?,
        ("/ui", Some(value)) => Locale::parse(value)
            .map(Command::Locale)
            .ok_or_else(|| format!("unknown UI language '{value}'"))?,
        ("/questions" | "/lang" | "/ui", None) => {
            return Err(format!("{name} needs an argument"));
        }
        _ => return Err(format!("unknown command: {}", input.trim())),
    };

    if words.next().is_some() {
        return Err(format!("too many arguments for {name}"));
    }
    Ok(command)
}

pub struct StudyMode {
    state: AppState,
    translator: Translator,
    notice: Option<String>,
    quit_requested: bool,
}

impl StudyMode {
    pub fn new(locale: Locale) -> Self {
        Self {
            state: AppState::new(),
            translator: Translator::new(locale),
            notice: None,
            quit_requested: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Transient feedback for the last input, shown on the status line.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status_line(&self) -> String {
        let view = match self.state.view() {
            View::Home => "home",
            View::Materials => "materials",
            View::Quiz => "quiz",
            View::About => "about",
        };
        let options = self.state.options();
        let activity = match self.state.active_generator() {
            Some(kind) => format!("generating:{kind}"),
            None => "ready".to_string(),
        };
        let mut line = format!(
            "fusion view:{view} files:{} questions:{} quiz:{} ui:{} state:{activity}",
            self.state.files().len(),
            options.question_count,
            options.quiz_language.prompt_name().to_ascii_lowercase(),
            self.translator.locale().code().to_ascii_lowercase(),
        );
        if let Some(notice) = &self.notice {
            line.push_str(" | ");
            line.push_str(notice);
        }
        line
    }

    fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    fn refused_while_loading(&mut self, applied: bool) {
        if !applied {
            self.set_notice("[busy - generation in progress, input discarded]");
        }
    }

    fn handle_text(&mut self, input: String, ctx: &mut RuntimeContext) {
        if input.trim_start().starts_with('/') {
            match parse_command(&input) {
                Ok(command) => self.handle_command(command, ctx),
                Err(message) => self.set_notice(format!("[{message}]")),
            }
            return;
        }
        self.select_paths(&input);
    }

    fn select_paths(&mut self, input: &str) {
        let (found, missing): (Vec<PathBuf>, Vec<PathBuf>) = split_path_list(input)
            .into_iter()
            .map(PathBuf::from)
            .partition(|path| path.is_file());

        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
            tracing::warn!(missing = ?names, "skipping paths that are not files");
            self.set_notice(format!("[not found: {}]", names.join(", ")));
        }
        if found.is_empty() {
            return;
        }
        let applied = self.state.select_files(found);
        self.refused_while_loading(applied);
    }

    fn handle_command(&mut self, command: Command, ctx: &mut RuntimeContext) {
        match command {
            Command::Generate(kind) => self.generate(kind, ctx),
            Command::Clear => {
                let applied = self.state.clear_files();
                self.refused_while_loading(applied);
            }
            Command::Navigate(target) => {
                let applied = self.state.navigate(target);
                self.refused_while_loading(applied);
            }
            Command::Questions(count) => {
                let applied = self.state.set_question_count(count);
                self.refused_while_loading(applied);
            }
            Command::QuizLanguage(language) => {
                let applied = self.state.set_quiz_language(language);
                self.refused_while_loading(applied);
            }
            Command::Locale(locale) => self.set_locale(locale),
            Command::Quit => self.quit_requested = true,
        }
    }

    fn generate(&mut self, kind: GeneratorKind, ctx: &mut RuntimeContext) {
        match self.state.begin_generation(kind) {
            Ok(request) => {
                ctx.start_generation(request);
            }
            Err(GenerateRejected::Busy) => {
                self.set_notice("[busy - generation in progress]");
            }
            Err(GenerateRejected::NoFiles) => {}
        }
    }

    fn set_locale(&mut self, locale: Locale) {
        if self.state.is_loading() {
            self.refused_while_loading(false);
            return;
        }
        self.translator.set_locale(locale);
    }

    fn handle_quiz_input(&mut self, event: UserInputEvent) {
        if self.state.view() != View::Quiz {
            return;
        }
        let Some(finished) = self.state.quiz_run().map(|run| run.is_finished()) else {
            return;
        };
        if finished && event == UserInputEvent::NextQuestion {
            self.state.finish_quiz();
            return;
        }
        let Some(run) = self.state.quiz_run_mut() else {
            return;
        };

        match event {
            UserInputEvent::ChooseOption(index) => {
                run.select_option(index);
            }
            UserInputEvent::NextQuestion if run.is_answered() => {
                if run.advance() {
                    tracing::info!(
                        score = run.score(),
                        total = run.quiz().len(),
                        "quiz finished"
                    );
                }
            }
            UserInputEvent::RestartQuiz if finished => run.restart(),
            _ => {}
        }
    }
}

impl Default for StudyMode {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl RuntimeMode for StudyMode {
    fn on_user_input(&mut self, event: UserInputEvent, ctx: &mut RuntimeContext) {
        self.notice = None;
        match event {
            UserInputEvent::Text(input) => self.handle_text(input, ctx),
            UserInputEvent::Generate(kind) => self.generate(kind, ctx),
            UserInputEvent::ClearFiles => self.handle_command(Command::Clear, ctx),
            UserInputEvent::Navigate(target) => self.handle_command(Command::Navigate(target), ctx),
            UserInputEvent::QuestionCountUp => {
                let count = self.state.options().question_count.increment();
                self.handle_command(Command::Questions(count), ctx);
            }
            UserInputEvent::QuestionCountDown => {
                let count = self.state.options().question_count.decrement();
                self.handle_command(Command::Questions(count), ctx);
            }
            UserInputEvent::CycleQuizLanguage => {
                let language = self.state.options().quiz_language.next();
                self.handle_command(Command::QuizLanguage(language), ctx);
            }
            UserInputEvent::CycleLocale => {
                let locale = self.translator.locale().next();
                self.set_locale(locale);
            }
            UserInputEvent::Quit => self.quit_requested = true,
            event @ (UserInputEvent::ChooseOption(_)
            | UserInputEvent::NextQuestion
            | UserInputEvent::RestartQuiz) => self.handle_quiz_input(event),
        }
    }

    fn on_model_update(&mut self, update: UiUpdate, _ctx: &mut RuntimeContext) {
        match update {
            UiUpdate::GenerationFinished(outcome) => self.state.finish_generation(outcome),
        }
    }

    fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

pub fn build_runtime(config: Config) -> Result<(Runtime<StudyMode>, RuntimeContext)> {
    let client = ApiClient::new(&config)?;
    Ok(build_runtime_with_client(client, config.locale))
}

pub fn build_runtime_with_client(
    client: ApiClient,
    locale: Locale,
) -> (Runtime<StudyMode>, RuntimeContext) {
    let (update_tx, update_rx) = mpsc::unbounded_channel::<UiUpdate>();
    let ctx = RuntimeContext::new(client, update_tx);
    let runtime = Runtime::new(StudyMode::new(locale), update_rx);
    (runtime, ctx)
}
