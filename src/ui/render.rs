use crate::i18n::{MessageKey, Translator};
use crate::state::{AppState, QuizRun, View};
use crate::types::{Exercise, LearningMaterial};
use crate::ui::input_metrics::{
    char_display_width, cursor_row_col, truncate_to_display_width, wrap_input_lines,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const OPTION_LABELS: [char; 4] = ['1', '2', '3', '4'];

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::styled(
        text.into(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::styled(text.into(), Style::default().fg(Color::DarkGray))
}

fn plain(text: impl Into<String>) -> Line<'static> {
    Line::from(text.into())
}

pub fn input_visual_rows(input: &str, width: usize) -> usize {
    wrap_input_lines(input, width).len().max(1)
}

pub fn render_input(frame: &mut Frame<'_>, area: Rect, input: &str, cursor_byte: usize) {
    if area.height == 0 || area.width <= 2 {
        return;
    }

    let input_width = area.width.saturating_sub(2).max(1) as usize;
    let lines = wrap_input_lines(input, input_width);
    let (cursor_row, cursor_col) = cursor_row_col(input, cursor_byte, input_width);
    let visible_rows = area.height as usize;
    let window_start = cursor_row.saturating_add(1).saturating_sub(visible_rows);

    let mut rendered = Vec::with_capacity(visible_rows);
    for offset in 0..visible_rows {
        let row_index = window_start + offset;
        let prefix = if row_index == 0 { "> " } else { "  " };
        let line = lines.get(row_index).cloned().unwrap_or_default();
        rendered.push(Line::from(format!("{prefix}{line}")));
    }

    frame.render_widget(
        Paragraph::new(rendered)
            .style(Style::default().fg(Color::Gray).bg(Color::Rgb(24, 24, 24)))
            .wrap(Wrap { trim: false }),
        area,
    );

    let cursor_y = area
        .y
        .saturating_add(cursor_row.saturating_sub(window_start) as u16);
    let cursor_x = area
        .x
        .saturating_add(2 + cursor_col as u16)
        .min(area.x.saturating_add(area.width.saturating_sub(1)));
    frame.set_cursor_position((cursor_x, cursor_y));
}

pub fn render_status_line(frame: &mut Frame<'_>, area: Rect, status: &str) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let text = truncate_line(status, area.width as usize);
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Draws the current view into the body pane.
pub fn render_body(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    translator: &Translator,
    scroll: u16,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let title = match state.view() {
        View::Home => "FusionStudies".to_string(),
        View::Materials => translator.t(MessageKey::GenerateStudyMaterials).to_string(),
        View::Quiz => translator.t(MessageKey::InteractiveQuizTitle).to_string(),
        View::About => translator.t(MessageKey::AboutTitle).to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(
        Paragraph::new(Text::from(body_lines(state, translator)))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

pub fn body_lines(state: &AppState, translator: &Translator) -> Vec<Line<'static>> {
    match state.view() {
        View::Home => home_lines(state, translator),
        View::Materials => match state.materials() {
            Some(material) => material_lines(material, translator),
            None => home_lines(state, translator),
        },
        View::Quiz => match state.quiz_run() {
            Some(run) if run.is_finished() => quiz_finished_lines(run, translator),
            Some(run) => quiz_question_lines(run, translator),
            None => home_lines(state, translator),
        },
        View::About => about_lines(translator),
    }
}

fn home_lines(state: &AppState, t: &Translator) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(t.t(MessageKey::HeroTitle)),
        plain(t.t(MessageKey::HeroSubtitle)),
        plain(""),
        heading(t.t(MessageKey::UploadTitle)),
    ];

    if state.files().is_empty() {
        lines.push(plain(t.t(MessageKey::UploadPrompt)));
        lines.push(dim(t.t(MessageKey::UploadHint)));
    } else {
        let count = state.files().len().to_string();
        lines.push(plain(
            t.t_with(MessageKey::FilesSelected, &[("count", count.as_str())]),
        ));
        for file in state.files() {
            lines.push(dim(format!("  • {}", file.display())));
        }
        lines.push(dim(format!("F9 {}", t.t(MessageKey::Clear))));
    }

    let options = state.options();
    lines.push(plain(""));
    lines.push(plain(format!(
        "{}: {}   {}: {}",
        t.t(MessageKey::NumberOfQuestions),
        options.question_count,
        t.t(MessageKey::QuizLanguage),
        options.quiz_language.native_name(),
    )));
    lines.push(plain(""));

    if let Some(kind) = state.active_generator() {
        lines.push(Line::styled(
            format!("{} {kind}...", t.t(MessageKey::Generating)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(dim(t.t(MessageKey::GeneratingPleaseWait)));
    } else {
        lines.push(plain(format!(
            "F2 {}",
            t.t(MessageKey::GenerateStudyMaterials)
        )));
        lines.push(plain(format!(
            "F3 {}",
            t.t(MessageKey::GenerateInteractiveQuiz)
        )));
    }

    if let Some(error) = state.error() {
        lines.push(plain(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", t.t(MessageKey::ErrorTitle)),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.message(t), Style::default().fg(Color::Red)),
        ]));
    }

    lines.push(plain(""));
    lines.push(dim(t.t(MessageKey::HomeKeyHints)));
    lines
}

fn material_lines(material: &LearningMaterial, t: &Translator) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(t.t(MessageKey::SummaryTitle)),
        plain(material.summary.clone()),
        plain(""),
        heading(t.t(MessageKey::CefrLevelTitle)),
        plain(material.level.clone()),
        plain(""),
        heading(format!(
            "{} {}",
            t.t(MessageKey::StudyGuideTitle),
            material.study_guide.title
        )),
    ];
    lines.extend(
        material
            .study_guide
            .points
            .iter()
            .map(|point| plain(format!("  • {point}"))),
    );

    lines.push(plain(""));
    lines.push(heading(t.t(MessageKey::ExercisesTitle)));
    for (index, exercise) in material.exercises.iter().enumerate() {
        lines.extend(exercise_lines(index, exercise, t));
    }

    lines.push(plain(""));
    lines.push(heading(format!(
        "{}: {}",
        t.t(MessageKey::PracticeTaskTitle),
        material.practice_task.title
    )));
    lines.push(plain(material.practice_task.description.clone()));
    lines.push(plain(""));
    lines.push(dim(format!("Esc {}", t.t(MessageKey::Done))));
    lines
}

fn exercise_lines(index: usize, exercise: &Exercise, t: &Translator) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{}. ", index + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", exercise.kind),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(exercise.question.clone()),
        ]),
    ];
    for option in exercise.options() {
        lines.push(plain(format!("     - {option}")));
    }
    lines.push(Line::styled(
        format!("   {}: {}", t.t(MessageKey::Answer), exercise.answer),
        Style::default().fg(Color::Green),
    ));
    lines
}

fn quiz_question_lines(run: &QuizRun, t: &Translator) -> Vec<Line<'static>> {
    let Some(question) = run.current() else {
        return Vec::new();
    };

    let mut lines = vec![
        dim(format!(
            "{} {} / {}",
            t.t(MessageKey::Question),
            run.index() + 1,
            run.quiz().len()
        )),
        plain(""),
        Line::styled(
            question.question.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        plain(""),
    ];

    for (label, option) in OPTION_LABELS.iter().zip(question.options()) {
        lines.push(option_line(*label, option, question, run));
    }

    lines.push(plain(""));
    if run.is_answered() {
        let next = if run.is_last_question() {
            t.t(MessageKey::Finish)
        } else {
            t.t(MessageKey::NextQuestion)
        };
        lines.push(plain(format!("Enter {next}")));
    }
    lines.push(dim(t.t(MessageKey::QuizKeyHints)));
    lines
}

fn option_line(label: char, option: &str, question: &Exercise, run: &QuizRun) -> Line<'static> {
    let text = format!("{label}) {option}");
    if !run.is_answered() {
        return plain(text);
    }

    let chosen = run.selected() == Some(option);
    if question.is_correct(option) {
        Line::styled(
            format!("{text}  ✓"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else if chosen {
        Line::styled(format!("{text}  ✗"), Style::default().fg(Color::Red))
    } else {
        dim(text)
    }
}

fn quiz_finished_lines(run: &QuizRun, t: &Translator) -> Vec<Line<'static>> {
    vec![
        heading(t.t(MessageKey::QuizCompleteTitle)),
        plain(""),
        Line::styled(
            format!(
                "{}: {} / {} ({}%)",
                t.t(MessageKey::YourScore),
                run.score(),
                run.quiz().len(),
                run.percentage()
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        plain(""),
        plain(format!(
            "r {}   Enter {}",
            t.t(MessageKey::RestartQuiz),
            t.t(MessageKey::Done)
        )),
        dim(t.t(MessageKey::QuizFinishedKeyHints)),
    ]
}

fn about_lines(t: &Translator) -> Vec<Line<'static>> {
    vec![
        heading(t.t(MessageKey::AboutTitle)),
        plain(""),
        plain(t.t(MessageKey::AboutIntro)),
        plain(""),
        plain(t.t(MessageKey::AboutAuthor)),
        plain(""),
        plain(t.t(MessageKey::AboutIdea)),
        plain(""),
        plain(t.t(MessageKey::AboutThanks)),
    ]
}

fn truncate_line(input: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::new();
    let mut used = 0usize;
    let mut truncated = false;

    for ch in input.chars() {
        let ch_width = char_display_width(ch);
        if used + ch_width > width {
            truncated = true;
            break;
        }
        out.push(ch);
        used += ch_width;
    }

    if truncated && width >= 4 {
        out = truncate_to_display_width(&out, width - 3);
        out.push_str("...");
    }
    out
}
