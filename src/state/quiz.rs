use crate::types::{Exercise, Quiz};

/// A quiz plus the learner's progress through it.
///
/// `index == quiz.len()` is the finished state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRun {
    quiz: Quiz,
    index: usize,
    selected: Option<String>,
    answered: bool,
    score: usize,
}

impl QuizRun {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            index: 0,
            selected: None,
            answered: false,
            score: 0,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.quiz.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.quiz.len()
    }

    pub fn current(&self) -> Option<&Exercise> {
        self.quiz.get(self.index)
    }

    /// Records an answer for the current question. Returns false when the
    /// question was already answered or the quiz is over.
    pub fn select_answer(&mut self, option: &str) -> bool {
        if self.answered {
            return false;
        }
        let Some(question) = self.current() else {
            return false;
        };
        let correct = question.is_correct(option);

        self.selected = Some(option.to_string());
        self.answered = true;
        if correct {
            self.score += 1;
        }
        true
    }

    /// Selects the option at `option_index` of the current question.
    pub fn select_option(&mut self, option_index: usize) -> bool {
        let Some(option) = self
            .current()
            .and_then(|question| question.options().get(option_index))
            .cloned()
        else {
            return false;
        };
        self.select_answer(&option)
    }

    /// Moves to the next question. Returns true when this step reached the
    /// finished state.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.index += 1;
        self.selected = None;
        self.answered = false;
        self.is_finished()
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.selected = None;
        self.answered = false;
        self.score = 0;
    }

    /// Final score as a whole percentage, rounded half up.
    pub fn percentage(&self) -> u32 {
        if self.quiz.is_empty() {
            return 0;
        }
        let ratio = self.score as f64 / self.quiz.len() as f64;
        (ratio * 100.0).round() as u32
    }
}
