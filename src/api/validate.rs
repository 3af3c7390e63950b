use crate::error::{GenerationError, GenerationResult};
use crate::types::{Exercise, LearningMaterial, Quiz, MULTIPLE_CHOICE, QUIZ_OPTION_COUNT};
use serde_json::Value;

/// Parses model output into a `LearningMaterial`. Missing sections or wrong
/// field types are reported as invalid JSON.
pub fn parse_learning_material(text: &str) -> GenerationResult<LearningMaterial> {
    let material = serde_json::from_str(text.trim())?;
    Ok(material)
}

/// Parses and structurally checks model output as a quiz.
pub fn parse_quiz(text: &str) -> GenerationResult<Quiz> {
    let value: Value = serde_json::from_str(text.trim())?;
    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(GenerationError::EmptyQuiz),
    };

    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let exercise: Exercise =
            serde_json::from_value(item).map_err(|error| GenerationError::MalformedQuiz {
                index,
                reason: error.to_string(),
            })?;
        questions.push(check_quiz_question(index, exercise)?);
    }

    Ok(Quiz::from_validated(questions))
}

fn check_quiz_question(index: usize, mut exercise: Exercise) -> GenerationResult<Exercise> {
    let malformed = |reason: String| GenerationError::MalformedQuiz { index, reason };

    if exercise.question.trim().is_empty() {
        return Err(malformed("question text is empty".to_string()));
    }

    let options = exercise.options();
    if options.len() != QUIZ_OPTION_COUNT {
        return Err(malformed(format!(
            "expected {QUIZ_OPTION_COUNT} options, got {}",
            options.len()
        )));
    }
    if !options.iter().any(|option| option == &exercise.answer) {
        return Err(malformed(format!(
            "answer '{}' is not one of the options",
            exercise.answer
        )));
    }

    // Options and answer are what scoring relies on; the label is cosmetic.
    if !exercise.is_multiple_choice() {
        tracing::debug!(index, kind = %exercise.kind, "normalizing quiz question type");
        exercise.kind = MULTIPLE_CHOICE.to_string();
    }
    Ok(exercise)
}
