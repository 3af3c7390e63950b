use crate::api::validate::{parse_learning_material, parse_quiz};
use crate::types::{LearningMaterial, Quiz};
use tokio::sync::Mutex as AsyncMutex;

/// Process-wide lock for tests that mutate environment variables.
/// Use `.blocking_lock()` in sync tests and `.lock().await` in async tests.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());

pub const MATERIAL_JSON: &str = r#"{
    "summary": "Notes on the passé composé with avoir.",
    "level": "A2",
    "exercises": [
        {"type": "Fill-in-the-blank", "question": "J'___ mangé une pomme.", "answer": "ai"},
        {"type": "Multiple-choice", "question": "Nous ___ fini.", "options": ["avons", "sommes"], "answer": "avons"}
    ],
    "studyGuide": {"title": "Le passé composé", "points": ["avoir + participe passé", "j'ai parlé"]},
    "practiceTask": {"title": "Mon week-end", "description": "Écrivez cinq phrases au passé composé."}
}"#;

/// Quiz JSON with `len` questions whose correct option is always index 1.
pub fn quiz_json(len: usize) -> String {
    let items: Vec<serde_json::Value> = (0..len)
        .map(|i| {
            serde_json::json!({
                "type": "Multiple-choice",
                "question": format!("Question {}", i + 1),
                "options": ["le chat", "la maison", "un livre", "des pommes"],
                "answer": "la maison",
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

pub fn sample_quiz(len: usize) -> Quiz {
    parse_quiz(&quiz_json(len)).expect("fixture quiz must be valid")
}

pub fn sample_material() -> LearningMaterial {
    parse_learning_material(MATERIAL_JSON).expect("fixture material must be valid")
}
