use fusionstudies::api::mock_client::{MockModel, MockReply};
use fusionstudies::api::ApiClient;
use fusionstudies::app::build_runtime_with_client;
use fusionstudies::config::Config;
use fusionstudies::i18n::Locale;
use fusionstudies::runtime::frontend::UserInputEvent;
use fusionstudies::runtime::mode::RuntimeMode;
use fusionstudies::state::{ErrorBanner, View};
use fusionstudies::types::{GeneratorKind, Part};
use std::path::PathBuf;
use std::sync::Arc;

const MATERIAL_JSON: &str = r#"{
    "summary": "Vocabulaire de la maison.",
    "level": "A1",
    "exercises": [
        {"type": "Translation", "question": "Translate: the kitchen", "answer": "la cuisine"}
    ],
    "studyGuide": {"title": "La maison", "points": ["la cuisine", "la chambre"]},
    "practiceTask": {"title": "Ma maison", "description": "Décrivez votre maison."}
}"#;

fn config(api_url: &str, model: &str) -> Config {
    Config {
        api_key: "test-key".to_string(),
        model: model.to_string(),
        api_url: api_url.to_string(),
        locale: Locale::En,
        log_path: std::env::temp_dir().join("fusion-test.log"),
        debug_payload: false,
    }
}

fn quiz_json(len: usize) -> String {
    let items: Vec<serde_json::Value> = (0..len)
        .map(|i| {
            serde_json::json!({
                "type": "multiple choice",
                "question": format!("¿Cómo se dice 'cat' en francés? ({i})"),
                "options": ["le chat", "le chien", "la souris", "l'oiseau"],
                "answer": "le chat",
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

fn write_images(dir: &tempfile::TempDir, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            std::fs::write(&path, b"fake image bytes").expect("write image");
            path
        })
        .collect()
}

fn quoted(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_config_validation_rejects_non_http_url() {
    assert!(config("ftp://example.com", "gemini-2.5-flash")
        .validate()
        .is_err());
}

#[test]
fn test_config_validation_rejects_model_path() {
    assert!(config(
        "https://generativelanguage.googleapis.com/v1beta",
        "models/gemini-2.5-flash"
    )
    .validate()
    .is_err());
}

#[test]
fn test_config_validation_accepts_local_endpoint() {
    assert!(config("http://localhost:8080/v1beta", "gemini-2.5-flash")
        .validate()
        .is_ok());
}

#[test]
fn test_api_client_builds_from_config() {
    let config = config("https://generativelanguage.googleapis.com/v1beta", "gemini-2.5-flash");
    assert!(ApiClient::new(&config).is_ok());
}

#[tokio::test]
async fn test_two_images_five_spanish_questions_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = write_images(&dir, &["page 1.png", "page2.jpeg"]);
    let mock = Arc::new(MockModel::with_texts(vec![quiz_json(5)]));
    let (mut runtime, mut ctx) =
        build_runtime_with_client(ApiClient::with_transport(mock.clone()), Locale::Es);

    runtime
        .mode
        .on_user_input(UserInputEvent::Text(quoted(&paths)), &mut ctx);
    runtime
        .mode
        .on_user_input(UserInputEvent::Text("/lang es".to_string()), &mut ctx);
    runtime
        .mode
        .on_user_input(UserInputEvent::Text("/questions 5".to_string()), &mut ctx);
    runtime
        .mode
        .on_user_input(UserInputEvent::Text("/quiz".to_string()), &mut ctx);
    assert!(runtime.apply_next_update(&mut ctx).await);

    let state = runtime.mode.state();
    assert_eq!(state.view(), View::Quiz);
    let run = state.quiz_run().expect("quiz loaded");
    assert_eq!(run.quiz().len(), 5);
    assert!(run
        .quiz()
        .questions()
        .iter()
        .all(|q| q.kind == "Multiple-choice" && q.options().len() == 4));

    let request = &mock.requests()[0];
    let parts = &request.contents[0].parts;
    assert_eq!(parts.len(), 3);
    match (&parts[0], &parts[1], &parts[2]) {
        (Part::Text { text }, Part::InlineData { inline_data: first }, Part::InlineData { inline_data: second }) => {
            assert!(text.contains("exactly 5 multiple-choice questions"));
            assert!(text.contains("Spanish"));
            assert_eq!(first.mime_type, "image/png");
            assert_eq!(second.mime_type, "image/jpeg");
            assert_eq!(first.data, "ZmFrZSBpbWFnZSBieXRlcw==");
        }
        other => panic!("unexpected request parts: {other:?}"),
    }

    for _ in 0..5 {
        runtime.mode.on_user_input(UserInputEvent::ChooseOption(0), &mut ctx);
        runtime.mode.on_user_input(UserInputEvent::NextQuestion, &mut ctx);
    }
    let run = runtime.mode.state().quiz_run().expect("quiz loaded");
    assert!(run.is_finished());
    assert_eq!(run.percentage(), 100);
}

#[tokio::test]
async fn test_materials_generation_then_new_files_clear_results() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = write_images(&dir, &["notes.webp"]);
    let second = write_images(&dir, &["more.png"]);
    let mock = Arc::new(MockModel::with_texts(vec![MATERIAL_JSON.to_string()]));
    let (mut runtime, mut ctx) =
        build_runtime_with_client(ApiClient::with_transport(mock), Locale::En);

    runtime
        .mode
        .on_user_input(UserInputEvent::Text(quoted(&first)), &mut ctx);
    runtime
        .mode
        .on_user_input(UserInputEvent::Generate(GeneratorKind::Materials), &mut ctx);
    assert!(runtime.mode.is_loading());
    assert!(runtime.apply_next_update(&mut ctx).await);

    let material = runtime.mode.state().materials().expect("materials loaded");
    assert_eq!(material.level, "A1");
    assert_eq!(material.study_guide.points.len(), 2);

    runtime
        .mode
        .on_user_input(UserInputEvent::Text(quoted(&second)), &mut ctx);
    let state = runtime.mode.state();
    assert_eq!(state.view(), View::Home);
    assert!(state.content().is_none());
    assert_eq!(state.files(), second.as_slice());
}

#[tokio::test]
async fn test_blocked_response_shows_generic_error_and_keeps_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = write_images(&dir, &["blurry.png"]);
    let blocked = serde_json::from_str(r#"{"promptFeedback":{"blockReason":"OTHER"}}"#)
        .expect("blocked response");
    let mock = Arc::new(MockModel::new(vec![MockReply::Response(blocked)]));
    let (mut runtime, mut ctx) =
        build_runtime_with_client(ApiClient::with_transport(mock), Locale::Fr);

    runtime
        .mode
        .on_user_input(UserInputEvent::Text(quoted(&paths)), &mut ctx);
    runtime
        .mode
        .on_user_input(UserInputEvent::Generate(GeneratorKind::Quiz), &mut ctx);
    assert!(runtime.apply_next_update(&mut ctx).await);

    let state = runtime.mode.state();
    assert_eq!(
        state.error(),
        Some(ErrorBanner::GenerationFailed(GeneratorKind::Quiz))
    );
    assert_eq!(state.files().len(), 1);
    assert!(!state.is_loading());

    let message = state
        .error()
        .map(|banner| banner.message(runtime.mode.translator()))
        .expect("error banner");
    assert!(message.contains("quiz"));
}
