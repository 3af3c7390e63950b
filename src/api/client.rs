use super::logging::{emit_debug_payload, emit_response_parse_error};
use super::prompt::{quiz_prompt, LEARNING_MATERIALS_PROMPT};
use super::schema::{learning_material_schema, quiz_schema};
use super::validate::{parse_learning_material, parse_quiz};
use crate::config::Config;
use crate::error::{GenerationError, GenerationResult};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, LearningMaterial,
    Part, QuestionCount, Quiz, QuizLanguage, UploadedImage,
};
use crate::util::is_local_endpoint_url;
use anyhow::Result;
use futures::future::BoxFuture;
use std::sync::Arc;

const JSON_MIME_TYPE: &str = "application/json";
const ERROR_BODY_PREVIEW_CHARS: usize = 512;

/// One request/response exchange with the generation model.
pub trait ModelTransport: Send + Sync {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
    ) -> BoxFuture<'a, GenerationResult<GenerateContentResponse>>;
}

/// Stateless client for the two generation operations. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ModelTransport>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    pub async fn generate_learning_materials(
        &self,
        images: &[UploadedImage],
    ) -> GenerationResult<LearningMaterial> {
        let request = build_request(LEARNING_MATERIALS_PROMPT, images, learning_material_schema());
        let text = self.request_text(&request).await?;
        parse_learning_material(&text).inspect_err(|error| {
            emit_response_parse_error("materials", &text, error);
        })
    }

    pub async fn generate_quiz(
        &self,
        images: &[UploadedImage],
        question_count: QuestionCount,
        language: QuizLanguage,
    ) -> GenerationResult<Quiz> {
        let prompt = quiz_prompt(question_count, language);
        let request = build_request(&prompt, images, quiz_schema());
        let text = self.request_text(&request).await?;
        let quiz = parse_quiz(&text).inspect_err(|error| {
            emit_response_parse_error("quiz", &text, error);
        })?;

        if quiz.len() != usize::from(question_count.get()) {
            tracing::info!(
                requested = question_count.get(),
                received = quiz.len(),
                "model returned a different number of quiz questions"
            );
        }
        Ok(quiz)
    }

    async fn request_text(&self, request: &GenerateContentRequest) -> GenerationResult<String> {
        let response = self.transport.generate_content(request).await?;
        if let Some(reason) = response.block_reason() {
            return Err(GenerationError::Blocked(format!("prompt blocked: {reason}")));
        }
        let Some(text) = response.text() else {
            let finish_reason = response
                .candidates
                .first()
                .and_then(|candidate| candidate.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(GenerationError::Blocked(finish_reason));
        };
        Ok(text.trim().to_string())
    }
}

/// Text part first, then one inline part per image.
pub fn build_request(
    prompt: &str,
    images: &[UploadedImage],
    response_schema: serde_json::Value,
) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    parts.extend(images.iter().cloned().map(|inline_data| Part::InlineData { inline_data }));

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: GenerationConfig {
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema,
        },
    }
}

/// `generateContent` over HTTPS.
pub struct HttpTransport {
    http: reqwest::Client,
    api_key: String,
    request_url: String,
    debug_payload: bool,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_key: config.api_key.clone(),
            request_url: generate_content_url(&config.api_url, &config.model),
            debug_payload: config.debug_payload,
        })
    }

    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> GenerationResult<GenerateContentResponse> {
        if self.debug_payload {
            if let Ok(payload) = serde_json::to_value(request) {
                emit_debug_payload(&self.request_url, &payload);
            }
        }

        let response = self
            .http
            .post(&self.request_url)
            .header("content-type", JSON_MIME_TYPE)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|error| map_api_request_error(error, &self.request_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            return Err(GenerationError::Transport(format!(
                "API endpoint '{}' returned HTTP {}: {}",
                self.request_url, status, preview
            )));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|error| map_api_request_error(error, &self.request_url))
    }
}

impl ModelTransport for HttpTransport {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
    ) -> BoxFuture<'a, GenerationResult<GenerateContentResponse>> {
        Box::pin(self.send(request))
    }
}

fn generate_content_url(api_url: &str, model: &str) -> String {
    let base = api_url.trim().trim_end_matches('/');
    if base.ends_with(":generateContent") {
        return base.to_string();
    }
    format!("{base}/models/{model}:generateContent")
}

fn map_api_request_error(error: reqwest::Error, request_url: &str) -> GenerationError {
    let message = if error.is_connect() && is_local_endpoint_url(request_url) {
        format!(
            "cannot reach local API endpoint '{request_url}': {error}. Start your local server or update FUSION_API_URL."
        )
    } else if error.is_connect() {
        format!("cannot reach API endpoint '{request_url}': {error}")
    } else if error.is_timeout() {
        format!("API request to '{request_url}' timed out: {error}")
    } else if error.is_decode() {
        format!("API endpoint '{request_url}' returned an unreadable response: {error}")
    } else {
        format!("API request to '{request_url}' failed: {error}")
    };
    GenerationError::Transport(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_client::{MockModel, MockReply};
    use crate::test_support::{quiz_json, MATERIAL_JSON};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn sample_images() -> Vec<UploadedImage> {
        vec![
            UploadedImage {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            },
            UploadedImage {
                mime_type: "image/jpeg".to_string(),
                data: "BBBB".to_string(),
            },
        ]
    }

    fn stub_config(api_url: String) -> Config {
        Config {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_url,
            locale: Default::default(),
            log_path: std::env::temp_dir().join("fusion-test.log"),
            debug_payload: false,
        }
    }

    fn request_complete(received: &[u8]) -> bool {
        let Some(header_end) = received.windows(4).position(|window| window == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&received[..header_end]);
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        received.len() >= header_end + 4 + content_length
    }

    /// Serves one HTTP response on a local port and hands back the raw request.
    async fn serve_once(status: &str, body: String) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local server");
        let addr = listener.local_addr().expect("local address");
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let (request_tx, request_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept connection");
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&received) {
                let read = socket.read(&mut buf).await.expect("read request");
                if read == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..read]);
            }
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
            let _ = request_tx.send(String::from_utf8_lossy(&received).into_owned());
        });

        (format!("http://{addr}"), request_rx)
    }

    #[test]
    fn test_generate_content_url_appends_model_path() {
        assert_eq!(
            generate_content_url(
                "https://generativelanguage.googleapis.com/v1beta/",
                "gemini-2.5-flash"
            ),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            generate_content_url("http://localhost:9000/models/x:generateContent", "ignored"),
            "http://localhost:9000/models/x:generateContent"
        );
    }

    #[test]
    fn test_build_request_puts_prompt_before_images() {
        let request = build_request("prompt", &sample_images(), quiz_schema());
        let value = serde_json::to_value(&request).expect("serialize request");
        let parts = value["contents"][0]["parts"]
            .as_array()
            .expect("parts must be an array");

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "prompt");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[2]["inlineData"]["data"], "BBBB");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[tokio::test]
    async fn test_generate_quiz_sends_parameters_and_returns_quiz() {
        let mock = Arc::new(MockModel::with_texts(vec![quiz_json(5)]));
        let client = ApiClient::with_transport(mock.clone());

        let quiz = client
            .generate_quiz(&sample_images(), QuestionCount::new(5), QuizLanguage::Spanish)
            .await
            .expect("quiz should generate");

        assert_eq!(quiz.len(), 5);
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let Part::Text { text } = &requests[0].contents[0].parts[0] else {
            panic!("first part must be the prompt");
        };
        assert!(text.contains("exactly 5 multiple-choice questions"));
        assert!(text.contains("MUST be in **Spanish**"));
        assert_eq!(requests[0].contents[0].parts.len(), 3);
    }

    #[tokio::test]
    async fn test_generate_quiz_with_invalid_json_is_an_error() {
        let mock = Arc::new(MockModel::with_texts(vec!["not json".to_string()]));
        let client = ApiClient::with_transport(mock);

        let error = client
            .generate_quiz(&sample_images(), QuestionCount::default(), QuizLanguage::French)
            .await
            .expect_err("invalid json must fail");
        assert!(matches!(error, GenerationError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_generate_materials_trims_response_text() {
        let padded = format!("\n  {MATERIAL_JSON}  \n");
        let mock = Arc::new(MockModel::with_texts(vec![padded]));
        let client = ApiClient::with_transport(mock.clone());

        let result = client
            .generate_learning_materials(&sample_images())
            .await
            .expect("materials should generate");

        assert_eq!(result.level, "A2");
        let schema = &mock.requests()[0].generation_config.response_schema;
        assert_eq!(schema["type"], "OBJECT");
    }

    #[tokio::test]
    async fn test_blocked_prompt_surfaces_as_blocked_error() {
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
                .expect("parse blocked response");
        let mock = Arc::new(MockModel::new(vec![MockReply::Response(blocked)]));
        let client = ApiClient::with_transport(mock);

        let error = client
            .generate_learning_materials(&sample_images())
            .await
            .expect_err("blocked prompt must fail");
        assert!(matches!(error, GenerationError::Blocked(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates_unchanged() {
        let mock = Arc::new(MockModel::new(vec![MockReply::TransportError(
            "connection refused".to_string(),
        )]));
        let client = ApiClient::with_transport(mock);

        let error = client
            .generate_learning_materials(&sample_images())
            .await
            .expect_err("transport failure must fail");
        assert!(matches!(error, GenerationError::Transport(message) if message == "connection refused"));
    }

    #[tokio::test]
    async fn test_http_error_status_is_a_transport_error_with_status() {
        let (api_url, request_rx) =
            serve_once("503 Service Unavailable", r#"{"error":"overloaded"}"#.to_string()).await;
        let client = ApiClient::new(&stub_config(api_url)).expect("client");

        let error = client
            .generate_learning_materials(&sample_images())
            .await
            .expect_err("503 must fail");

        let message = match error {
            GenerationError::Transport(message) => message,
            other => panic!("expected transport error, got {other:?}"),
        };
        assert!(message.contains("503"), "{message}");
        assert!(message.contains("overloaded"), "{message}");

        let request = request_rx.await.expect("request captured");
        assert!(request.starts_with("POST /models/gemini-2.5-flash:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    }

    #[tokio::test]
    async fn test_candidate_finish_reason_without_text_is_blocked() {
        let (api_url, _request_rx) = serve_once(
            "200 OK",
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#.to_string(),
        )
        .await;
        let client = ApiClient::new(&stub_config(api_url)).expect("client");

        let error = client
            .generate_quiz(&sample_images(), QuestionCount::default(), QuizLanguage::French)
            .await
            .expect_err("blocked candidate must fail");

        assert!(matches!(error, GenerationError::Blocked(reason) if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn test_http_response_with_unknown_parts_still_yields_quiz() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "thoughtSignature": "abc" }, { "text": quiz_json(3) }]
                },
                "finishReason": "STOP"
            }]
        })
        .to_string();
        let (api_url, _request_rx) = serve_once("200 OK", body).await;
        let client = ApiClient::new(&stub_config(api_url)).expect("client");

        let quiz = client
            .generate_quiz(&sample_images(), QuestionCount::new(3), QuizLanguage::English)
            .await
            .expect("text part must be parsed");

        assert_eq!(quiz.len(), 3);
    }
}
