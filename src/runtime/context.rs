use super::update::UiUpdate;
use crate::api::ApiClient;
use crate::encoder::encode_images;
use crate::error::GenerationResult;
use crate::state::{GenerationOutcome, GenerationRequest};
use crate::types::GeneratorKind;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Owned context passed into every `RuntimeMode` callback.
pub struct RuntimeContext {
    client: ApiClient,
    update_tx: mpsc::UnboundedSender<UiUpdate>,
}

impl RuntimeContext {
    pub fn new(client: ApiClient, update_tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self { client, update_tx }
    }

    /// Spawns the request. Exactly one `UiUpdate::GenerationFinished` is sent
    /// back when it completes, success or not.
    pub fn start_generation(&mut self, request: GenerationRequest) -> JoinHandle<()> {
        let client = self.client.clone();
        let tx = self.update_tx.clone();

        tokio::spawn(async move {
            let outcome = run_generation(&client, &request).await;
            if tx.send(UiUpdate::GenerationFinished(outcome)).is_err() {
                tracing::debug!(kind = %request.kind, "event loop gone; dropping generation result");
            }
        })
    }
}

/// Encodes the selected files and runs one generation. Every failure is
/// logged and collapsed into `GenerationOutcome::Failed`.
pub async fn run_generation(client: &ApiClient, request: &GenerationRequest) -> GenerationOutcome {
    match generate(client, request).await {
        Ok(outcome) => {
            tracing::info!(kind = %request.kind, "generation finished");
            outcome
        }
        Err(error) => {
            tracing::error!(kind = %request.kind, error = %error, "generation failed");
            GenerationOutcome::Failed(request.kind)
        }
    }
}

async fn generate(
    client: &ApiClient,
    request: &GenerationRequest,
) -> GenerationResult<GenerationOutcome> {
    let images = encode_images(&request.files).await?;
    match request.kind {
        GeneratorKind::Materials => client
            .generate_learning_materials(&images)
            .await
            .map(GenerationOutcome::Materials),
        GeneratorKind::Quiz => client
            .generate_quiz(&images, request.question_count, request.quiz_language)
            .await
            .map(GenerationOutcome::Quiz),
    }
}
