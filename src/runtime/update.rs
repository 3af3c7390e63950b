use crate::state::GenerationOutcome;

/// Messages from background generation tasks back to the event loop.
#[derive(Debug)]
pub enum UiUpdate {
    GenerationFinished(GenerationOutcome),
}
