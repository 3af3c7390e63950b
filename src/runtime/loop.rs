use super::update::UiUpdate;
use std::time::Duration;
use tokio::sync::mpsc;

use super::{context::RuntimeContext, frontend::FrontendAdapter, mode::RuntimeMode};

const TICK_INTERVAL: Duration = Duration::from_millis(50);

pub struct Runtime<M: RuntimeMode> {
    pub mode: M,
    update_rx: mpsc::UnboundedReceiver<UiUpdate>,
}

impl<M: RuntimeMode> Runtime<M> {
    pub fn new(mode: M, update_rx: mpsc::UnboundedReceiver<UiUpdate>) -> Self {
        Self { mode, update_rx }
    }

    /// Drives the frontend until it or the mode asks to quit. State is only
    /// ever touched from this loop.
    pub async fn run<F: FrontendAdapter<M>>(&mut self, frontend: &mut F, ctx: &mut RuntimeContext) {
        let mut tick = tokio::time::interval(TICK_INTERVAL);
        while !self.should_stop(frontend) {
            frontend.render(&self.mode);
            if let Some(event) = frontend.poll_user_input(&self.mode) {
                self.mode.on_user_input(event, ctx);
            }
            self.drain_updates_nonblocking(ctx);
            if self.should_stop(frontend) {
                break;
            }

            tokio::select! {
                _ = tick.tick() => {}
                update = self.update_rx.recv() => {
                    if let Some(update) = update {
                        self.mode.on_model_update(update, ctx);
                    }
                }
            }
        }
        frontend.render(&self.mode);
    }

    /// Waits for one background update and applies it. Returns false once
    /// every sender is gone.
    pub async fn apply_next_update(&mut self, ctx: &mut RuntimeContext) -> bool {
        match self.update_rx.recv().await {
            Some(update) => {
                self.mode.on_model_update(update, ctx);
                true
            }
            None => false,
        }
    }

    fn should_stop<F: FrontendAdapter<M>>(&self, frontend: &F) -> bool {
        frontend.should_quit() || self.mode.quit_requested()
    }

    fn drain_updates_nonblocking(&mut self, ctx: &mut RuntimeContext) {
        while let Ok(update) = self.update_rx.try_recv() {
            self.mode.on_model_update(update, ctx);
        }
    }
}
