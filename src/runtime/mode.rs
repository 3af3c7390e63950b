use super::context::RuntimeContext;
use super::frontend::UserInputEvent;
use super::update::UiUpdate;

pub trait RuntimeMode {
    fn on_user_input(&mut self, event: UserInputEvent, ctx: &mut RuntimeContext);
    fn on_model_update(&mut self, update: UiUpdate, ctx: &mut RuntimeContext);
    fn is_loading(&self) -> bool;
    fn quit_requested(&self) -> bool {
        false
    }
}
