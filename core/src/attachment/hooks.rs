// stockroom/src/attachment/hooks.rs

//! Observers for phase changes of a run.

use tracing::{event, Level};

use super::definition::AttachmentPipeline;
use super::phase::UploadPhase;

/// Called synchronously on every phase change, in registration order.
/// Hooks observe only; they cannot alter or stop a run.
pub type PhaseHook = Box<dyn Fn(&UploadPhase) + Send + Sync>;

impl AttachmentPipeline {
  pub fn on_phase(&mut self, hook: impl Fn(&UploadPhase) + Send + Sync + 'static) -> &mut Self {
    self.hooks.push(Box::new(hook));
    event!(Level::DEBUG, hooks = self.hooks.len(), "Phase hook registered.");
    self
  }

  pub(crate) fn notify(&self, phase: &UploadPhase) {
    event!(Level::TRACE, ?phase, "Upload phase changed.");
    for hook in &self.hooks {
      hook(phase);
    }
  }
}
