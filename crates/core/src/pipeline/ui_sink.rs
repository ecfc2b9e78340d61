use crate::overlay::domain::overlay_state::OverlayState;

/// Receiver of UI-visible results, called only from the thread that owns
/// the [`LivenessSession`](crate::pipeline::liveness_session::LivenessSession).
pub trait UiSink {
    /// Pushed once per applied frame, even when unchanged.
    fn on_validity(&mut self, is_valid: bool);

    /// A notification cleared by the debouncer.
    fn show_message(&mut self, message: &str);

    /// The overlay was rebuilt and should be redrawn. Default: no-op.
    fn on_overlay_changed(&mut self, _overlay: &OverlayState) {}
}
