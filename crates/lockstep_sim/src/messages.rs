//! Player-facing messages
//!
//! The core never renders text; it asks the presentation layer to show a
//! message for a duration and keeps just enough state to enforce the
//! display rules: at most one message at a time, prompts yield to whatever
//! is already showing, interaction results always take over immediately.

/// Presentation layer contract. Text rendering and localization live
/// behind this.
pub trait Presentation {
    /// Show `text` for `duration` seconds, replacing any current message
    fn show_message(&mut self, text: &str, duration: f32);
}

#[derive(Debug)]
struct ActiveMessage {
    text: String,
    remaining: f32,
}

/// Tracks the single active message and its remaining display time
#[derive(Debug, Default)]
pub struct MessageChannel {
    active: Option<ActiveMessage>,
}

impl MessageChannel {
    /// Create with no active message
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a message is currently showing
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Text of the active message, if any
    pub fn active_text(&self) -> Option<&str> {
        self.active.as_ref().map(|m| m.text.as_str())
    }

    /// Count down and expire the active message
    pub fn update(&mut self, dt: f32) {
        if let Some(message) = self.active.as_mut() {
            message.remaining -= dt;
            if message.remaining <= 0.0 {
                self.active = None;
            }
        }
    }

    /// Show a low-priority message (the interact prompt). Does nothing
    /// while another message is up. Returns whether it was shown.
    pub fn request(&mut self, presentation: &mut dyn Presentation, text: &str, duration: f32) -> bool {
        if self.is_active() {
            return false;
        }
        self.show(presentation, text, duration);
        true
    }

    /// Show an interaction result, replacing whatever is up
    pub fn force(&mut self, presentation: &mut dyn Presentation, text: &str, duration: f32) {
        self.show(presentation, text, duration);
    }

    fn show(&mut self, presentation: &mut dyn Presentation, text: &str, duration: f32) {
        presentation.show_message(text, duration);
        self.active = Some(ActiveMessage {
            text: text.to_owned(),
            remaining: duration,
        });
    }
}
