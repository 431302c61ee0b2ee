//! Dual image viewer.
//!
//! A pure view over [`Session`] state: two slots (original photo, generated
//! headshot), each in exactly one of three display states. The interactive
//! CLI renders it as a status panel; nothing here mutates the session.

use crate::headshot::ImageFormat;
use crate::session::Session;

/// Display state of a single viewer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing to show yet.
    Empty,
    /// A generation request is in flight.
    Busy,
    /// An image is present.
    Present {
        /// Image format.
        format: ImageFormat,
        /// Decoded image size in bytes.
        size_bytes: usize,
    },
}

/// One titled viewer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Slot title.
    pub title: &'static str,
    /// Text shown while the slot is empty.
    pub placeholder: &'static str,
    /// Current display state.
    pub state: SlotState,
}

impl Slot {
    /// Renders the slot's content as a single line.
    pub fn describe(&self) -> String {
        match self.state {
            SlotState::Empty => self.placeholder.to_string(),
            SlotState::Busy => "Generating your headshot... this may take a moment".to_string(),
            SlotState::Present { format, size_bytes } => {
                format!("{} ({} bytes)", format.mime_type(), size_bytes)
            }
        }
    }
}

/// The original/generated image pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualView {
    /// The uploaded photo slot.
    pub original: Slot,
    /// The generated headshot slot.
    pub generated: Slot,
}

impl DualView {
    /// Derives the view from the current session state.
    pub fn from_session(session: &Session) -> Self {
        let original_state = match session.original() {
            Some(image) => SlotState::Present {
                format: image.format(),
                size_bytes: image.size(),
            },
            None => SlotState::Empty,
        };

        let generated_state = if session.is_generating() {
            SlotState::Busy
        } else {
            match session.generated() {
                Some(headshot) => SlotState::Present {
                    format: headshot.format,
                    size_bytes: headshot.size(),
                },
                None => SlotState::Empty,
            }
        };

        Self {
            original: Slot {
                title: "Original",
                placeholder: "No photo selected",
                state: original_state,
            },
            generated: Slot {
                title: "AI Headshot",
                placeholder: "Your AI headshot will appear here",
                state: generated_state,
            },
        }
    }

    /// Renders both slots as an aligned two-line panel.
    pub fn render(&self) -> String {
        format!(
            "{:>11}: {}\n{:>11}: {}",
            self.original.title,
            self.original.describe(),
            self.generated.title,
            self.generated.describe(),
        )
    }
}
