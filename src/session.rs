//! Application session state machine.
//!
//! [`Session`] owns the flow from photo selection to generated headshot:
//! `Idle` (no photo) -> `Ready` (photo present) -> `Generating` (request in
//! flight) -> back to `Ready` with either a result or an error. State is a
//! single tagged enum, so combinations like "generating with no photo"
//! cannot be represented.

use crate::error::Result;
use crate::headshot::{
    GeneratedHeadshot, HeadshotProvider, HeadshotRequest, HeadshotStyle, UploadedImage,
};

/// The coarse phase of a session, for display and trigger gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No photo selected.
    Idle,
    /// Photo present; may also hold a style, a result, or an error.
    Ready,
    /// A generation request is in flight.
    Generating,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Ready {
        original: UploadedImage,
        style: Option<HeadshotStyle>,
        generated: Option<GeneratedHeadshot>,
        error: Option<String>,
    },
    Generating {
        original: UploadedImage,
        style: HeadshotStyle,
    },
}

/// The application controller: one user's upload-and-generate session.
///
/// Reusable indefinitely; there is no terminal state.
#[derive(Debug, Default)]
pub struct Session {
    state: State,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Ready { .. } => Phase::Ready,
            State::Generating { .. } => Phase::Generating,
        }
    }

    /// Returns the uploaded photo, if any.
    pub fn original(&self) -> Option<&UploadedImage> {
        match &self.state {
            State::Idle => None,
            State::Ready { original, .. } | State::Generating { original, .. } => Some(original),
        }
    }

    /// Returns the selected style, if any.
    pub fn style(&self) -> Option<HeadshotStyle> {
        match &self.state {
            State::Idle => None,
            State::Ready { style, .. } => *style,
            State::Generating { style, .. } => Some(*style),
        }
    }

    /// Returns the generated headshot, if the last attempt succeeded.
    pub fn generated(&self) -> Option<&GeneratedHeadshot> {
        match &self.state {
            State::Ready { generated, .. } => generated.as_ref(),
            _ => None,
        }
    }

    /// Returns the most recent failure message, if the last attempt failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            State::Ready { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// True while a generation request is in flight.
    pub fn is_generating(&self) -> bool {
        matches!(self.state, State::Generating { .. })
    }

    /// True when the generate trigger should be enabled: photo and style
    /// both present, and nothing already in flight.
    pub fn can_generate(&self) -> bool {
        matches!(
            self.state,
            State::Ready {
                style: Some(_),
                ..
            }
        )
    }

    /// Stores a newly uploaded photo, discarding any previous result,
    /// error, and style selection. Valid from any state.
    pub fn select_image(&mut self, image: UploadedImage) {
        tracing::debug!(mime_type = %image.mime_type, "photo selected");
        self.state = State::Ready {
            original: image,
            style: None,
            generated: None,
            error: None,
        };
    }

    /// Selects the headshot style. A no-op unless a photo is present and no
    /// request is in flight.
    pub fn select_style(&mut self, selected: HeadshotStyle) {
        if let State::Ready { style, .. } = &mut self.state {
            tracing::debug!(style = selected.as_str(), "style selected");
            *style = Some(selected);
        }
    }

    /// Clears everything and returns to `Idle`. Valid from any state.
    pub fn reset(&mut self) {
        tracing::debug!("session reset");
        self.state = State::Idle;
    }

    /// Starts a generation attempt.
    ///
    /// Moves to `Generating` and returns the request to send, clearing any
    /// previous result and error. Returns `None` (leaving state untouched)
    /// when the photo or style is missing, or a request is already in
    /// flight.
    pub fn begin_generation(&mut self) -> Option<HeadshotRequest> {
        match std::mem::take(&mut self.state) {
            State::Ready {
                original,
                style: Some(style),
                ..
            } => {
                tracing::debug!(style = style.as_str(), "generation started");
                let request = HeadshotRequest::new(original.clone(), style);
                self.state = State::Generating { original, style };
                Some(request)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Applies the outcome of a generation attempt.
    ///
    /// Success stores the headshot and clears the error; failure stores the
    /// error message and leaves the headshot empty. A completion arriving
    /// when no request is pending (the photo was replaced or the session
    /// reset mid-flight) is dropped.
    pub fn complete_generation(&mut self, result: Result<GeneratedHeadshot>) {
        match std::mem::take(&mut self.state) {
            State::Generating { original, style } => {
                let (generated, error) = match result {
                    Ok(headshot) => {
                        tracing::debug!(bytes = headshot.size(), "generation succeeded");
                        (Some(headshot), None)
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "generation failed");
                        (None, Some(e.to_string()))
                    }
                };
                self.state = State::Ready {
                    original,
                    style: Some(style),
                    generated,
                    error,
                };
            }
            other => {
                tracing::debug!("dropping stale generation result");
                self.state = other;
            }
        }
    }

    /// Runs one full generation attempt against the given provider.
    ///
    /// A no-op when [`Session::can_generate`] is false.
    pub async fn generate<P: HeadshotProvider + ?Sized>(&mut self, provider: &P) {
        let Some(request) = self.begin_generation() else {
            return;
        };
        let result = provider.generate(&request).await;
        self.complete_generation(result);
    }
}
