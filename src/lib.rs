#![warn(missing_docs)]
//! Proshot - AI professional headshot generation.
//!
//! This crate turns a portrait photo into a studio-quality professional
//! headshot by sending it, together with a two-valued style option, to
//! Google's Gemini image model.
//!
//! # Quick Start
//!
//! ```no_run
//! use proshot::{GeminiProvider, HeadshotStyle, Session, UploadedImage};
//!
//! #[tokio::main]
//! async fn main() -> proshot::Result<()> {
//!     let provider = GeminiProvider::builder().build()?;
//!
//!     let mut session = Session::new();
//!     session.select_image(UploadedImage::from_file("portrait.jpg")?);
//!     session.select_style(HeadshotStyle::Male);
//!     session.generate(&provider).await;
//!
//!     match session.generated() {
//!         Some(headshot) => headshot.save("ai-headshot.png")?,
//!         None => eprintln!("{}", session.error().unwrap_or("no result")),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`UploadedImage`]: file encoder - bytes to base64 payload + data URL.
//! - [`HeadshotProvider`]: the narrow trait over the external generation
//!   API; [`GeminiProvider`] is the production implementation.
//! - [`Session`]: the controller state machine (idle, ready, generating).
//! - [`view::DualView`]: original/generated pair rendering.

mod error;
pub mod headshot;
mod session;
pub mod view;

// Re-export error types at crate root
pub use error::{HeadshotError, Result};

// Re-export commonly used types
pub use headshot::providers::{GeminiModel, GeminiProvider, GeminiProviderBuilder};
pub use headshot::{
    decode_data_url, GeneratedHeadshot, GenerationMetadata, HeadshotProvider, HeadshotRequest,
    HeadshotStyle, ImageFormat, UploadedImage, MAX_UPLOAD_BYTES,
};
pub use session::{Phase, Session};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{HeadshotError, Result};
    pub use crate::headshot::providers::GeminiProvider;
    pub use crate::headshot::{
        GeneratedHeadshot, HeadshotProvider, HeadshotRequest, HeadshotStyle, UploadedImage,
    };
    pub use crate::session::{Phase, Session};
    pub use crate::view::DualView;
}
