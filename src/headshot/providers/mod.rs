//! Provider implementations.

mod gemini;

pub use gemini::{GeminiModel, GeminiProvider, GeminiProviderBuilder};
