//! Headshot generation module.

mod provider;
pub mod providers;
mod types;

pub use provider::{HeadshotProvider, HeadshotRequest};
pub use types::{
    decode_data_url, GeneratedHeadshot, GenerationMetadata, HeadshotStyle, ImageFormat,
    UploadedImage, MAX_UPLOAD_BYTES,
};
