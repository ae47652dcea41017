pub mod gemini;
pub mod media;

pub use gemini::generate_enhanced_image;
pub use media::PhotoPayload;
