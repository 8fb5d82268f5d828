use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapstripError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode image: {0}")]
    Decode(image::ImageError),
    #[error("template bitmap is not ready")]
    TemplateNotReady,
    #[error("slot index {index} out of range (layout has {count} slots)")]
    SlotIndex { index: usize, count: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SnapstripError>;
