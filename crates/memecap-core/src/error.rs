//! Error types for memecap

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemecapError>;

/// Main error type for memecap
#[derive(Debug, Error)]
pub enum MemecapError {
    /// A width, size, or option was NaN, infinite, or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The character has no probed width for this family
    #[error("No width metric for {ch:?} in font family '{family}'")]
    MissingMetric { ch: char, family: String },

    #[error("Resource loading failed: {0}")]
    ResourceLoad(#[from] ResourceLoadError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Background image loading errors
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Image could not be decoded: {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font family not found: {0}")]
    FamilyNotFound(String),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixmap creation failed")]
    PixmapCreationFailed,

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Bitmap buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_metric_message_names_character() {
        let err = MemecapError::MissingMetric {
            ch: 'é',
            family: "Impact".into(),
        };
        let message = err.to_string();
        assert!(message.contains("'é'"), "{message}");
        assert!(message.contains("Impact"), "{message}");
    }

    #[test]
    fn test_nested_errors_convert() {
        let err: MemecapError = FontLoadError::FamilyNotFound("Comic Sans".into()).into();
        assert!(matches!(err, MemecapError::FontLoad(_)));
    }
}
