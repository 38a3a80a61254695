//! QR renderer trait and error types.

/// Errors that can occur while rendering a QR code.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encoding(String),
}

/// Renders text as a QR code image.
///
/// # Implementations
///
/// - [`crate::infrastructure::qr::SvgQrRenderer`] - SVG in a base64 data URL
pub trait QrRenderer: Send + Sync {
    /// Returns a self-contained image (a `data:` URL) encoding `text`.
    fn render_data_url(&self, text: &str) -> Result<String, QrError>;
}
