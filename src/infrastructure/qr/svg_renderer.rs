//! SVG QR renderer.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;

use super::service::{QrError, QrRenderer};

/// Smallest edge of the rendered image, in pixels.
const MIN_DIMENSION: u32 = 200;

/// Renders QR codes as SVG and wraps them in a `data:image/svg+xml` URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgQrRenderer;

impl QrRenderer for SvgQrRenderer {
    fn render_data_url(&self, text: &str) -> Result<String, QrError> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| QrError::Encoding(e.to_string()))?;

        let image = code
            .render::<svg::Color<'_>>()
            .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
            .build();

        Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_svg_data_url() {
        let url = SvgQrRenderer
            .render_data_url("https://sho.rt/abc123")
            .unwrap();

        let payload = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_different_text_gives_different_image() {
        let a = SvgQrRenderer.render_data_url("https://sho.rt/aaaaaa").unwrap();
        let b = SvgQrRenderer.render_data_url("https://sho.rt/bbbbbb").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_oversized_input_is_error() {
        let text = "x".repeat(8000);
        assert!(SvgQrRenderer.render_data_url(&text).is_err());
    }
}
