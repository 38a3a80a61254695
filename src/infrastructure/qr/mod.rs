//! QR code rendering for short URLs.

pub mod service;
pub mod svg_renderer;

pub use service::{QrError, QrRenderer};
pub use svg_renderer::SvgQrRenderer;
