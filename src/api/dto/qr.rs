//! DTOs for QR code endpoint.

use serde::Serialize;

/// QR image for a short URL.
#[derive(Debug, Serialize)]
pub struct QrResponse {
    /// `data:image/svg+xml;base64,...`
    pub qr_code: String,
    pub short_url: String,
}
