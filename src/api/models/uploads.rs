//! API models for file uploads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response after a successful file upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Public URL under which the uploaded file is served
    pub url: String,
    /// Original filename as supplied by the client
    pub filename: String,
    /// Size of the stored file in bytes
    pub size: usize,
}
