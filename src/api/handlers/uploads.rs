//! File upload endpoint (admin).
//!
//! Files stream to the configured uploads directory under a generated name
//! and are served back under the public prefix as static assets. The size
//! limit is enforced incrementally so an oversized upload aborts early; the
//! partial file is removed on abort.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{
    api::models::{uploads::UploadResponse, users::CurrentUser},
    auth::utils::require_admin,
    errors::Error,
    AppState,
};

/// File extensions preserved on the stored name so the static file server
/// infers a sensible content type.
fn sanitized_extension(filename: &str) -> Option<&str> {
    let ext = filename.rsplit_once('.')?.1;
    if !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

/// Upload a file (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/uploads",
    tag = "admin",
    request_body(content_type = "multipart/form-data", description = "File upload under a `file` field"),
    responses(
        (status = 201, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Invalid multipart payload"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 413, description = "File too large"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn upload_file(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), Error> {
    require_admin(&current_user, "uploads")?;

    let uploads_dir = std::path::Path::new(&state.config.uploads.dir);
    tokio::fs::create_dir_all(uploads_dir).await.map_err(|e| Error::Internal {
        operation: format!("create uploads directory: {e}"),
    })?;

    let max_file_size = state.config.uploads.max_file_size;

    while let Some(mut field) = multipart.next_field().await.map_err(|e| Error::BadRequest {
        message: format!("Failed to parse multipart data: {e}"),
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field.file_name().unwrap_or("upload").to_string();
        let stored_name = match sanitized_extension(&original_filename) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = uploads_dir.join(&stored_name);

        let mut file = tokio::fs::File::create(&path).await.map_err(|e| Error::Internal {
            operation: format!("create upload file: {e}"),
        })?;

        let mut total_size = 0usize;
        let write_result: Result<(), Error> = async {
            while let Some(chunk) = field.chunk().await.map_err(|e| Error::BadRequest {
                message: format!("Failed to read file chunk: {e}"),
            })? {
                total_size += chunk.len();
                if total_size > max_file_size {
                    return Err(Error::PayloadTooLarge {
                        message: format!("File exceeds maximum allowed size of {max_file_size} bytes"),
                    });
                }
                file.write_all(&chunk).await.map_err(|e| Error::Internal {
                    operation: format!("write upload chunk: {e}"),
                })?;
            }
            file.flush().await.map_err(|e| Error::Internal {
                operation: format!("flush upload file: {e}"),
            })
        }
        .await;

        if let Err(e) = write_result {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial upload {}: {remove_err}", path.display());
            }
            return Err(e);
        }

        tracing::info!(filename = %original_filename, stored = %stored_name, size = total_size, "File uploaded");

        let url = format!("{}/{}", state.config.uploads.public_prefix.trim_end_matches('/'), stored_name);
        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url,
                filename: original_filename,
                size: total_size,
            }),
        ));
    }

    Err(Error::BadRequest {
        message: "Multipart payload must contain a 'file' field".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_extension() {
        assert_eq!(sanitized_extension("photo.png"), Some("png"));
        assert_eq!(sanitized_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(sanitized_extension("no_extension"), None);
        assert_eq!(sanitized_extension("trailing."), None);
        assert_eq!(sanitized_extension("weird.../../etc"), None);
    }
}
