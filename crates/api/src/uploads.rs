//! Local object storage for uploaded files.
//!
//! Three logical buckets (`drawings`, `photos`, `invoices`) live under the
//! configured storage directory. Storing a file returns the public URL it
//! will be served from (the router mounts the storage directory under the
//! configured public base path).

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Bucket for technical drawings.
pub const BUCKET_DRAWINGS: &str = "drawings";
/// Bucket for site photos.
pub const BUCKET_PHOTOS: &str = "photos";
/// Bucket for invoice documents.
pub const BUCKET_INVOICES: &str = "invoices";

/// File extensions accepted for drawings and photos.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
/// File extensions accepted for invoice documents.
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

/// A multipart field extracted into memory.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Text fields plus the file field pulled from a multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    /// Remaining text fields by name.
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    /// Look up a text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Drain a multipart request into an [`UploadForm`].
///
/// The file is expected in a field named `file`; all other fields are kept
/// as text.
pub async fn read_multipart(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.file = Some(UploadedFile {
                filename,
                data: data.to_vec(),
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.fields.push((name, text));
        }
    }

    Ok(form)
}

/// Lowercased extension of a filename, or empty string.
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Validate the extension against the bucket's accepted set.
fn validate_extension(bucket: &str, ext: &str) -> AppResult<()> {
    let accepted = match bucket {
        BUCKET_INVOICES => DOCUMENT_EXTENSIONS,
        _ => IMAGE_EXTENSIONS,
    };
    if !accepted.contains(&ext) {
        return Err(AppError::BadRequest(format!(
            "Unsupported file format '.{ext}'. Supported: {}",
            accepted
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

/// Store an uploaded file into a bucket and return its public URL.
///
/// The stored name is a UUID plus the original extension, so uploads never
/// collide and the original filename cannot traverse directories.
pub async fn store_file(
    config: &ServerConfig,
    bucket: &str,
    file: &UploadedFile,
) -> AppResult<String> {
    let ext = extension_of(&file.filename);
    validate_extension(bucket, &ext)?;

    let bucket_dir: PathBuf = config.storage_dir.join(bucket);
    tokio::fs::create_dir_all(&bucket_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_filename = format!("{}.{ext}", Uuid::new_v4());
    let file_path = bucket_dir.join(&stored_filename);
    tokio::fs::write(&file_path, &file.data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(format!(
        "{}/{bucket}/{stored_filename}",
        config.public_files_base.trim_end_matches('/')
    ))
}

/// Read pixel dimensions from an image header without decoding the full
/// image. Returns `None` for non-image data (e.g. PDFs).
pub fn image_dimensions(data: &[u8]) -> Option<(i32, i32)> {
    let reader = image::ImageReader::new(std::io::Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    let (w, h) = reader.into_dimensions().ok()?;
    Some((w as i32, h as i32))
}
