use std::collections::HashMap;

use axum::extract::Multipart;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AppError, Result};

/// A file part pulled out of a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Text fields plus at most one file from a multipart request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl UploadForm {
    /// Reads every part. The part named `file_field` is kept as bytes, every
    /// other part is read as text.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == file_field {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

                if !data.is_empty() {
                    form.file = Some(UploadedFile {
                        content_type,
                        data: data.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field {}: {}", name, e)))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn required_text(&self, name: &str) -> Result<String> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("Missing required field: {}", name)))
    }
}

/// Encodes an uploaded file as Base64 after checking its size and, when the
/// client sent one, its content type.
pub fn encode_upload(
    file: &UploadedFile,
    allowed_type_prefixes: &[&str],
    max_bytes: usize,
) -> Result<String> {
    if file.data.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "File too large (max {} bytes)",
            max_bytes
        )));
    }

    if let Some(ref content_type) = file.content_type {
        if !allowed_type_prefixes.iter().any(|p| content_type.starts_with(p)) {
            return Err(AppError::Validation(format!(
                "Invalid file type {}. Allowed: {}",
                content_type,
                allowed_type_prefixes.join(", ")
            )));
        }
    }

    Ok(STANDARD.encode(&file.data))
}
