use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;

use super::filename::upload_file_name;
use crate::error::AppError;
use crate::services::FileUpload;

/// A `multipart/form-data` body buffered into text fields and files.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, FileUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(raw_name) => {
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read file '{name}': {e}"))
                    })?;
                    // Browsers submit an empty, unnamed part for an untouched file input.
                    if raw_name.trim().is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let file_name = upload_file_name(&raw_name)
                        .map_err(|e| AppError::Validation(e.message().into()))?
                        .to_string();
                    form.files.insert(
                        name,
                        FileUpload {
                            file_name,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read field '{name}': {e}"))
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed text of a field; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed text of a field, empty when absent.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, AppError> {
        self.text(name)
            .map(|v| {
                v.parse()
                    .map_err(|_| AppError::Validation(format!("Invalid value for '{name}': {v}")))
            })
            .transpose()
    }

    /// Checkbox-style boolean: `true`, `1`, `on` or `yes` (any case) is set, anything else is not.
    pub fn flag(&self, name: &str) -> bool {
        self.text(name).is_some_and(|v| {
            ["true", "1", "on", "yes"]
                .iter()
                .any(|t| v.eq_ignore_ascii_case(t))
        })
    }

    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }
}

#[cfg(test)]
impl MultipartForm {
    pub(crate) fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }
}
