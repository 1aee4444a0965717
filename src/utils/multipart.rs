use axum::extract::Multipart;

use crate::{
    error::{AppError, Result},
    models::FormFields,
    services::UploadedFile,
};

/// Multipart field carrying the optional image.
pub const IMAGE_FIELD: &str = "imageFile";

#[derive(Debug, Default)]
pub struct FormData {
    pub fields: FormFields,
    pub file: Option<UploadedFile>,
}

/// Collects text fields and the `file_field` upload of a multipart form.
/// Every other field is read as text; repeated names keep the first value.
pub async fn read_form(mut multipart: Multipart, file_field: Option<&str>) -> Result<FormData> {
    let mut form = FormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if Some(name.as_str()) == file_field {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid upload: {}", e)))?;

            form.file = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form field {}: {}", name, e)))?;
        form.fields.entry(name).or_insert(value);
    }

    Ok(form)
}
