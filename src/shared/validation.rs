use crate::shared::error::ApiError;

pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PHOTO_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// A file picked by the user, held in memory until it is sent as one part of
/// a multipart request. Uploads are atomic; there is no chunking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Checks a filled or blank application form before it goes on the wire.
/// The server re-validates; this only saves the user a round trip.
pub fn validate_application_pdf(file: &FileUpload) -> Result<(), ApiError> {
    if file.content_type != PDF_CONTENT_TYPE {
        return Err(ApiError::Validation(
            "Only PDF files are accepted.".to_string(),
        ));
    }
    if file.bytes.len() > MAX_PDF_BYTES {
        return Err(ApiError::Validation(
            "File size must not exceed 10MB.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_profile_photo(file: &FileUpload) -> Result<(), ApiError> {
    if !PHOTO_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err(ApiError::Validation(
            "Only JPEG, PNG, or WEBP images are accepted.".to_string(),
        ));
    }
    if file.bytes.len() > MAX_PHOTO_BYTES {
        return Err(ApiError::Validation(
            "Image must be under 5MB.".to_string(),
        ));
    }
    Ok(())
}
