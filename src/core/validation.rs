use crate::error::ValidationError;
use crate::models::{ImageUpload, UploadLimits};

/// Check an upload against the configured type and size limits
///
/// The type is checked first, then the size. File contents are never
/// inspected, so a renamed text file with an image MIME type passes.
pub fn validate_image(upload: &ImageUpload, limits: &UploadLimits) -> Result<(), ValidationError> {
    validate_content_type(&upload.content_type, limits)?;
    validate_size(upload.size(), limits)
}

/// Accepts a declared MIME type if its essence is one of the allowed types
///
/// Comparison ignores case and any `;`-parameters.
pub fn validate_content_type(content_type: &str, limits: &UploadLimits) -> Result<(), ValidationError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if limits
        .allowed_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&essence))
    {
        Ok(())
    } else {
        Err(ValidationError::InvalidType {
            content_type: content_type.to_string(),
        })
    }
}

pub fn validate_size(size: usize, limits: &UploadLimits) -> Result<(), ValidationError> {
    if size > limits.max_file_size_bytes {
        return Err(ValidationError::TooLarge {
            size,
            limit: limits.max_file_size_bytes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    fn upload(content_type: &str, size: usize) -> ImageUpload {
        ImageUpload::new("photo", content_type, vec![0u8; size])
    }

    #[test]
    fn test_accepts_supported_types() {
        let limits = UploadLimits::default();
        for content_type in ["image/jpeg", "image/jpg", "image/png", "image/webp"] {
            assert!(validate_image(&upload(content_type, 1024), &limits).is_ok());
        }
    }

    #[test]
    fn test_type_match_ignores_case_and_parameters() {
        let limits = UploadLimits::default();
        assert!(validate_content_type("IMAGE/PNG", &limits).is_ok());
        assert!(validate_content_type("image/jpeg; charset=binary", &limits).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let limits = UploadLimits::default();
        for content_type in ["text/plain", "image/gif", "application/pdf", ""] {
            let err = validate_image(&upload(content_type, 10), &limits).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidType { .. }));
        }
    }

    #[test]
    fn test_size_boundary() {
        let limits = UploadLimits::default();
        assert!(validate_size(10 * MIB, &limits).is_ok());

        let err = validate_size(10 * MIB + 1, &limits).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                size: 10 * MIB + 1,
                limit: 10 * MIB
            }
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let limits = UploadLimits::default();
        let err = validate_image(&upload("text/plain", 11 * MIB), &limits).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType { .. }));
    }

    #[test]
    fn test_contents_are_not_inspected() {
        let limits = UploadLimits::default();
        let fake = ImageUpload::new("notes.png", "image/png", b"just some text".to_vec());
        assert!(validate_image(&fake, &limits).is_ok());
    }
}
