use crate::errors::ModelError;

/// Résumé uploads are capped at 5 MB by the apply form.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// An in-memory file destined for a multipart request part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn check_resume_size(&self) -> Result<(), ModelError> {
        if self.bytes.len() > MAX_RESUME_BYTES {
            return Err(ModelError::Validation(
                "file size should be less than 5MB".into(),
            ));
        }
        Ok(())
    }
}
