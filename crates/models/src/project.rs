use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, upload::FileUpload, validate_required};

/// A portfolio project shown on the public site and managed in the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub client: String,
    pub scope: String,
    /// URL of the uploaded image, assigned by the backend.
    #[serde(default)]
    pub image: Option<String>,
}

/// Form data for creating or updating a project. The image travels as a
/// multipart file part, so this is not a serialized payload.
#[derive(Clone, Debug, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub scope: String,
    pub image: Option<FileUpload>,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("name", &self.name)?;
        validate_required("client", &self.client)?;
        validate_required("scope", &self.scope)?;
        Ok(())
    }
}
