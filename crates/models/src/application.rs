use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, upload::FileUpload, validate_email, validate_required};

/// A submitted job application, linked to a posting by `careerId`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
    pub career_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_link: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Apply-form data. The résumé is mandatory and travels as a multipart part.
#[derive(Clone, Debug, Default)]
pub struct ApplicationDraft {
    pub career_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub cover_letter: String,
    pub resume: FileUpload,
}

impl ApplicationDraft {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("applicantName", &self.applicant_name)?;
        validate_email(&self.applicant_email)?;
        validate_required("applicantPhone", &self.applicant_phone)?;
        if self.resume.bytes.is_empty() {
            return Err(ModelError::Validation("please upload your resume".into()));
        }
        self.resume.check_resume_size()
    }
}
