use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, validate_email, validate_required};

/// A contact-form submission from the public site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub service_interested: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Create payload for `POST /contacts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub service_interested: String,
    pub message: String,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        validate_required("message", &self.message)?;
        Ok(())
    }
}
