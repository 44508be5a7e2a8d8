use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, upload::FileUpload, validate_email, validate_required};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// A back-office user listed on the Team page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub role: Role,
    /// Avatar URL assigned by the backend after upload.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Form data for registering or updating a team member. Sent as multipart
/// because the avatar is a file part; password only applies on create.
#[derive(Clone, Debug, Default)]
pub struct TeamMemberDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub phone: String,
    pub age: Option<u32>,
    pub role: Role,
    pub avatar: Option<FileUpload>,
}

impl TeamMemberDraft {
    pub fn validate_for_create(&self) -> Result<(), ModelError> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        match &self.password {
            Some(p) if p.len() >= 8 => Ok(()),
            _ => Err(ModelError::Validation("password too short (>=8)".into())),
        }
    }

    pub fn validate_for_update(&self) -> Result<(), ModelError> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        Ok(())
    }
}
