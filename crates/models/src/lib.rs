//! Entity definitions and wire types for the PipeCraft backend.
//! - One module per resource, mirroring the backend's collections.
//! - Serde names follow the backend's camelCase JSON.
//! - Form builders shape user input into create/update payloads.

pub mod application;
pub mod career;
pub mod contact;
pub mod envelope;
pub mod errors;
pub mod project;
pub mod service;
pub mod team;
pub mod upload;
pub mod user;

pub use application::{Application, ApplicationDraft};
pub use career::{JobPosting, JobPostingForm, JobPostingPayload, Salary, SalaryForm};
pub use contact::{Contact, NewContact};
pub use envelope::ApiEnvelope;
pub use errors::ModelError;
pub use project::{Project, ProjectDraft};
pub use service::{Service, ServiceForm};
pub use team::{Role, TeamMember, TeamMemberDraft};
pub use upload::FileUpload;
pub use user::User;

/// Reject empty or whitespace-only required fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}
