//! Multipart form builders for the endpoints that take binary uploads
//! (project images, avatars, résumés). Field names match what the backend's
//! upload middleware expects.

use models::{ApplicationDraft, FileUpload, ProjectDraft, TeamMemberDraft};
use reqwest::multipart::{Form, Part};

use crate::errors::ClientError;

fn file_part(upload: &FileUpload) -> Result<Part, ClientError> {
    let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
    if upload.content_type.is_empty() {
        return Ok(part);
    }
    part.mime_str(&upload.content_type)
        .map_err(|e| ClientError::Decode(format!("invalid content type: {e}")))
}

pub fn project_form(draft: &ProjectDraft) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("name", draft.name.clone())
        .text("client", draft.client.clone())
        .text("scope", draft.scope.clone());
    if let Some(image) = &draft.image {
        form = form.part("image", file_part(image)?);
    }
    Ok(form)
}

/// Team member registration/update form. The password only travels on
/// create; updates never change it.
pub fn team_member_form(
    draft: &TeamMemberDraft,
    include_password: bool,
) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("name", draft.name.clone())
        .text("email", draft.email.clone())
        .text("phone", draft.phone.clone());
    if include_password {
        if let Some(password) = &draft.password {
            form = form.text("password", password.clone());
        }
        form = form.text("role", draft.role.as_str());
    }
    if let Some(age) = draft.age {
        form = form.text("age", age.to_string());
    }
    if let Some(avatar) = &draft.avatar {
        form = form.part("avatar", file_part(avatar)?);
    }
    Ok(form)
}

pub fn application_form(draft: &ApplicationDraft) -> Result<Form, ClientError> {
    Ok(Form::new()
        .text("careerId", draft.career_id.clone())
        .text("applicantName", draft.applicant_name.clone())
        .text("applicantEmail", draft.applicant_email.clone())
        .text("applicantPhone", draft.applicant_phone.clone())
        .text("coverLetter", draft.cover_letter.clone())
        .part("resume", file_part(&draft.resume)?))
}
