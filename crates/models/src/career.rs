use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, validate_required};

/// A job posting managed under `/careers`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub career_id: String,
    pub job_title: String,
    pub department: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Salary>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default = "default_positions")]
    pub number_of_positions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<DateTime<Utc>>,
}

fn default_positions() -> u32 {
    1
}

/// Salary range; either bound may be open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    pub currency: String,
}

/// Raw text inputs from the salary fields of the job-posting form.
#[derive(Clone, Debug)]
pub struct SalaryForm {
    pub min: String,
    pub max: String,
    pub currency: String,
}

impl Default for SalaryForm {
    fn default() -> Self {
        Self {
            min: String::new(),
            max: String::new(),
            currency: "INR".into(),
        }
    }
}

impl SalaryForm {
    /// Convert the text fields into a wire salary. Empty fields become open
    /// bounds; if both are empty no salary is sent at all.
    pub fn into_salary(self) -> Result<Option<Salary>, ModelError> {
        if self.min.trim().is_empty() && self.max.trim().is_empty() {
            return Ok(None);
        }
        let parse = |field: &str, raw: &str| -> Result<Option<u64>, ModelError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<u64>()
                .map(Some)
                .map_err(|_| ModelError::Validation(format!("salary {field} must be a number")))
        };
        Ok(Some(Salary {
            min: parse("min", &self.min)?,
            max: parse("max", &self.max)?,
            currency: self.currency,
        }))
    }
}

/// Form state for the job-posting modal, shaped into the create/update
/// payload for `/careers`.
#[derive(Clone, Debug, Default)]
pub struct JobPostingForm {
    pub job_title: String,
    pub department: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub qualifications: Vec<String>,
    pub salary: SalaryForm,
    pub is_active: bool,
    pub number_of_positions: u32,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// Serialized body for `POST /careers` and `PUT /careers/{careerId}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingPayload {
    pub job_title: String,
    pub department: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub qualifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Salary>,
    pub is_active: bool,
    pub number_of_positions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<DateTime<Utc>>,
}

impl JobPostingForm {
    pub fn into_payload(self) -> Result<JobPostingPayload, ModelError> {
        validate_required("jobTitle", &self.job_title)?;
        validate_required("department", &self.department)?;
        validate_required("location", &self.location)?;
        validate_required("description", &self.description)?;
        Ok(JobPostingPayload {
            job_title: self.job_title,
            department: self.department,
            location: self.location,
            job_type: self.job_type,
            experience_level: self.experience_level,
            description: self.description,
            responsibilities: self.responsibilities,
            requirements: self.requirements,
            qualifications: self.qualifications,
            salary: self.salary.into_salary()?,
            is_active: self.is_active,
            number_of_positions: self.number_of_positions.max(1),
            application_deadline: self.application_deadline,
        })
    }
}
