use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, validate_required};

/// An engineering service offering with an ordered feature list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Form state for the service modal. Features keep insertion order and
/// duplicates are allowed; the add control only enforces a minimum length.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForm {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ServiceForm {
    /// Append a feature entry. Input must be at least two characters and not
    /// blank after trimming; the trimmed value is stored.
    pub fn add_feature(&mut self, input: &str) -> Result<(), ModelError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || input.chars().count() < 2 {
            return Err(ModelError::Validation(
                "feature must be at least 2 characters".into(),
            ));
        }
        self.features.push(trimmed.to_string());
        Ok(())
    }

    pub fn remove_feature(&mut self, index: usize) {
        if index < self.features.len() {
            self.features.remove(index);
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("title", &self.title)?;
        validate_required("description", &self.description)?;
        Ok(())
    }
}
