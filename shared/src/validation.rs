//! Payload schemas for the account routes, and the `{errors:[{field,message}]}`
//! body every rejected payload is reported with.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
pub use validator::Validate;
use validator::ValidationError;

pub const MAX_PROMPT_CHARS: usize = 4_000;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation failed on {} field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.to_owned(),
                message: message.into(),
            }],
        }
    }

    /// Messages reported against `field`, in order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(found: validator::ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = found
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| FieldError {
                    field: field.clone(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        // Field order out of `validator` is not stable.
        errors.sort_by(|a, b| a.field.cmp(&b.field));

        Self { errors }
    }
}

/// Runs the derived checks on `value` and reports them as a field list.
pub fn check<T: Validate>(value: &T) -> Result<(), ValidationErrors> {
    value.validate().map_err(ValidationErrors::from)
}

pub fn prompt_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("Prompt is required"));
        return Err(err);
    }
    Ok(())
}

/// 2 to 50 characters once surrounding whitespace is dropped.
fn name_fits(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if (2..=50).contains(&len) {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some(Cow::from("Name must be between 2 and 50 characters"));
    Err(err)
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "name_fits"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
