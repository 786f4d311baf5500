use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

pub const NAME_MAX_LEN: usize = 80;
pub const EMAIL_MAX_LEN: usize = 160;

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-generated identifier
    pub id: Uuid,
    #[schema(example = "Grace")]
    pub first_name: String,
    #[schema(example = "Hopper")]
    pub last_name: String,
    /// Unique across all users
    #[schema(example = "grace@example.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

/// Request body for both create and update.
///
/// Missing or `null` fields deserialize to an empty string so they surface as
/// "must not be blank" validation errors rather than parse failures. Any `id` in the
/// body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_first_name"))]
    #[schema(example = "Grace", max_length = 80)]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_last_name"))]
    #[schema(example = "Hopper", max_length = 80)]
    pub last_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_email_address"))]
    #[schema(example = "grace@example.com", max_length = 160)]
    pub email: String,
}

impl UserInput {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// What the repository writes: `id: None` inserts a new row, `Some` overwrites
/// the three mutable fields of that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(input: UserInput) -> Self {
        Self {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
        }
    }

    /// Replace the mutable fields of `existing`, keeping its id.
    pub fn replacing(existing: &User, input: UserInput) -> Self {
        Self {
            id: Some(existing.id),
            ..Self::new(input)
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn check_text(value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank")
            .with_message(Cow::Borrowed("must not be blank")));
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::new("length")
            .with_message(Cow::Owned(format!("must be at most {max_len} characters"))));
    }
    Ok(())
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    check_text(value, NAME_MAX_LEN)
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    check_text(value, NAME_MAX_LEN)
}

fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    check_text(value, EMAIL_MAX_LEN)?;
    if !value.validate_email() {
        return Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("must be a well-formed email address")));
    }
    Ok(())
}
