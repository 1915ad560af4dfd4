use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{UserError, UserResult};

/// Longest accepted name, in characters
pub const NAME_MAX_CHARS: usize = 100;

/// `local-part@domain`: one `@`, a non-empty local part from a restricted set, any non-empty domain
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").unwrap());

/// Rule checks in reporting order: (field, validator code, reason)
const CHECK_ORDER: [(&str, &str, &str); 4] = [
    ("name", "blank", "Name is required"),
    ("email", "blank", "Email is required"),
    ("email", "regex", "Email format is not valid"),
    ("name", "length", "Name must be at most 100 characters"),
];

/// `null` reads as an empty string, so it fails the blank check like a missing field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v7)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New record with a fresh id and equal timestamps. `input` must already be checked.
    pub fn new(input: UserInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite name and email; id and `created_at` are kept.
    pub fn apply_update(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
        self.updated_at = Utc::now();
    }
}

/// Request body for create and update.
///
/// Missing and `null` fields deserialize as empty strings and fail the blank checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UserInput {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    #[schema(example = "Juan Pérez", max_length = 100)]
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[validate(custom(function = "not_blank"), regex(path = *EMAIL_PATTERN))]
    #[schema(example = "juan@example.com")]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Run the field rules and report the first failure.
    ///
    /// Order: blank name, blank email, email format, name length.
    pub fn check(&self) -> UserResult<()> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(first_failure(&errors)),
        }
    }
}

fn first_failure(errors: &ValidationErrors) -> UserError {
    let fields = errors.field_errors();

    CHECK_ORDER
        .iter()
        .find(|(field, code, _)| {
            fields
                .get(*field)
                .is_some_and(|errs| errs.iter().any(|e| e.code == *code))
        })
        .map(|(field, _, reason)| UserError::InvalidField {
            field: (*field).to_string(),
            reason: (*reason).to_string(),
        })
        .unwrap_or_else(|| UserError::Validation(errors.to_string()))
}

/// Query string for `GET /users/search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring to look for in user names
    pub name: Option<String>,
}

/// An order as reported by the order service.
///
/// Read-only; the order service owns the shape. Every field except `id` is
/// optional and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i32>,
    /// Total price of the order
    #[serde(default, alias = "totalPrice")]
    pub total_amount: Option<f64>,
    /// Local date-time as sent by the order service
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-03-01T10:15:30")]
    pub order_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
