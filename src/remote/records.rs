//! Record types for the remote data service
//!
//! These structs mirror the backend's wire format. Datetimes stay as the
//! strings the backend sends (RFC 3339 or its space-separated UTC variant);
//! [`parse_datetime`] turns them into `chrono` values where ordering or
//! comparison is needed. Empty-string datetimes mean "unset", which is how
//! the backend encodes cleared date fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Backend-issued record id
    pub id: String,
    /// Login email, unique per account
    #[serde(default)]
    pub email: String,
    /// Display name, unique, at least four characters
    pub name: String,
    /// Whether the email address has been verified
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

/// Slim user projection returned by field-limited list queries and
/// relation expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Todo priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Ascending sort rank (low before high)
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A todo record owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: String,
    /// Short task title
    pub title: String,
    /// Longer free-form description, empty when not provided
    #[serde(default)]
    pub description: String,
    /// Completion flag, false on creation
    #[serde(default)]
    pub completed: bool,
    /// Priority level, medium when absent
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date; empty string when unset
    #[serde(default)]
    pub due_date: String,
    /// Owning user's record id
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl TodoRecord {
    /// Whether a due date is set
    pub fn has_due_date(&self) -> bool {
        !self.due_date.is_empty()
    }
}

/// Trip destination category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Target {
    Kip,
    Cp,
    Kzp,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Kip => "KIP",
            Target::Cp => "CP",
            Target::Kzp => "KZP",
        }
    }

    /// Parse a query-string value, `None` for anything unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "KIP" => Some(Target::Kip),
            "CP" => Some(Target::Cp),
            "KZP" => Some(Target::Kzp),
            _ => None,
        }
    }
}

/// Locomotive model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotive {
    Mercedes,
    Honda,
    #[serde(rename = "BMW")]
    Bmw,
}

impl Locomotive {
    pub fn as_str(self) -> &'static str {
        match self {
            Locomotive::Mercedes => "Mercedes",
            Locomotive::Honda => "Honda",
            Locomotive::Bmw => "BMW",
        }
    }

    /// Parse a query-string value, `None` for anything unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Mercedes" => Some(Locomotive::Mercedes),
            "Honda" => Some(Locomotive::Honda),
            "BMW" => Some(Locomotive::Bmw),
            _ => None,
        }
    }
}

/// Expanded relations inlined into a trip record when requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripExpand {
    /// Creator, expanded from the `user` relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    /// Operator, expanded from the `username` relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<UserSummary>,
}

/// A train trip log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    /// Departure, UTC
    pub start_datetime: String,
    /// Arrival, UTC
    #[serde(default)]
    pub end_datetime: String,
    /// Operator's user record id (`username` relation)
    pub username: String,
    /// Destination category
    pub target: Target,
    pub station: String,
    pub route: String,
    pub driver: String,
    /// Optional second driver, empty when none
    #[serde(default)]
    pub assistant_driver: String,
    pub train_number: String,
    pub locomotive: Locomotive,
    pub locomotive_number: String,
    /// Creating user's record id
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    /// Present only when the query asked for relation expansion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<TripExpand>,
}

/// Paged list envelope returned by the records API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub page: u32,
    #[serde(rename = "perPage")]
    pub per_page: u32,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    pub items: Vec<T>,
}

impl<T> ListResult<T> {
    /// Empty result for a page, used when a list fetch fails and the page
    /// degrades instead of erroring
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            total_items: 0,
            total_pages: 0,
            items: Vec::new(),
        }
    }
}

/// Response of the password and refresh auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Session token, a signed JWT the backend verifies on every call
    pub token: String,
    /// Snapshot of the authenticated user
    pub record: UserRecord,
}

/// Parse a backend datetime string
///
/// Accepts RFC 3339 as well as the backend's space-separated UTC form
/// (`2024-01-02 03:04:05.678Z`). Returns `None` for empty or unparseable
/// input.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.fZ")
        .ok()
        .map(|naive| naive.and_utc())
}
