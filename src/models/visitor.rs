//! Visitor model

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppError, messages};

/// Persisted visitor record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: i32,
    /// First name and surname
    pub full_name: String,
    pub age: i32,
    /// Date of the visit (YYYY-MM-DD)
    #[schema(value_type = String, example = "2023-12-13")]
    pub date_of_visit: NaiveDate,
    /// Time of the visit (HH:MM, 24 hour clock)
    #[serde(with = "hh_mm")]
    #[schema(value_type = String, example = "14:30")]
    pub time_of_visit: NaiveTime,
    /// Staff member who assisted the visitor
    pub assistant_name: String,
    pub comments: Option<String>,
}

/// Short visitor listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitorSummary {
    pub id: i32,
    pub full_name: String,
}

/// Candidate visitor record as received from a client
///
/// Fields are kept as raw JSON so a value of the wrong type is reported by
/// validation with its field message. Missing fields read as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVisitor {
    #[serde(default)]
    #[schema(value_type = String, example = "Ntuthuko Sokutu")]
    pub full_name: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = i32, example = 30)]
    pub age: serde_json::Value,
    /// Date of the visit (YYYY-MM-DD)
    #[serde(default)]
    #[schema(value_type = String, example = "2023-12-13")]
    pub date_of_visit: serde_json::Value,
    /// Time of the visit (H:MM or HH:MM)
    #[serde(default)]
    #[schema(value_type = String, example = "09:30")]
    pub time_of_visit: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = String, example = "Assistant Smith")]
    pub assistant_name: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = String)]
    pub comments: serde_json::Value,
}

/// A candidate record whose every field passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVisitor {
    pub full_name: String,
    pub age: i32,
    pub date_of_visit: NaiveDate,
    pub time_of_visit: NaiveTime,
    pub assistant_name: String,
    pub comments: String,
}

/// Single-field update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVisitorRequest {
    /// Field name: fullName, age, dateOfVisit, timeOfVisit, assistantName or comments
    pub column: String,
    /// New value. Text fields take a string; age takes a number or numeric string
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

/// Confirmation message together with the affected visitor
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitorResponse {
    pub message: String,
    pub visitor: Visitor,
}

impl VisitorResponse {
    pub fn new(message: &str, visitor: Visitor) -> Self {
        Self {
            message: message.to_string(),
            visitor,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Identifier of the most recently added visitor
#[derive(Debug, Serialize, ToSchema)]
pub struct LastVisitor {
    pub id: i32,
}

// ---------------------------------------------------------------------------
// VisitorField
// ---------------------------------------------------------------------------

/// The six updatable visitor fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitorField {
    FullName,
    Age,
    DateOfVisit,
    TimeOfVisit,
    AssistantName,
    Comments,
}

impl VisitorField {
    pub const ALL: [VisitorField; 6] = [
        VisitorField::FullName,
        VisitorField::Age,
        VisitorField::DateOfVisit,
        VisitorField::TimeOfVisit,
        VisitorField::AssistantName,
        VisitorField::Comments,
    ];

    /// Name used by API clients
    pub fn domain_name(self) -> &'static str {
        match self {
            VisitorField::FullName => "fullName",
            VisitorField::Age => "age",
            VisitorField::DateOfVisit => "dateOfVisit",
            VisitorField::TimeOfVisit => "timeOfVisit",
            VisitorField::AssistantName => "assistantName",
            VisitorField::Comments => "comments",
        }
    }

    /// Column name in the visitors table
    pub fn column(self) -> &'static str {
        match self {
            VisitorField::FullName => "visitor_full_name",
            VisitorField::Age => "visitor_age",
            VisitorField::DateOfVisit => "date_of_visit",
            VisitorField::TimeOfVisit => "time_of_visit",
            VisitorField::AssistantName => "assisted_by",
            VisitorField::Comments => "comments",
        }
    }
}

impl FromStr for VisitorField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.domain_name() == s)
            .ok_or_else(|| AppError::Validation(messages::invalid_column_name(s)))
    }
}

/// A typed new value for exactly one visitor field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    FullName(String),
    Age(i32),
    DateOfVisit(NaiveDate),
    TimeOfVisit(NaiveTime),
    AssistantName(String),
    Comments(String),
}

impl FieldUpdate {
    pub fn field(&self) -> VisitorField {
        match self {
            FieldUpdate::FullName(_) => VisitorField::FullName,
            FieldUpdate::Age(_) => VisitorField::Age,
            FieldUpdate::DateOfVisit(_) => VisitorField::DateOfVisit,
            FieldUpdate::TimeOfVisit(_) => VisitorField::TimeOfVisit,
            FieldUpdate::AssistantName(_) => VisitorField::AssistantName,
            FieldUpdate::Comments(_) => VisitorField::Comments,
        }
    }
}

/// Serde adapter writing times as `HH:MM`
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
