//! Field format rules for visitor records
//!
//! Creation validates the whole record and reports every failing field at
//! once. Updates validate only the single field being changed.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    messages,
    models::{FieldUpdate, NewVisitor, ValidatedVisitor, VisitorField},
};

/// Upper age bound accepted by updates
pub const MAX_UPDATE_AGE: i32 = 120;

static DATE_OF_VISIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

static TIME_OF_VISIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0?[0-9]|1[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time pattern")
});

static FULL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+\s[a-zA-Z]+$").expect("valid name pattern"));

pub fn is_valid_age(age: f64) -> bool {
    !age.is_nan() && age >= 0.0
}

/// Parse a `YYYY-MM-DD` date, rejecting calendar-invalid days such as `2023-02-30`
pub fn parse_date_of_visit(value: &str) -> Option<NaiveDate> {
    if !DATE_OF_VISIT.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn is_valid_date_of_visit(value: &str) -> bool {
    parse_date_of_visit(value).is_some()
}

/// Parse a 24 hour `H:MM` / `HH:MM` time
pub fn parse_time_of_visit(value: &str) -> Option<NaiveTime> {
    if !TIME_OF_VISIT.is_match(value) {
        return None;
    }
    let (hours, minutes) = value.split_once(':')?;
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

pub fn is_valid_time_of_visit(value: &str) -> bool {
    parse_time_of_visit(value).is_some()
}

/// Exactly a first name and a surname, letters only, one space apart
pub fn is_valid_full_name(value: &str) -> bool {
    FULL_NAME.is_match(value)
}

pub fn is_valid_assistant_name(value: &str) -> bool {
    FULL_NAME.is_match(value)
}

pub fn is_valid_comments(value: &str) -> bool {
    value.chars().count() > 1
}

pub fn is_valid_visitor_data(visitor: &NewVisitor) -> bool {
    check_visitor(visitor).is_ok()
}

/// Messages for every failing field, in a fixed field order
pub fn validation_errors(visitor: &NewVisitor) -> Vec<&'static str> {
    check_visitor(visitor).err().unwrap_or_default()
}

/// Reject a candidate record if any field is malformed, otherwise return its typed form
pub fn validate_visitor_data(visitor: &NewVisitor) -> AppResult<ValidatedVisitor> {
    check_visitor(visitor).map_err(|errors| {
        AppError::Validation(messages::detailed_error_message(&errors.join(" ")))
    })
}

/// Parse an update given as `(field name, JSON value)` into a validated [`FieldUpdate`]
///
/// Text fields accept only strings. Age accepts a number or a numeric string.
pub fn validate_update_inputs(column: &str, new_value: &Value) -> AppResult<FieldUpdate> {
    let field: VisitorField = column.parse()?;

    let update = match field {
        VisitorField::FullName => text(new_value)
            .filter(|name| is_valid_full_name(name))
            .map(|name| FieldUpdate::FullName(name.to_string())),
        VisitorField::Age => parse_update_age(new_value).map(FieldUpdate::Age),
        VisitorField::DateOfVisit => text(new_value)
            .and_then(parse_date_of_visit)
            .map(FieldUpdate::DateOfVisit),
        VisitorField::TimeOfVisit => text(new_value)
            .and_then(parse_time_of_visit)
            .map(FieldUpdate::TimeOfVisit),
        VisitorField::AssistantName => text(new_value)
            .filter(|name| is_valid_assistant_name(name))
            .map(|name| FieldUpdate::AssistantName(name.to_string())),
        VisitorField::Comments => text(new_value)
            .filter(|comments| is_valid_comments(comments))
            .map(|comments| FieldUpdate::Comments(comments.to_string())),
    };

    update.ok_or_else(|| field_error(field))
}

fn check_visitor(visitor: &NewVisitor) -> Result<ValidatedVisitor, Vec<&'static str>> {
    let age = parse_age(&visitor.age);
    let date_of_visit = text(&visitor.date_of_visit).and_then(parse_date_of_visit);
    let time_of_visit = text(&visitor.time_of_visit).and_then(parse_time_of_visit);
    let full_name = text(&visitor.full_name).filter(|name| is_valid_full_name(name));
    let comments = text(&visitor.comments).filter(|comments| is_valid_comments(comments));
    let assistant_name =
        text(&visitor.assistant_name).filter(|name| is_valid_assistant_name(name));

    match (age, date_of_visit, time_of_visit, full_name, comments, assistant_name) {
        (
            Some(age),
            Some(date_of_visit),
            Some(time_of_visit),
            Some(full_name),
            Some(comments),
            Some(assistant_name),
        ) => Ok(ValidatedVisitor {
            full_name: full_name.to_string(),
            age,
            date_of_visit,
            time_of_visit,
            assistant_name: assistant_name.to_string(),
            comments: comments.to_string(),
        }),
        _ => {
            let checks = [
                (age.is_some(), messages::AGE_ERROR),
                (date_of_visit.is_some(), messages::DATE_OF_VISIT_ERROR),
                (time_of_visit.is_some(), messages::TIME_OF_VISIT_ERROR),
                (full_name.is_some(), messages::FULL_NAME_ERROR),
                (comments.is_some(), messages::COMMENTS_ERROR),
                (assistant_name.is_some(), messages::ASSISTANT_NAME_ERROR),
            ];
            Err(checks
                .into_iter()
                .filter(|(ok, _)| !ok)
                .map(|(_, message)| message)
                .collect())
        }
    }
}

fn text(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Creation age: a JSON number, non-negative and whole since it is stored as INTEGER
fn parse_age(value: &Value) -> Option<i32> {
    let age = value.as_f64()?;
    if !is_valid_age(age) || age.fract() != 0.0 || age > i32::MAX as f64 {
        return None;
    }
    Some(age as i32)
}

fn parse_update_age(value: &Value) -> Option<i32> {
    let age = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    if !age.is_finite() || age.fract() != 0.0 || !(0.0..=MAX_UPDATE_AGE as f64).contains(&age) {
        return None;
    }
    Some(age as i32)
}

fn field_error(field: VisitorField) -> AppError {
    let message = match field {
        VisitorField::FullName => messages::FULL_NAME_ERROR,
        VisitorField::Age => messages::UPDATE_AGE_ERROR,
        VisitorField::DateOfVisit => messages::DATE_OF_VISIT_ERROR,
        VisitorField::TimeOfVisit => messages::TIME_OF_VISIT_ERROR,
        VisitorField::AssistantName => messages::ASSISTANT_NAME_ERROR,
        VisitorField::Comments => messages::COMMENTS_ERROR,
    };
    AppError::Validation(message.to_string())
}
