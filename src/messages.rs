//! User-facing message catalog
//!
//! Confirmation texts, per-field validation messages and per-operation
//! failure prefixes used across the validation and repository layers.

// General confirmations
pub const TABLE_CREATED: &str = "The table has been successfully created.";
pub const NEW_VISITOR_CREATED: &str = "New visitor added.";
pub const DELETED_ALL_VISITORS: &str = "All visitors have been deleted.";
pub const VISITOR_UPDATED: &str = "Visitor information updated";
pub const VISITOR_FOUND: &str = "Visitor Found";
pub const VISITOR_DELETED: &str = "The visitor has been deleted";

// Field validation
pub const INVALID_VISITOR_DATA: &str =
    "The visitor data provided is invalid. Please provide valid visitor data.";
pub const AGE_ERROR: &str = "Age must be a non-negative number.";
pub const UPDATE_AGE_ERROR: &str = "Age must be a number between 0 and 120.";
pub const DATE_OF_VISIT_ERROR: &str =
    "Invalid date of visit. Please provide a valid date in the format YYYY-MM-DD, as a string.";
pub const TIME_OF_VISIT_ERROR: &str =
    "Time of visit must be in the 24 hour format. Eg. 11 at night should be 23:00.";
pub const FULL_NAME_ERROR: &str =
    "Your name must only consist of your name and surname only separated by a space.";
pub const COMMENTS_ERROR: &str = "Comment must be a string of at least 2 characters.";
pub const ASSISTANT_NAME_ERROR: &str =
    "Assistant name must only consist of name and surname separated by a space.";
pub const INVALID_VISITOR_ID: &str = "Invalid visitor ID. Please provide a numeric ID.";
pub const NO_VISITORS_FOUND: &str = "No visitors found.";

// Operation prefixes for executor failures
pub const CREATING_TABLE_ERROR: &str = "Failed to create visitors table";
pub const ADDING_VISITOR_ERROR: &str = "Failed to add new visitor";
pub const LISTING_VISITORS_ERROR: &str = "Failed to list visitors";
pub const VIEWING_VISITOR_ERROR: &str = "Failed to view visitor";
pub const UPDATING_VISITOR_ERROR: &str = "Failed to update visitor";
pub const DELETING_VISITOR_ERROR: &str = "Failed to delete visitor";
pub const DELETING_ALL_VISITORS_ERROR: &str = "Failed to delete visitors";
pub const VIEWING_LAST_VISITOR_ERROR: &str = "Failed to view last visitor";

/// Aggregated creation-time validation message
pub fn detailed_error_message(details: &str) -> String {
    format!("{} Details: {}", INVALID_VISITOR_DATA, details)
}

pub fn invalid_column_name(name: &str) -> String {
    format!(
        "{} is not a valid column name. Please provide a valid column name.",
        name
    )
}

pub fn visitor_not_found(id: i32) -> String {
    format!("Visitor with ID {} not found.", id)
}
