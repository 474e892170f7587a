//! Visitors repository

use std::sync::Arc;

use super::executor::{QueryExecutor, Row, SqlValue};
use crate::{
    error::{AppError, AppResult},
    messages,
    models::visitor::{
        FieldUpdate, NewVisitor, Visitor, VisitorField, VisitorResponse, VisitorSummary,
    },
    validation,
};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS visitors (
        id SERIAL PRIMARY KEY,
        visitor_full_name VARCHAR(255) NOT NULL,
        visitor_age INTEGER NOT NULL,
        date_of_visit DATE NOT NULL,
        time_of_visit TIME NOT NULL,
        assisted_by VARCHAR(255) NOT NULL,
        comments TEXT
    )
"#;

const ADD_NEW_VISITOR: &str = r#"
    INSERT INTO visitors (visitor_full_name, visitor_age, date_of_visit, time_of_visit, assisted_by, comments)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING *
"#;

const LIST_ALL_VISITORS: &str = "SELECT id, visitor_full_name FROM visitors";
const VIEW_VISITOR: &str = "SELECT * FROM visitors WHERE id = $1";
const DELETE_VISITOR: &str = "DELETE FROM visitors WHERE id = $1";
const DELETE_ALL_VISITORS: &str = "DELETE FROM visitors";
const VIEW_LAST_VISITOR: &str = "SELECT id FROM visitors ORDER BY id DESC LIMIT 1";

#[derive(Clone)]
pub struct VisitorsRepository {
    executor: Arc<dyn QueryExecutor>,
}

impl VisitorsRepository {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Ensure the visitors table exists
    pub async fn create_table(&self) -> AppResult<&'static str> {
        self.executor
            .execute(CREATE_TABLE, &[])
            .await
            .map_err(AppError::store(messages::CREATING_TABLE_ERROR))?;
        Ok(messages::TABLE_CREATED)
    }

    /// Validate and insert a new visitor
    pub async fn add_new_visitor(&self, data: &NewVisitor) -> AppResult<VisitorResponse> {
        let visitor = validation::validate_visitor_data(data)?;

        let params = [
            SqlValue::Text(visitor.full_name),
            SqlValue::Int(visitor.age),
            SqlValue::Date(visitor.date_of_visit),
            SqlValue::Time(visitor.time_of_visit),
            SqlValue::Text(visitor.assistant_name),
            SqlValue::Text(visitor.comments),
        ];

        let result = self
            .executor
            .execute(ADD_NEW_VISITOR, &params)
            .await
            .map_err(AppError::store(messages::ADDING_VISITOR_ERROR))?;

        let row = result.rows.first().ok_or_else(|| {
            AppError::Internal("Insert returned no row".to_string())
        })?;
        Ok(VisitorResponse::new(
            messages::NEW_VISITOR_CREATED,
            visitor_from_row(row)?,
        ))
    }

    /// List the id and name of every visitor; an empty table is an error
    pub async fn list_all_visitors(&self) -> AppResult<Vec<VisitorSummary>> {
        let result = self
            .executor
            .execute(LIST_ALL_VISITORS, &[])
            .await
            .map_err(AppError::store(messages::LISTING_VISITORS_ERROR))?;

        if result.rows.is_empty() {
            return Err(AppError::NotFound(messages::NO_VISITORS_FOUND.to_string()));
        }

        result
            .rows
            .iter()
            .map(|row| -> AppResult<VisitorSummary> {
                Ok(VisitorSummary {
                    id: required(row.int("id"), "id")?,
                    full_name: required(
                        row.text(VisitorField::FullName.column()),
                        VisitorField::FullName.column(),
                    )?
                    .to_string(),
                })
            })
            .collect()
    }

    /// Get one visitor by id
    pub async fn view_visitor(&self, id: &str) -> AppResult<VisitorResponse> {
        let id = parse_visitor_id(id)?;
        let visitor = self.fetch_visitor(id, messages::VIEWING_VISITOR_ERROR).await?;
        Ok(VisitorResponse::new(messages::VISITOR_FOUND, visitor))
    }

    /// Validate and apply a single-field update given by field name
    pub async fn update_visitor(
        &self,
        id: &str,
        column: &str,
        new_value: &serde_json::Value,
    ) -> AppResult<VisitorResponse> {
        let id = parse_visitor_id(id)?;
        let update = validation::validate_update_inputs(column, new_value)?;
        self.apply_update(id, &update).await
    }

    async fn apply_update(&self, id: i32, update: &FieldUpdate) -> AppResult<VisitorResponse> {
        // Column names come from the closed VisitorField set, never from input
        let query = format!(
            "UPDATE visitors SET {} = $1 WHERE id = $2 RETURNING *",
            update.field().column()
        );
        let value = match update {
            FieldUpdate::FullName(v) | FieldUpdate::AssistantName(v) | FieldUpdate::Comments(v) => {
                SqlValue::Text(v.clone())
            }
            FieldUpdate::Age(v) => SqlValue::Int(*v),
            FieldUpdate::DateOfVisit(v) => SqlValue::Date(*v),
            FieldUpdate::TimeOfVisit(v) => SqlValue::Time(*v),
        };

        let result = self
            .executor
            .execute(&query, &[value, SqlValue::Int(id)])
            .await
            .map_err(AppError::store(messages::UPDATING_VISITOR_ERROR))?;

        let row = result
            .rows
            .first()
            .ok_or_else(|| AppError::NotFound(messages::visitor_not_found(id)))?;
        Ok(VisitorResponse::new(
            messages::VISITOR_UPDATED,
            visitor_from_row(row)?,
        ))
    }

    /// Delete one visitor, returning the record as it was
    ///
    /// The lookup and the delete are separate statements; a missing id never
    /// reaches the delete.
    pub async fn delete_visitor(&self, id: &str) -> AppResult<VisitorResponse> {
        let id = parse_visitor_id(id)?;
        let visitor = self.fetch_visitor(id, messages::DELETING_VISITOR_ERROR).await?;

        self.executor
            .execute(DELETE_VISITOR, &[SqlValue::Int(id)])
            .await
            .map_err(AppError::store(messages::DELETING_VISITOR_ERROR))?;

        Ok(VisitorResponse::new(messages::VISITOR_DELETED, visitor))
    }

    /// Delete every visitor; an already empty table is an error
    pub async fn delete_all_visitors(&self) -> AppResult<&'static str> {
        let result = self
            .executor
            .execute(DELETE_ALL_VISITORS, &[])
            .await
            .map_err(AppError::store(messages::DELETING_ALL_VISITORS_ERROR))?;

        if result.row_count == 0 {
            return Err(AppError::NotFound(messages::NO_VISITORS_FOUND.to_string()));
        }
        Ok(messages::DELETED_ALL_VISITORS)
    }

    /// Id of the most recently added visitor (highest id)
    pub async fn view_last_visitor(&self) -> AppResult<i32> {
        let result = self
            .executor
            .execute(VIEW_LAST_VISITOR, &[])
            .await
            .map_err(AppError::store(messages::VIEWING_LAST_VISITOR_ERROR))?;

        result
            .rows
            .iter()
            .filter_map(|row| row.int("id"))
            .max()
            .ok_or_else(|| AppError::NotFound(messages::NO_VISITORS_FOUND.to_string()))
    }

    async fn fetch_visitor(&self, id: i32, context: &'static str) -> AppResult<Visitor> {
        let result = self
            .executor
            .execute(VIEW_VISITOR, &[SqlValue::Int(id)])
            .await
            .map_err(AppError::store(context))?;

        let row = result
            .rows
            .first()
            .ok_or_else(|| AppError::NotFound(messages::visitor_not_found(id)))?;
        visitor_from_row(row)
    }
}

/// Parse a visitor id, rejecting anything that is not a plain integer
pub fn parse_visitor_id(id: &str) -> AppResult<i32> {
    id.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(messages::INVALID_VISITOR_ID.to_string()))
}

/// Map a storage row onto the domain record
fn visitor_from_row(row: &Row) -> AppResult<Visitor> {
    let comments_column = VisitorField::Comments.column();
    let comments = match row.text(comments_column) {
        Some(text) => Some(text.to_string()),
        None if row.is_null(comments_column) => None,
        None => return Err(missing_column(comments_column)),
    };

    Ok(Visitor {
        id: required(row.int("id"), "id")?,
        full_name: text_field(row, VisitorField::FullName)?,
        age: required(row.int(VisitorField::Age.column()), VisitorField::Age.column())?,
        date_of_visit: required(
            row.date(VisitorField::DateOfVisit.column()),
            VisitorField::DateOfVisit.column(),
        )?,
        time_of_visit: required(
            row.time(VisitorField::TimeOfVisit.column()),
            VisitorField::TimeOfVisit.column(),
        )?,
        assistant_name: text_field(row, VisitorField::AssistantName)?,
        comments,
    })
}

fn text_field(row: &Row, field: VisitorField) -> AppResult<String> {
    required(row.text(field.column()), field.column()).map(str::to_string)
}

fn required<T>(value: Option<T>, column: &str) -> AppResult<T> {
    value.ok_or_else(|| missing_column(column))
}

fn missing_column(column: &str) -> AppError {
    AppError::Internal(format!("Column {} missing or of unexpected type", column))
}
