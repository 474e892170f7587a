//! Visitors service

use crate::{
    error::{AppError, AppResult},
    models::visitor::{NewVisitor, VisitorResponse, VisitorSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Ensure the visitors table exists
    pub async fn create_table(&self) -> AppResult<&'static str> {
        let message = self.repository.visitors.create_table().await?;
        tracing::info!("Visitors table ready");
        Ok(message)
    }

    /// Record a new visitor
    pub async fn add(&self, data: &NewVisitor) -> AppResult<VisitorResponse> {
        let response = self.repository.visitors.add_new_visitor(data).await?;
        tracing::info!(visitor_id = response.visitor.id, "Visitor added");
        Ok(response)
    }

    pub async fn list(&self) -> AppResult<Vec<VisitorSummary>> {
        warn_not_found("list", self.repository.visitors.list_all_visitors().await)
    }

    pub async fn get(&self, id: &str) -> AppResult<VisitorResponse> {
        warn_not_found("view", self.repository.visitors.view_visitor(id).await)
    }

    /// Update one field of a visitor
    pub async fn update(
        &self,
        id: &str,
        column: &str,
        value: &serde_json::Value,
    ) -> AppResult<VisitorResponse> {
        let result = self.repository.visitors.update_visitor(id, column, value).await;
        let response = warn_not_found("update", result)?;
        tracing::info!(visitor_id = response.visitor.id, field = column, "Visitor updated");
        Ok(response)
    }

    pub async fn delete(&self, id: &str) -> AppResult<VisitorResponse> {
        let result = self.repository.visitors.delete_visitor(id).await;
        let response = warn_not_found("delete", result)?;
        tracing::info!(visitor_id = response.visitor.id, "Visitor deleted");
        Ok(response)
    }

    pub async fn delete_all(&self) -> AppResult<&'static str> {
        let result = self.repository.visitors.delete_all_visitors().await;
        let message = warn_not_found("delete_all", result)?;
        tracing::info!("All visitors deleted");
        Ok(message)
    }

    /// Id of the most recently added visitor
    pub async fn last(&self) -> AppResult<i32> {
        warn_not_found("last", self.repository.visitors.view_last_visitor().await)
    }

    /// Check that the visitor store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Log a not-found outcome and hand the result back unchanged
fn warn_not_found<T>(operation: &'static str, result: AppResult<T>) -> AppResult<T> {
    if let Err(AppError::NotFound(message)) = &result {
        tracing::warn!(operation, "{}", message);
    }
    result
}
