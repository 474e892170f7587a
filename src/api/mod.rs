//! API handlers for visitor log REST endpoints

pub mod health;
pub mod openapi;
pub mod visitors;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Visitors
        .route(
            "/visitors",
            get(visitors::list_visitors)
                .post(visitors::add_visitor)
                .delete(visitors::delete_all_visitors),
        )
        .route("/visitors/last", get(visitors::view_last_visitor))
        .route(
            "/visitors/:id",
            get(visitors::view_visitor)
                .patch(visitors::update_visitor)
                .delete(visitors::delete_visitor),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        repository::{
            executor::{MockQueryExecutor, QueryResult, Row, SqlValue},
            Repository,
        },
        services::Services,
        AppConfig,
    };

    fn app(mock: MockQueryExecutor) -> Router {
        let repository = Repository::new(Arc::new(mock));
        create_router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(repository)),
        })
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(app(MockQueryExecutor::new()), Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_store_failure() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_execute()
            .returning(|_, _| Err(sqlx::Error::PoolTimedOut));

        let (status, body) = send(app(mock), Method::GET, "/api/v1/ready", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DbFailure");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let (status, body) =
            send(app(MockQueryExecutor::new()), Method::GET, "/api/v1/visitors/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 18);
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_found() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_execute()
            .returning(|_, _| Ok(QueryResult::default()));

        let (status, body) = send(app(mock), Method::GET, "/api/v1/visitors", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No visitors found.");
    }

    #[tokio::test]
    async fn test_last_visitor_route() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_execute().returning(|_, _| {
            Ok(QueryResult::from_rows(vec![Row::new().with("id", SqlValue::Int(3))]))
        });

        let (status, body) = send(app(mock), Method::GET, "/api/v1/visitors/last", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 3);
    }

    #[tokio::test]
    async fn test_invalid_new_visitor_is_rejected() {
        let payload = json!({
            "fullName": "Ntuthuko",
            "age": 30,
            "dateOfVisit": "2023-12-13",
            "timeOfVisit": "02:30",
            "assistantName": "Assistant Smith",
            "comments": "First visit"
        });

        let (status, body) =
            send(app(MockQueryExecutor::new()), Method::POST, "/api/v1/visitors", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains(crate::messages::FULL_NAME_ERROR));
    }

    #[tokio::test]
    async fn test_update_age_out_of_range_is_rejected() {
        let (status, body) = send(
            app(MockQueryExecutor::new()),
            Method::PATCH,
            "/api/v1/visitors/1",
            Some(json!({"column": "age", "value": 150})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], crate::messages::UPDATE_AGE_ERROR);
    }

    #[tokio::test]
    async fn test_mistyped_new_visitor_fields_are_reported() {
        let payload = json!({
            "fullName": "Ntuthuko",
            "age": "30",
            "dateOfVisit": "2023-12-13",
            "timeOfVisit": "02:30",
            "assistantName": "Assistant Smith",
            "comments": "First visit"
        });

        let (status, body) =
            send(app(MockQueryExecutor::new()), Method::POST, "/api/v1/visitors", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 18);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains(crate::messages::AGE_ERROR));
        assert!(message.contains(crate::messages::FULL_NAME_ERROR));
    }

    #[tokio::test]
    async fn test_non_string_comments_update_is_rejected() {
        for value in [Value::Null, json!(false), json!(42)] {
            let (status, body) = send(
                app(MockQueryExecutor::new()),
                Method::PATCH,
                "/api/v1/visitors/1",
                Some(json!({"column": "comments", "value": value})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", value);
            assert_eq!(body["message"], crate::messages::COMMENTS_ERROR);
        }
    }

    #[tokio::test]
    async fn test_numeric_string_age_update_is_accepted() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_execute()
            .withf(|sql, params| {
                sql.trim() == "UPDATE visitors SET visitor_age = $1 WHERE id = $2 RETURNING *"
                    && params.to_vec() == vec![SqlValue::Int(31), SqlValue::Int(1)]
            })
            .times(1)
            .returning(|_, _| Ok(QueryResult::default()));

        let (status, body) = send(
            app(mock),
            Method::PATCH,
            "/api/v1/visitors/1",
            Some(json!({"column": "age", "value": "31"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Visitor with ID 1 not found.");
    }
}
