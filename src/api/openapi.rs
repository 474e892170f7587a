//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visitor Log API",
        version = "1.0.0",
        description = "Front desk visitor logging REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Visitors
        visitors::add_visitor,
        visitors::list_visitors,
        visitors::delete_all_visitors,
        visitors::view_last_visitor,
        visitors::view_visitor,
        visitors::update_visitor,
        visitors::delete_visitor,
    ),
    components(
        schemas(
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::VisitorSummary,
            crate::models::visitor::NewVisitor,
            crate::models::visitor::UpdateVisitorRequest,
            crate::models::visitor::VisitorResponse,
            crate::models::visitor::MessageResponse,
            crate::models::visitor::LastVisitor,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "visitors", description = "Visitor log management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
