//! OpenAPI documentation configuration.
//!
//! Generates the OpenAPI specification for the REST API. Swagger UI serves
//! it in debug builds only.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::profiles::{ProfileUpdatedBody, UpdateEmailBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile backend API",
        description = "Profile field and email updates with an audit trail."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::profiles::update_email,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UpdateEmailBody, ProfileUpdatedBody, ErrorBody)),
    tags(
        (name = "profiles", description = "Profile update operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
