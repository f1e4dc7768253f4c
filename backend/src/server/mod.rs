//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::io;
use std::sync::Arc;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use profiles_backend::doc::ApiDoc;
use profiles_backend::domain::ProfileService;
use profiles_backend::inbound::http::health::{live, ready, HealthState};
use profiles_backend::inbound::http::profiles::{update_email, update_profile};
use profiles_backend::inbound::http::state::HttpState;
use profiles_backend::outbound::persistence::{DbPool, DieselProfileRepository};
use profiles_backend::outbound::storage::FsBlobStore;

/// Multipart buffering ceiling: the 2 MiB photo plus form text fields.
const MULTIPART_MEMORY_LIMIT: usize = 4 * 1024 * 1024;

/// Connect the adapters and run the HTTP server to completion.
pub async fn run(config: ServerConfig) -> io::Result<()> {
    let pool = DbPool::connect(&config.database_url)
        .await
        .map_err(|error| io::Error::other(error.to_string()))?;
    let repository = DieselProfileRepository::new(pool);
    let blobs = FsBlobStore::new(config.storage_root, config.public_url_prefix);
    let service = ProfileService::new(
        Arc::new(repository.clone()),
        Arc::new(repository),
        Arc::new(blobs),
        Arc::new(DefaultClock),
    );
    let state = HttpState::new(Arc::new(service));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .app_data(MultipartFormConfig::default().memory_limit(MULTIPART_MEMORY_LIMIT))
            .service(
                web::scope("/api/v1")
                    .service(update_profile)
                    .service(update_email),
            )
            .service(live)
            .service(ready);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
