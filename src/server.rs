use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower::{util::MapRequest, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::tmdb::{ImageUrls, MovieProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn MovieProvider>,
    pub images: Arc<ImageUrls>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn MovieProvider>) -> Self {
        let images = ImageUrls::new(&config.tmdb.image_base_url);
        Self {
            config: Arc::new(config),
            provider,
            images: Arc::new(images),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/home", get(crate::web::home))
        .route("/api/trending", get(crate::web::trending))
        .route("/api/search", get(crate::web::search))
        .route("/api/genres", get(crate::web::list_genres))
        .route("/api/recommendations", get(crate::web::recommendations))
        .route("/api/movie/:id", get(crate::web::movie_detail))
        .route("/api/movie/:id/cast", get(crate::web::movie_cast))
        .route("/api/person/:id", get(crate::web::person_detail));

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        // Unmatched paths go to the static front end instead of a bare 404.
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(axum::middleware::from_fn(crate::middleware::log_request)),
        )
        .with_state(state)
}

/// Request-to-URI normaliser applied in front of the router.
pub type Normalize<B> = fn(axum::http::Request<B>) -> axum::http::Request<B>;

/// The router wrapped so paths are normalised before route matching. This is
/// what gets served; `B` is the request body type of the listener.
pub fn build_app<B>(state: AppState) -> MapRequest<Router, Normalize<B>> {
    ServiceBuilder::new()
        .map_request(crate::middleware::normalize_request as Normalize<B>)
        .service(build_router(state))
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /api/\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
