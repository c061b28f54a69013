use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::genres::{genre_name, YearRange, GENRES};
use super::types::*;
use crate::server::AppState;
use crate::tmdb::{
    filter_recommendations, Operation, RecommendationFilter, TmdbError, TrendingWindow,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Provider(#[from] TmdbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Provider(err) => {
                error!(error = %err, "provider request failed");
                let status = if err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, "Something went wrong".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// JSON body tagged with the freshness hint of the provider call behind it.
fn cached<T: Serialize>(operation: Operation, body: T) -> Response {
    (
        [(header::CACHE_CONTROL, operation.cache_control())],
        Json(body),
    )
        .into_response()
}

fn parse_window(window: Option<&str>) -> Result<TrendingWindow, ApiError> {
    match window.map(str::trim).filter(|w| !w.is_empty()) {
        None => Ok(TrendingWindow::default()),
        Some(w) => w
            .parse()
            .map_err(|e: crate::tmdb::window::UnknownWindow| ApiError::BadRequest(e.to_string())),
    }
}

pub async fn home(State(state): State<AppState>) -> Result<Response, ApiError> {
    let window = TrendingWindow::default();
    let movies = state.provider.fetch_trending(window).await?;

    let view = HomeView {
        trending: TrendingView {
            window,
            movies: movie_cards(&movies, &state.images),
        },
        genres: GENRES,
        year_range: YearRange::current(),
    };

    Ok(cached(Operation::Trending, view))
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub window: Option<String>,
}

pub async fn trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Result<Response, ApiError> {
    let window = parse_window(params.window.as_deref())?;
    let movies = state.provider.fetch_trending(window).await?;

    let view = TrendingView {
        window,
        movies: movie_cards(&movies, &state.images),
    };

    Ok(cached(Operation::Trending, view))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(alias = "q")]
    pub query: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let movies = state.provider.search_by_title(query).await?;
    Ok(cached(Operation::Search, movie_cards(&movies, &state.images)))
}

pub async fn list_genres() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "genres": GENRES,
        "yearRange": YearRange::current(),
    }))
}

/// Raw form input. Everything arrives as text so "any" and "" can mean
/// "no constraint".
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    #[serde(alias = "genreId")]
    pub genre: Option<String>,
    #[serde(rename = "startYear", alias = "start_year")]
    pub start_year: Option<String>,
    #[serde(rename = "endYear", alias = "end_year")]
    pub end_year: Option<String>,
    #[serde(alias = "favoriteMovie")]
    pub favorite: Option<String>,
}

fn optional_field<T: std::str::FromStr>(
    name: &str,
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("any") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("invalid {}: {:?}", name, v))),
    }
}

impl RecommendationQuery {
    pub fn to_filter(&self) -> Result<RecommendationFilter, ApiError> {
        let filter = RecommendationFilter {
            genre_id: optional_field("genre", self.genre.as_deref())?,
            start_year: optional_field("startYear", self.start_year.as_deref())?,
            end_year: optional_field("endYear", self.end_year.as_deref())?,
        };

        if let (Some(start), Some(end)) = (filter.start_year, filter.end_year) {
            if start > end {
                return Err(ApiError::BadRequest(
                    "startYear must not be after endYear".to_string(),
                ));
            }
        }

        Ok(filter)
    }
}

pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> Result<Response, ApiError> {
    let filter = params.to_filter()?;
    let favorite = params
        .favorite
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    if let Some(ref fav) = favorite {
        debug!(favorite = %fav, "favorite movie is not used by discover");
    }

    // Discover ignores the form input, so the filter is applied here.
    let discovered = state.provider.discover_recommendations().await?;
    let total = discovered.len();
    let movies = filter_recommendations(discovered, &filter);
    debug!(discovered = total, kept = movies.len(), ?filter, "filtered recommendations");

    let view = RecommendationsView {
        filter,
        genre_name: filter.genre_id.and_then(genre_name),
        ignored_favorite: favorite,
        discovered: total,
        movies: movie_cards(&movies, &state.images),
    };

    Ok(cached(Operation::Discover, view))
}

pub async fn movie_detail(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> Result<Response, ApiError> {
    let (movie, cast) = tokio::try_join!(
        state.provider.fetch_movie_details(movie_id),
        state.provider.fetch_movie_cast(movie_id),
    )?;

    let view = MovieDetailView::new(&movie, &cast, &state.images);
    Ok(cached(Operation::MovieDetails, view))
}

pub async fn movie_cast(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> Result<Response, ApiError> {
    let cast = state.provider.fetch_movie_cast(movie_id).await?;
    Ok(cached(Operation::MovieCast, cast_cards(&cast, &state.images)))
}

pub async fn person_detail(
    State(state): State<AppState>,
    Path(person_id): Path<u64>,
) -> Result<Response, ApiError> {
    let person = state.provider.fetch_person_details(person_id).await?;
    Ok(cached(
        Operation::PersonDetails,
        PersonView::new(&person, &state.images),
    ))
}
