//! HTTP API tests against an in-process fake provider.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use cinescope::config::Config;
use cinescope::server::{build_app, build_router, AppState};
use cinescope::tmdb::{
    CastMember, MovieDetails, MovieProvider, MovieSummary, Operation, PersonDetails, TmdbError,
    TmdbResult, TrendingWindow,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct FakeProvider {
    movies: Vec<MovieSummary>,
    cast: Vec<CastMember>,
    searches: Mutex<Vec<String>>,
    windows: Mutex<Vec<TrendingWindow>>,
}

fn movie(id: u64, title: &str, genres: &[u32], release_date: Option<&str>) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: Some(format!("/{}.jpg", id)),
        backdrop_path: None,
        release_date: release_date.map(str::to_string),
        vote_average: 7.25,
        genre_ids: genres.to_vec(),
        media_type: None,
    }
}

fn not_found(operation: Operation) -> TmdbError {
    TmdbError::Status {
        operation,
        status: 404,
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    async fn fetch_trending(&self, window: TrendingWindow) -> TmdbResult<Vec<MovieSummary>> {
        self.windows.lock().unwrap().push(window);
        Ok(self.movies.clone())
    }

    async fn search_by_title(&self, query: &str) -> TmdbResult<Vec<MovieSummary>> {
        self.searches.lock().unwrap().push(query.to_string());
        let needle = query.to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn discover_recommendations(&self) -> TmdbResult<Vec<MovieSummary>> {
        Ok(self.movies.clone())
    }

    async fn fetch_movie_details(&self, id: u64) -> TmdbResult<MovieDetails> {
        if id == 999999 {
            return Err(not_found(Operation::MovieDetails));
        }
        if id == 500 {
            return Err(TmdbError::Status {
                operation: Operation::MovieDetails,
                status: 500,
            });
        }
        Ok(serde_json::from_value(json!({
            "id": id,
            "title": "Heat",
            "tagline": "A Los Angeles crime saga",
            "release_date": "1995-12-15",
            "runtime": 170,
            "vote_average": 7.9,
            "budget": 60000000,
            "revenue": 187436818,
            "backdrop_path": "/heat-wide.jpg",
            "poster_path": null,
            "genres": [{"id": 80, "name": "Crime"}]
        }))
        .unwrap())
    }

    async fn fetch_movie_cast(&self, _id: u64) -> TmdbResult<Vec<CastMember>> {
        Ok(self.cast.clone())
    }

    async fn fetch_person_details(&self, id: u64) -> TmdbResult<PersonDetails> {
        if id != 1158 {
            return Err(not_found(Operation::PersonDetails));
        }
        Ok(serde_json::from_value(json!({
            "id": 1158,
            "name": "Al Pacino",
            "birthday": "1940-04-25",
            "profile_path": "/pacino.jpg",
            "movie_credits": {
                "cast": [{"id": 949, "title": "Heat", "character": "Vincent Hanna",
                          "release_date": "1995-12-15", "credit_id": "c1"}],
                "crew": []
            }
        }))
        .unwrap())
    }
}

fn sample_provider() -> FakeProvider {
    FakeProvider {
        movies: vec![
            movie(1, "Mad Max: Fury Road", &[28, 12], Some("2015-05-13")),
            movie(2, "Gladiator", &[28, 18], Some("2000-05-01")),
            movie(3, "The Godfather", &[18, 80], Some("1972-03-14")),
            movie(4, "Untitled Action Project", &[28], None),
        ],
        cast: (0..10)
            .map(|i| CastMember {
                id: 100 + i,
                name: format!("Actor {}", i),
                character: format!("Role {}", i),
                profile_path: None,
                order: i as u32,
                credit_id: format!("credit-{}", i),
                known_for_department: None,
            })
            .collect(),
        ..FakeProvider::default()
    }
}

fn app(provider: Arc<FakeProvider>) -> Router {
    let mut config = Config::default();
    config.tmdb.api_key = "unused".to_string();
    build_router(AppState::new(config, provider))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, cache_control, body)
}

fn card_ids(cards: &Value) -> Vec<u64> {
    cards
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_trending_defaults_to_day() {
    let provider = Arc::new(sample_provider());
    let (status, cache, body) = get(app(provider.clone()), "/api/trending").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("public, max-age=3600"));
    assert_eq!(body["window"], "day");
    assert_eq!(card_ids(&body["movies"]), vec![1, 2, 3, 4]);
    assert_eq!(
        body["movies"][0]["posterUrl"],
        "https://image.tmdb.org/t/p/w500/1.jpg"
    );
    assert_eq!(body["movies"][3]["year"], "N/A");
    assert_eq!(*provider.windows.lock().unwrap(), vec![TrendingWindow::Day]);
}

#[tokio::test]
async fn test_trending_week_and_invalid_window() {
    let provider = Arc::new(sample_provider());
    let (status, _, body) = get(app(provider.clone()), "/api/trending?window=week").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window"], "week");

    let (status, _, _) = get(app(provider.clone()), "/api/trending?window=month").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(*provider.windows.lock().unwrap(), vec![TrendingWindow::Week]);
}

#[tokio::test]
async fn test_home_includes_form_options() {
    let (status, _, body) = get(app(Arc::new(sample_provider())), "/api/home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trending"]["movies"].as_array().unwrap().len(), 4);
    assert_eq!(body["genres"].as_array().unwrap().len(), 17);
    assert_eq!(body["yearRange"]["min"], 1900);
    assert_eq!(body["yearRange"]["defaultStart"], 1990);
}

#[tokio::test]
async fn test_search() {
    let provider = Arc::new(sample_provider());
    let (status, cache, body) = get(app(provider.clone()), "/api/search?query=%20god%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("no-store"));
    assert_eq!(card_ids(&body), vec![3]);
    assert_eq!(*provider.searches.lock().unwrap(), vec!["god".to_string()]);
}

#[tokio::test]
async fn test_blank_search_never_reaches_provider() {
    let provider = Arc::new(sample_provider());
    for uri in ["/api/search", "/api/search?query=", "/api/search?query=%20%20"] {
        let (status, _, body) = get(app(provider.clone()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string());
    }
    assert!(provider.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_apply_filter() {
    let uri = "/api/recommendations?genre=28&startYear=2000&endYear=2010&favorite=Heat";
    let (status, _, body) = get(app(Arc::new(sample_provider())), uri).await;

    assert_eq!(status, StatusCode::OK);
    // Gladiator is in range; the undated action title passes the year bounds.
    assert_eq!(card_ids(&body["movies"]), vec![2, 4]);
    assert_eq!(body["discovered"], 4);
    assert_eq!(body["genreName"], "Action");
    assert_eq!(body["ignoredFavorite"], "Heat");
    assert_eq!(body["filter"]["genreId"], 28);
}

#[tokio::test]
async fn test_recommendations_without_filter() {
    let (status, _, body) = get(
        app(Arc::new(sample_provider())),
        "/api/recommendations?genre=any",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_ids(&body["movies"]), vec![1, 2, 3, 4]);
    assert!(body.get("ignoredFavorite").is_none());
}

#[tokio::test]
async fn test_recommendations_bad_input() {
    let (status, _, _) = get(
        app(Arc::new(sample_provider())),
        "/api/recommendations?startYear=2010&endYear=2000",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_detail() {
    let (status, cache, body) = get(app(Arc::new(sample_provider())), "/api/movie/949").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("public, max-age=86400"));
    assert_eq!(body["title"], "Heat");
    assert_eq!(body["year"], 1995);
    assert_eq!(body["runtime"], "170 min");
    assert_eq!(body["budget"], "$60,000,000");
    assert_eq!(body["revenue"], "$187,436,818");
    assert_eq!(
        body["backdropUrl"],
        "https://image.tmdb.org/t/p/original/heat-wide.jpg"
    );
    assert_eq!(body["posterUrl"], "/placeholder.svg?height=750&width=500");
    assert_eq!(body["topCast"].as_array().unwrap().len(), 8);
    assert_eq!(body["totalCast"], 10);
    assert_eq!(body["hasMoreCast"], true);
}

#[tokio::test]
async fn test_movie_not_found_is_generic_404() {
    let (status, _, body) = get(app(Arc::new(sample_provider())), "/api/movie/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Something went wrong"}));
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let (status, _, body) = get(app(Arc::new(sample_provider())), "/api/movie/500").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Something went wrong");
}

#[tokio::test]
async fn test_non_numeric_movie_id() {
    let provider = Arc::new(sample_provider());
    let response = app(provider)
        .oneshot(Request::get("/api/movie/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_cast() {
    let (status, _, body) = get(app(Arc::new(sample_provider())), "/api/movie/949/cast").await;

    assert_eq!(status, StatusCode::OK);
    let cast = body.as_array().unwrap();
    assert_eq!(cast.len(), 10);
    assert_eq!(cast[0]["href"], "/person/100");
    assert_eq!(cast[0]["profileUrl"], "/placeholder.svg?height=185&width=185");
}

#[tokio::test]
async fn test_person_detail() {
    let (status, _, body) = get(app(Arc::new(sample_provider())), "/api/person/1158").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Al Pacino");
    assert_eq!(
        body["profileUrl"],
        "https://image.tmdb.org/t/p/w185/pacino.jpg"
    );
    assert_eq!(body["acting"][0]["role"], "Vincent Hanna");
    assert_eq!(body["acting"][0]["year"], "1995");
    assert_eq!(body["acting"][0]["href"], "/movie/949");

    let (status, _, _) = get(app(Arc::new(sample_provider())), "/api/person/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_genres_and_fallback() {
    let (status, _, body) = get(app(Arc::new(sample_provider())), "/api/genres").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"][0], json!({"id": 28, "name": "Action"}));

    let (status, _, _) = get(app(Arc::new(sample_provider())), "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_served_app_normalizes_paths() {
    let mut config = Config::default();
    config.tmdb.api_key = "unused".to_string();
    let app = build_app::<Body>(AppState::new(config, Arc::new(sample_provider())));

    let response = app
        .oneshot(
            Request::get("/api//movie/949/cast/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
