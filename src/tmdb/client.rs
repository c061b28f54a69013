use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{Operation, TmdbError, TmdbResult};
use super::provider::MovieProvider;
use super::types::{CastMember, Credits, MovieDetails, MovieSummary, Page, PersonDetails};
use super::window::TrendingWindow;
use crate::config::TmdbConfig;

/// HTTP client for the TMDB v3 REST API.
///
/// Every call is a single GET: no retries, no caching, no timeout beyond
/// what reqwest does by default.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
    include_adult: bool,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> TmdbResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cinescope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TmdbError::Client)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            include_adult: config.include_adult,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        params: &[(&str, &str)],
    ) -> TmdbResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(operation = %operation, path = %path, "TMDB request");

        let mut query = vec![("api_key", self.api_key.as_str())];
        query.extend_from_slice(params);

        let resp = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| TmdbError::Transport { operation, source })?;

        let status = resp.status();
        if !status.is_success() {
            debug!(operation = %operation, status = status.as_u16(), "TMDB request failed");
            return Err(TmdbError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| TmdbError::Transport { operation, source })?;

        serde_json::from_slice(&body).map_err(|source| TmdbError::Decode { operation, source })
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn fetch_trending(&self, window: TrendingWindow) -> TmdbResult<Vec<MovieSummary>> {
        let path = format!("/trending/movie/{}", window);
        let page: Page<MovieSummary> = self.get_json(Operation::Trending, &path, &[]).await?;
        Ok(page.results)
    }

    async fn search_by_title(&self, query: &str) -> TmdbResult<Vec<MovieSummary>> {
        let include_adult = if self.include_adult { "true" } else { "false" };
        let page: Page<MovieSummary> = self
            .get_json(
                Operation::Search,
                "/search/movie",
                &[("query", query), ("include_adult", include_adult)],
            )
            .await?;
        Ok(page.results)
    }

    async fn discover_recommendations(&self) -> TmdbResult<Vec<MovieSummary>> {
        let page: Page<MovieSummary> = self
            .get_json(Operation::Discover, "/discover/movie", &[])
            .await?;
        Ok(page.results)
    }

    async fn fetch_movie_details(&self, id: u64) -> TmdbResult<MovieDetails> {
        let path = format!("/movie/{}", id);
        self.get_json(
            Operation::MovieDetails,
            &path,
            &[("language", self.language.as_str())],
        )
        .await
    }

    async fn fetch_movie_cast(&self, id: u64) -> TmdbResult<Vec<CastMember>> {
        let path = format!("/movie/{}/credits", id);
        let credits: Credits = self
            .get_json(
                Operation::MovieCast,
                &path,
                &[("language", self.language.as_str())],
            )
            .await?;

        let mut cast = credits.cast.unwrap_or_default();
        cast.sort_by_key(|c| c.order);
        Ok(cast)
    }

    async fn fetch_person_details(&self, id: u64) -> TmdbResult<PersonDetails> {
        let path = format!("/person/{}", id);
        self.get_json(
            Operation::PersonDetails,
            &path,
            &[
                ("language", self.language.as_str()),
                ("append_to_response", "movie_credits"),
            ],
        )
        .await
    }
}
