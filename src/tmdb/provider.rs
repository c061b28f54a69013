use async_trait::async_trait;

use super::error::TmdbResult;
use super::types::{CastMember, MovieDetails, MovieSummary, PersonDetails};
use super::window::TrendingWindow;

/// Read-only access to movie metadata. The HTTP handlers only ever talk to
/// this trait, so tests can substitute an in-process fake.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Provider-ranked trending movies for the given window.
    async fn fetch_trending(&self, window: TrendingWindow) -> TmdbResult<Vec<MovieSummary>>;

    /// Full-text title search. Callers must not pass an empty query.
    async fn search_by_title(&self, query: &str) -> TmdbResult<Vec<MovieSummary>>;

    /// The provider's default discover ordering.
    ///
    /// KNOWN LIMITATION: this takes no genre, year or favorite-movie input and
    /// returns the same list for everyone. Callers that collected a
    /// [`RecommendationFilter`](super::RecommendationFilter) must run
    /// [`filter_recommendations`](super::filter_recommendations) on the result
    /// themselves.
    async fn discover_recommendations(&self) -> TmdbResult<Vec<MovieSummary>>;

    async fn fetch_movie_details(&self, id: u64) -> TmdbResult<MovieDetails>;

    /// Cast in billing order. An empty cast is not an error.
    async fn fetch_movie_cast(&self, id: u64) -> TmdbResult<Vec<CastMember>>;

    /// Person record with movie credits embedded in the same response.
    async fn fetch_person_details(&self, id: u64) -> TmdbResult<PersonDetails>;
}
