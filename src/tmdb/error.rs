use std::fmt;

/// The provider call that produced an error. Used in messages and to pick
/// the freshness hint for the matching API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Trending,
    Search,
    Discover,
    MovieDetails,
    MovieCast,
    PersonDetails,
}

impl Operation {
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::Trending => "fetch trending movies",
            Operation::Search => "search movies",
            Operation::Discover => "discover movies",
            Operation::MovieDetails => "fetch movie details",
            Operation::MovieCast => "fetch movie cast",
            Operation::PersonDetails => "fetch person details",
        }
    }

    /// Advisory cache lifetime in seconds, `None` meaning "do not store".
    pub fn max_age(&self) -> Option<u32> {
        match self {
            Operation::Search => None,
            Operation::Trending | Operation::Discover => Some(3600),
            Operation::MovieDetails | Operation::MovieCast | Operation::PersonDetails => {
                Some(86400)
            }
        }
    }

    pub fn cache_control(&self) -> String {
        match self.max_age() {
            Some(secs) => format!("public, max-age={}", secs),
            None => "no-store".to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("Failed to {operation}: {status}")]
    Status { operation: Operation, status: u16 },
    #[error("Failed to {operation}: unexpected response body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

impl TmdbError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TmdbError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type TmdbResult<T> = Result<T, TmdbError>;
