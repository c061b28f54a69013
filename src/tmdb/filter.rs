use super::types::{MovieSummary, RecommendationFilter};

impl RecommendationFilter {
    pub fn is_empty(&self) -> bool {
        self.genre_id.is_none() && self.start_year.is_none() && self.end_year.is_none()
    }

    /// True when the movie satisfies every populated constraint. Movies
    /// without a usable release year pass both year bounds.
    pub fn matches(&self, movie: &MovieSummary) -> bool {
        if let Some(genre) = self.genre_id {
            if !movie.genre_ids.contains(&genre) {
                return false;
            }
        }

        let Some(year) = movie.release_year() else {
            return true;
        };

        if let Some(start) = self.start_year {
            if year < start {
                return false;
            }
        }
        if let Some(end) = self.end_year {
            if year > end {
                return false;
            }
        }

        true
    }
}

/// Keeps the movies that pass `filter`, in their original order.
pub fn filter_recommendations(
    movies: Vec<MovieSummary>,
    filter: &RecommendationFilter,
) -> Vec<MovieSummary> {
    movies.into_iter().filter(|m| filter.matches(m)).collect()
}
