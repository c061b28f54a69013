use serde::Serialize;

use super::genres::{GenreOption, YearRange};
use crate::tmdb::{
    CastMember, Genre, ImageUrls, MovieDetails, MovieSummary, PersonDetails, PersonMovieCredit,
    RecommendationFilter, TrendingWindow,
};

/// Number of cast members shown on a movie page before "View all cast".
pub const TOP_CAST: usize = 8;
/// Production companies shown on a movie page.
pub const TOP_PRODUCTION: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_url: String,
    pub rating: String,
    pub vote_average: f64,
    pub year: String,
    pub genre_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub href: String,
}

impl MovieCard {
    pub fn from_summary(movie: &MovieSummary, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_url: images.poster(movie.poster_path.as_deref()),
            rating: format_rating(movie.vote_average),
            vote_average: movie.vote_average,
            year: display_year(movie.release_year()),
            genre_ids: movie.genre_ids.clone(),
            media_type: movie.media_type.clone(),
            href: movie_href(movie.id),
        }
    }
}

pub fn movie_cards(movies: &[MovieSummary], images: &ImageUrls) -> Vec<MovieCard> {
    movies
        .iter()
        .map(|m| MovieCard::from_summary(m, images))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastCard {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_url: String,
    pub order: u32,
    pub credit_id: String,
    pub href: String,
}

impl CastCard {
    pub fn from_member(member: &CastMember, images: &ImageUrls) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            character: member.character.clone(),
            profile_url: images.profile(member.profile_path.as_deref()),
            order: member.order,
            credit_id: member.credit_id.clone(),
            href: format!("/person/{}", member.id),
        }
    }
}

pub fn cast_cards(cast: &[CastMember], images: &ImageUrls) -> Vec<CastCard> {
    cast.iter().map(|c| CastCard::from_member(c, images)).collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailView {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    pub rating: String,
    pub vote_count: u64,
    pub genres: Vec<Genre>,
    pub production: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub top_cast: Vec<CastCard>,
    pub total_cast: usize,
    pub has_more_cast: bool,
}

impl MovieDetailView {
    pub fn new(movie: &MovieDetails, cast: &[CastMember], images: &ImageUrls) -> Self {
        let languages = movie
            .spoken_languages
            .iter()
            .map(|l| l.english_name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let top = &cast[..cast.len().min(TOP_CAST)];

        Self {
            id: movie.id,
            title: movie.title.clone(),
            tagline: movie.tagline.clone(),
            overview: movie.overview.clone(),
            year: movie.release_year(),
            release_date: movie.release_date.clone(),
            runtime: movie.runtime.filter(|r| *r > 0).map(|r| format!("{} min", r)),
            rating: format_rating(movie.vote_average),
            vote_count: movie.vote_count,
            genres: movie.genres.clone(),
            production: movie
                .production_companies
                .iter()
                .take(TOP_PRODUCTION)
                .map(|c| c.name.clone())
                .collect(),
            languages: (!languages.is_empty()).then_some(languages),
            budget: (movie.budget > 0).then(|| format_usd(movie.budget)),
            revenue: (movie.revenue > 0).then(|| format_usd(movie.revenue)),
            backdrop_url: images.backdrop(movie.backdrop_path.as_deref()),
            poster_url: images.poster(movie.poster_path.as_deref()),
            homepage: movie.homepage.clone(),
            imdb_id: movie.imdb_id.clone(),
            top_cast: cast_cards(top, images),
            total_cast: cast.len(),
            has_more_cast: cast.len() > TOP_CAST,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub year: String,
    pub poster_url: String,
    pub rating: String,
    pub href: String,
}

impl CreditCard {
    pub fn from_credit(credit: &PersonMovieCredit, images: &ImageUrls) -> Self {
        Self {
            id: credit.id,
            title: credit.title.clone(),
            role: credit
                .character
                .clone()
                .or_else(|| credit.job.clone())
                .filter(|r| !r.is_empty()),
            year: display_year(credit.release_year()),
            poster_url: images.poster(credit.poster_path.as_deref()),
            rating: format_rating(credit.vote_average),
            href: movie_href(credit.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    pub id: u64,
    pub name: String,
    pub biography: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deathday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_for_department: Option<String>,
    pub profile_url: String,
    pub also_known_as: Vec<String>,
    pub acting: Vec<CreditCard>,
    pub crew: Vec<CreditCard>,
}

impl PersonView {
    pub fn new(person: &PersonDetails, images: &ImageUrls) -> Self {
        let credits = &person.movie_credits;
        Self {
            id: person.id,
            name: person.name.clone(),
            biography: person.biography.clone(),
            birthday: person.birthday.clone(),
            deathday: person.deathday.clone(),
            place_of_birth: person.place_of_birth.clone(),
            known_for_department: person.known_for_department.clone(),
            profile_url: images.profile(person.profile_path.as_deref()),
            also_known_as: person.also_known_as.clone(),
            acting: credits
                .cast
                .iter()
                .map(|c| CreditCard::from_credit(c, images))
                .collect(),
            crew: credits
                .crew
                .iter()
                .map(|c| CreditCard::from_credit(c, images))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingView {
    pub window: TrendingWindow,
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub trending: TrendingView,
    pub genres: &'static [GenreOption],
    pub year_range: YearRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsView {
    pub filter: RecommendationFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_name: Option<&'static str>,
    /// Favorite movie as typed into the form. Discover cannot use it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_favorite: Option<String>,
    pub discovered: usize,
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn movie_href(id: u64) -> String {
    format!("/movie/{}", id)
}

pub fn format_rating(vote_average: f64) -> String {
    format!("{:.1}", vote_average)
}

pub fn display_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Whole US dollars with thousands separators, e.g. `$63,000,000`.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::{ProductionCompany, SpokenLanguage};

    fn cast_member(id: u64, order: u32) -> CastMember {
        CastMember {
            id,
            name: format!("Actor {}", id),
            character: format!("Role {}", id),
            profile_path: None,
            order,
            credit_id: format!("credit-{}", id),
            known_for_department: Some("Acting".to_string()),
        }
    }

    fn details() -> MovieDetails {
        serde_json::from_str(
            r#"{
                "id": 550,
                "title": "Fight Club",
                "tagline": "",
                "overview": "An insomniac office worker...",
                "poster_path": "/poster.jpg",
                "backdrop_path": null,
                "release_date": "1999-10-15",
                "runtime": 139,
                "vote_average": 8.433,
                "vote_count": 26280,
                "budget": 63000000,
                "revenue": 0,
                "genres": [{"id": 18, "name": "Drama"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1000), "$1,000");
        assert_eq!(format_usd(63000000), "$63,000,000");
        assert_eq!(format_usd(100853753), "$100,853,753");
    }

    #[test]
    fn test_movie_card() {
        let movie: MovieSummary = serde_json::from_str(
            r#"{"id": 7, "title": "Seven", "vote_average": 8.36, "release_date": ""}"#,
        )
        .unwrap();
        let card = MovieCard::from_summary(&movie, &ImageUrls::default());
        assert_eq!(card.rating, "8.4");
        assert_eq!(card.year, "N/A");
        assert_eq!(card.href, "/movie/7");
        assert_eq!(card.poster_url, crate::tmdb::images::POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_movie_detail_view() {
        let mut movie = details();
        movie.production_companies = (1..=5)
            .map(|i| ProductionCompany {
                id: i,
                name: format!("Studio {}", i),
                logo_path: None,
                origin_country: None,
            })
            .collect();
        movie.spoken_languages = vec![
            SpokenLanguage {
                english_name: "English".to_string(),
                iso_639_1: "en".to_string(),
                name: "English".to_string(),
            },
            SpokenLanguage {
                english_name: "French".to_string(),
                iso_639_1: "fr".to_string(),
                name: "Français".to_string(),
            },
        ];
        let cast: Vec<CastMember> = (0..10).map(|i| cast_member(100 + i, i as u32)).collect();

        let view = MovieDetailView::new(&movie, &cast, &ImageUrls::default());
        assert_eq!(view.tagline, None);
        assert_eq!(view.year, Some(1999));
        assert_eq!(view.runtime.as_deref(), Some("139 min"));
        assert_eq!(view.rating, "8.4");
        assert_eq!(view.budget.as_deref(), Some("$63,000,000"));
        assert_eq!(view.revenue, None);
        assert_eq!(view.backdrop_url, None);
        assert_eq!(view.production, vec!["Studio 1", "Studio 2", "Studio 3"]);
        assert_eq!(view.languages.as_deref(), Some("English, French"));
        assert_eq!(view.top_cast.len(), TOP_CAST);
        assert_eq!(view.top_cast[0].id, 100);
        assert_eq!(view.total_cast, 10);
        assert!(view.has_more_cast);
    }

    #[test]
    fn test_movie_detail_view_small_cast() {
        let cast = vec![cast_member(1, 0)];
        let view = MovieDetailView::new(&details(), &cast, &ImageUrls::default());
        assert_eq!(view.top_cast.len(), 1);
        assert!(!view.has_more_cast);
        assert_eq!(
            view.top_cast[0].profile_url,
            crate::tmdb::images::PROFILE_PLACEHOLDER
        );
    }
}
