use chrono::Datelike;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenreOption {
    pub id: u32,
    pub name: &'static str,
}

/// Genres offered by the recommendation form, using the provider's ids.
pub const GENRES: &[GenreOption] = &[
    GenreOption { id: 28, name: "Action" },
    GenreOption { id: 12, name: "Adventure" },
    GenreOption { id: 16, name: "Animation" },
    GenreOption { id: 35, name: "Comedy" },
    GenreOption { id: 80, name: "Crime" },
    GenreOption { id: 18, name: "Drama" },
    GenreOption { id: 10751, name: "Family" },
    GenreOption { id: 14, name: "Fantasy" },
    GenreOption { id: 36, name: "History" },
    GenreOption { id: 27, name: "Horror" },
    GenreOption { id: 10402, name: "Music" },
    GenreOption { id: 9648, name: "Mystery" },
    GenreOption { id: 10749, name: "Romance" },
    GenreOption { id: 878, name: "Science Fiction" },
    GenreOption { id: 53, name: "Thriller" },
    GenreOption { id: 10752, name: "War" },
    GenreOption { id: 37, name: "Western" },
];

pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|g| g.id == id).map(|g| g.name)
}

pub const MIN_YEAR: i32 = 1900;
pub const DEFAULT_START_YEAR: i32 = 1990;

/// Bounds and initial selection for the release-year slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
    pub default_start: i32,
    pub default_end: i32,
}

impl YearRange {
    pub fn for_year(current: i32) -> Self {
        Self {
            min: MIN_YEAR,
            max: current,
            default_start: DEFAULT_START_YEAR.min(current),
            default_end: current,
        }
    }

    pub fn current() -> Self {
        Self::for_year(chrono::Utc::now().year())
    }
}
