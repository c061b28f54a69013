pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

pub const POSTER_PLACEHOLDER: &str = "/placeholder.svg?height=750&width=500";
pub const PROFILE_PLACEHOLDER: &str = "/placeholder.svg?height=185&width=185";

/// Resolution tiers offered by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Cast thumbnails.
    W185,
    /// Posters and card backdrops.
    W500,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Builds CDN URLs from the path fragments the provider returns. Nothing is
/// fetched here.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        let path = path?.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with('/') {
            Some(format!("{}/{}{}", self.base_url, size.as_str(), path))
        } else {
            Some(format!("{}/{}/{}", self.base_url, size.as_str(), path))
        }
    }

    pub fn poster(&self, path: Option<&str>) -> String {
        self.url(path, ImageSize::W500)
            .unwrap_or_else(|| POSTER_PLACEHOLDER.to_string())
    }

    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        self.url(path, ImageSize::Original)
    }

    pub fn profile(&self, path: Option<&str>) -> String {
        self.url(path, ImageSize::W185)
            .unwrap_or_else(|| PROFILE_PLACEHOLDER.to_string())
    }
}
