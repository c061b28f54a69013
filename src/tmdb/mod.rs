pub mod client;
pub mod error;
pub mod filter;
pub mod images;
pub mod provider;
pub mod types;
pub mod window;

pub use client::TmdbClient;
pub use error::{Operation, TmdbError, TmdbResult};
pub use filter::filter_recommendations;
pub use images::{ImageSize, ImageUrls};
pub use provider::MovieProvider;
pub use types::*;
pub use window::TrendingWindow;
