pub mod genres;
pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;
