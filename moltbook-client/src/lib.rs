pub mod api;
pub mod listing;


use async_trait::async_trait;
use weather_core::{CoreError, Post};

pub use api::{MoltbookClient, SortOrder};
pub use listing::{merge_samples, normalize_listing, RawPost};

/// Source of the post batch a mood report is computed from.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>, CoreError>;
}
