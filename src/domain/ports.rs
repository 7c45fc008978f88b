use crate::domain::model::WardrobeResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// The remote service that computes wardrobes, keyed by capsule token.
#[async_trait]
pub trait WardrobeClient: Send + Sync {
    async fn fetch_wardrobe(&self, token: &str) -> Result<WardrobeResponse>;
}

/// Access to the visible location, so the controller never touches a real browser.
pub trait Navigator: Send + Sync {
    fn location(&self) -> &Url;

    /// Swaps the current location without adding a history entry.
    fn replace(&mut self, url: Url);
}

pub trait ConfigProvider: Send + Sync {
    fn server(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
