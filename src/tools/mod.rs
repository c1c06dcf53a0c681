pub mod title_suggester;

pub use title_suggester::{Suggestion, TitleSuggester};

use anyhow::Result;

/// Tool trait for model-backed operations.
///
/// Not object-safe (associated types). The tidier is generic over the
/// concrete tool so tests can substitute a stub.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn name(&self) -> &str;
    async fn run(&self, input: Self::Input) -> Result<Self::Output>;
}
