use async_trait::async_trait;
use parley_core::{Reply, Result, Turn};

/// A source of replies, tried by the router in priority order.
#[async_trait]
pub trait ResponseStrategy: Send + Sync {
    /// Whether this strategy should be tried for the turn.
    fn applies_to(&self, turn: &Turn) -> bool;

    /// Produces a reply for the turn.
    ///
    /// # Errors
    /// Returns an error when the strategy cannot answer; the router then
    /// moves on to the next strategy.
    async fn resolve(&self, turn: &Turn) -> Result<Reply>;

    /// Higher priorities are tried first.
    fn priority(&self) -> u8;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}
