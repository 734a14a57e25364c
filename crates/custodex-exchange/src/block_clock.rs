//! Host block-height counter.
//!
//! The host network guarantees a monotonically non-decreasing block
//! height; this clock models that primitive. Tests drive it forward with
//! [`BlockClock::advance`].

use custodex_types::BlockHeight;

/// Monotone block-height counter supplied by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockClock {
    height: BlockHeight,
}

impl BlockClock {
    /// A clock starting at the given height.
    #[must_use]
    pub fn starting_at(height: BlockHeight) -> Self {
        Self { height }
    }

    /// Current height.
    #[must_use]
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    /// Advance by `blocks`. Saturates at the maximum height.
    pub fn advance(&mut self, blocks: BlockHeight) {
        self.height = self.height.saturating_add(blocks);
    }

    /// Move to an absolute height. Lower targets are ignored — the host
    /// counter never goes backwards.
    pub fn advance_to(&mut self, height: BlockHeight) {
        self.height = self.height.max(height);
    }
}
