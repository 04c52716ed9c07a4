use super::WindowRecord;
use crate::constants::DEFAULT_Z_BASE;

/// Hands out stacking values that only ever grow.
///
/// Every value returned by [`next`](ZOrderAllocator::next) is strictly
/// greater than the base and than every value handed out before it.
#[derive(Debug, Clone)]
pub struct ZOrderAllocator {
    last: u64,
}

impl Default for ZOrderAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_Z_BASE)
    }
}

impl ZOrderAllocator {
    pub fn new(base: u64) -> Self {
        Self { last: base }
    }

    pub fn next(&mut self) -> u64 {
        self.last = self.last.saturating_add(1);
        self.last
    }

    /// Identifier of the visible record with the highest stacking value.
    pub fn topmost<'a, I>(records: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a WindowRecord>,
    {
        records
            .into_iter()
            .filter(|record| record.is_visible())
            .max_by_key(|record| record.z_index())
            .map(|record| record.id())
    }
}
