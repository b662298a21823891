//! Collection counters for dashboard and statistics pages.

use crate::model::classification::{Classification, ShelfStatus};
use crate::model::item::Item;

/// Per-classification counts of one collection snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub own: usize,
    pub reading: usize,
    pub to_buy: usize,
}

impl CollectionStats {
    pub fn from_items(items: &[Item]) -> Self {
        items
            .iter()
            .fold(Self::default(), |mut stats, item| {
                stats.total += 1;
                match item.classification {
                    Classification::Completed(true) => stats.completed += 1,
                    Classification::Completed(false) => stats.pending += 1,
                    Classification::Status(ShelfStatus::Own) => stats.own += 1,
                    Classification::Status(ShelfStatus::Reading) => stats.reading += 1,
                    Classification::Status(ShelfStatus::ToBuy) => stats.to_buy += 1,
                }
                stats
            })
    }

    /// Share of `count` in `total`, rounded to a whole percent; 0 when empty.
    pub fn percent(&self, count: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((count as f64 / self.total as f64) * 100.0).round() as u32
    }
}
