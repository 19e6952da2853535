use serde::{Deserialize, Serialize};

/// Running per-author statistics
///
/// `average_word_count` is recomputed from the two running totals on every
/// fold step, so it is always consistent with the counts recorded at the
/// same point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub message_count: u64,
    pub total_word_count: u64,
    pub average_word_count: u64,
}

impl UserStats {
    /// Folds one message's word count into the running totals
    pub fn record(&mut self, word_count: u64) {
        self.message_count += 1;
        self.total_word_count += word_count;
        // Integer division floors, matching the historical output
        self.average_word_count = self.total_word_count / self.message_count;
    }
}
