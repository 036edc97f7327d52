use serde::{Deserialize, Serialize};

use crate::enums::TrustBand;

/// The scoring service's verdict for an identity at fetch time.
///
/// Always replaced as a whole. Merging a partial response would leave the
/// flag and warning describing a different score than the one shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub score: Option<f64>,
    pub flag: String,
    pub warning: String,
}

impl ScoreSnapshot {
    #[must_use]
    pub fn new(score: Option<f64>, flag: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            score,
            flag: flag.into(),
            warning: warning.into(),
        }
    }

    /// Band the numeric score falls into, independent of the flag text.
    #[must_use]
    pub fn band(&self) -> Option<TrustBand> {
        self.score.and_then(TrustBand::for_score)
    }

    /// Whether the flag text disagrees with the band of the numeric score.
    ///
    /// Happens after a recalculation updates only the score. Unknown flags or
    /// out-of-range scores are never reported as stale.
    #[must_use]
    pub fn flag_may_be_stale(&self) -> bool {
        match (self.band(), TrustBand::from_flag(&self.flag)) {
            (Some(score_band), Some(flag_band)) => score_band != flag_band,
            _ => false,
        }
    }
}
