//! Block environment passed to every engine entry point.
//!
//! The engine never reads the clock or a block counter itself; the host
//! supplies both at apply time. Same env, same inputs, same outcome — the
//! determinism contract every test leans on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Height and wall clock of the block a call applies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEnv {
    /// Block height.
    pub block: u64,
    /// Block wall-clock timestamp.
    pub time: DateTime<Utc>,
}

impl BlockEnv {
    #[must_use]
    pub fn new(block: u64, time: DateTime<Utc>) -> Self {
        Self { block, time }
    }

    /// Env at a given height with the epoch timestamp. Deadline checks treat
    /// the epoch as "before any real deadline", which is what fixtures that
    /// do not exercise deadlines want.
    #[must_use]
    pub fn at_block(block: u64) -> Self {
        Self {
            block,
            time: DateTime::UNIX_EPOCH,
        }
    }

    /// Unix seconds of the block timestamp, for deadline comparisons.
    #[must_use]
    pub fn now_secs(&self) -> i64 {
        self.time.timestamp()
    }
}
