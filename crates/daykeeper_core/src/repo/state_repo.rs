//! Typed persistence of the four core state keys.
//!
//! # Responsibility
//! - Encode/decode the persisted JSON payloads behind stable logical keys.
//! - Keep serialization details out of service orchestration.
//!
//! # Invariants
//! - Reads never fail: absent keys, transport errors and malformed JSON
//!   all degrade to the default value with a `recovered` log event.
//! - Writes are independent per key; callers own the ordering and any
//!   crash-window consequences.

use crate::model::date_key::DateKey;
use crate::model::goal::Goal;
use crate::model::history::GoalHistoryEntry;
use crate::model::record::DailyRecord;
use crate::repo::kv_store::{KeyValueStore, StoreError, StoreResult};
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// DateKey → DailyRecord map, one JSON object.
pub const DAILY_RECORDS_KEY: &str = "daily-records";
/// Newest-first capped ledger, one JSON array.
pub const GOAL_HISTORY_KEY: &str = "goal-history";
/// Live fixed-goal list, one JSON array.
pub const FIXED_GOALS_KEY: &str = "fixed-goals";
/// DateKey of the last rollover check, one JSON string.
pub const LAST_ACCESS_KEY: &str = "last-access-date";

/// Typed accessor layer over a [`KeyValueStore`].
pub struct StateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_daily_records(&self) -> BTreeMap<DateKey, DailyRecord> {
        self.decode_or_default(DAILY_RECORDS_KEY)
    }

    pub fn store_daily_records(
        &self,
        records: &BTreeMap<DateKey, DailyRecord>,
    ) -> StoreResult<()> {
        self.encode_and_set(DAILY_RECORDS_KEY, records)
    }

    pub fn load_goal_history(&self) -> Vec<GoalHistoryEntry> {
        self.decode_or_default(GOAL_HISTORY_KEY)
    }

    pub fn store_goal_history(&self, history: &[GoalHistoryEntry]) -> StoreResult<()> {
        self.encode_and_set(GOAL_HISTORY_KEY, &history)
    }

    /// Returns `None` when no readable fixed-goal list was ever persisted,
    /// so the caller can seed and persist the default set.
    pub fn load_fixed_goals(&self) -> Option<Vec<Goal>> {
        self.decode_optional(FIXED_GOALS_KEY)
    }

    pub fn store_fixed_goals(&self, goals: &[Goal]) -> StoreResult<()> {
        self.encode_and_set(FIXED_GOALS_KEY, &goals)
    }

    pub fn load_last_access(&self) -> Option<DateKey> {
        self.decode_optional(LAST_ACCESS_KEY)
    }

    pub fn store_last_access(&self, date: &DateKey) -> StoreResult<()> {
        self.encode_and_set(LAST_ACCESS_KEY, date)
    }

    fn decode_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.decode_optional(key).unwrap_or_default()
    }

    fn decode_optional<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                error!("event=state_read module=repo status=recovered key={key} error={err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=state_decode module=repo status=recovered key={key} error={err}"
                );
                None
            }
        }
    }

    fn encode_and_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let encoded = serde_json::to_string(value).map_err(StoreError::Encode)?;
        self.store.set(key, &encoded)
    }
}
