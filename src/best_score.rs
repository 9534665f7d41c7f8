//! Best-score tracking
//!
//! A single integer persisted as a decimal string under one storage key.

use crate::platform::KeyValueStore;

/// Storage key for the best score
pub const STORAGE_KEY: &str = "dodgefall_best";

/// The best final score seen across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parse a stored value. Missing, empty or non-numeric input is 0;
    /// numeric input is floored and clamped to be non-negative.
    pub fn parse(raw: Option<&str>) -> u64 {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return 0;
        };
        if let Ok(v) = raw.parse::<u64>() {
            return v;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v.floor() as u64,
            _ => 0,
        }
    }

    /// Read the best score from storage; any failure reads as 0
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(STORAGE_KEY) {
            Ok(raw) => {
                let value = Self::parse(raw.as_deref());
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                Self::default()
            }
        }
    }

    /// Offer a finished run's score. Returns true (and persists) when it
    /// beats the current best.
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, score: u64, store: &mut S) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = store.set(STORAGE_KEY, &score.to_string()) {
            log::warn!("Could not save best score: {}", e);
        } else {
            log::info!("New best score {}", score);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryStore, StorageError};

    /// Store whose every call fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(BestScore::parse(None), 0);
        assert_eq!(BestScore::parse(Some("")), 0);
        assert_eq!(BestScore::parse(Some("abc")), 0);
        assert_eq!(BestScore::parse(Some("NaN")), 0);
        assert_eq!(BestScore::parse(Some("-5")), 0);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(BestScore::parse(Some("50")), 50);
        assert_eq!(BestScore::parse(Some(" 42 ")), 42);
        assert_eq!(BestScore::parse(Some("12.9")), 12);
    }

    #[test]
    fn test_record_and_persist() {
        let mut store = MemoryStore::with(STORAGE_KEY, "50");
        let mut best = BestScore::load(&store);
        assert_eq!(best.value, 50);

        assert!(best.record(75, &mut store));
        assert_eq!(best.value, 75);
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("75"));

        assert!(!best.record(40, &mut store));
        assert_eq!(best.value, 75);
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("75"));
    }

    #[test]
    fn test_equal_score_is_not_a_record() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::new(30);
        assert!(!best.record(30, &mut store));
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_broken_store_falls_back() {
        let mut store = BrokenStore;
        let mut best = BestScore::load(&store);
        assert_eq!(best.value, 0);
        // Still tracked in memory even though the write failed
        assert!(best.record(10, &mut store));
        assert_eq!(best.value, 10);
    }
}
