//! Survival-time leaderboard
//!
//! The game reports finished runs through the `Leaderboard` trait so the
//! backing service is pluggable. `LocalLeaderboard` keeps the top 10 in
//! LocalStorage; `NoopLeaderboard` discards everything.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::round_centis;

/// Maximum number of records to keep
pub const MAX_RECORDS: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub name: String,
    /// Survival time in seconds (2-decimal precision)
    pub time: f64,
}

impl LeaderboardRecord {
    pub fn new(name: impl Into<String>, time_secs: f64) -> Self {
        Self {
            name: name.into(),
            time: round_centis(time_secs),
        }
    }
}

/// Somewhere finished runs are reported to and ranked.
///
/// Submission is best effort: implementations log failures instead of
/// surfacing them.
pub trait Leaderboard {
    /// Record a finished run; returns the rank it reached (1-indexed), if any
    fn submit(&mut self, record: LeaderboardRecord) -> Option<usize>;

    /// Best `n` records, longest survival first
    fn top(&self, n: usize) -> Vec<LeaderboardRecord>;
}

/// Leaderboard that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLeaderboard;

impl Leaderboard for NoopLeaderboard {
    fn submit(&mut self, record: LeaderboardRecord) -> Option<usize> {
        log::debug!("Leaderboard disabled, dropping {} ({:.2}s)", record.name, record.time);
        None
    }

    fn top(&self, _n: usize) -> Vec<LeaderboardRecord> {
        Vec::new()
    }
}

/// Top-10 leaderboard persisted to local storage
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalLeaderboard {
    pub entries: Vec<LeaderboardRecord>,
}

impl LocalLeaderboard {
    const STORAGE_KEY: &'static str = "last_seconds_ranking";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a time qualifies for the leaderboard
    pub fn qualifies(&self, time: f64) -> bool {
        if time <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_RECORDS {
            return true;
        }
        // Check if time beats the lowest entry
        self.entries.last().map(|e| time > e.time).unwrap_or(true)
    }

    /// Insert a record (if it qualifies), keeping entries sorted descending.
    /// Returns the rank achieved (1-indexed).
    pub fn add(&mut self, record: LeaderboardRecord) -> Option<usize> {
        if !self.qualifies(record.time) {
            return None;
        }

        let pos = self.entries.iter().position(|e| record.time > e.time);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_RECORDS);
        Some(rank)
    }

    /// Load from storage, falling back to an empty board
    pub fn load() -> Self {
        let Some(json) = storage::get_item(Self::STORAGE_KEY) else {
            log::info!("No leaderboard found, starting fresh");
            return Self::new();
        };
        match serde_json::from_str::<LocalLeaderboard>(&json) {
            Ok(mut board) => {
                board
                    .entries
                    .sort_by(|a, b| b.time.partial_cmp(&a.time).unwrap_or(std::cmp::Ordering::Equal));
                board.entries.truncate(MAX_RECORDS);
                log::info!("Loaded {} leaderboard records", board.entries.len());
                board
            }
            Err(e) => {
                log::warn!("Discarding unreadable leaderboard: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage::set_item(Self::STORAGE_KEY, &json) {
                    log::info!("Leaderboard saved ({} entries)", self.entries.len());
                }
            }
            Err(e) => log::warn!("Failed to serialize leaderboard: {}", e),
        }
    }
}

impl Leaderboard for LocalLeaderboard {
    fn submit(&mut self, record: LeaderboardRecord) -> Option<usize> {
        let name = record.name.clone();
        let rank = self.add(record);
        match rank {
            Some(rank) => {
                log::info!("{} placed #{} on the leaderboard", name, rank);
                self.save();
            }
            None => log::info!("{}'s run did not make the top {}", name, MAX_RECORDS),
        }
        rank
    }

    fn top(&self, n: usize) -> Vec<LeaderboardRecord> {
        self.entries.iter().take(n.min(MAX_RECORDS)).cloned().collect()
    }
}

/// One ranking line: zero-padded rank, upper-cased name, time with 2 decimals
pub fn format_rank_row(rank: usize, record: &LeaderboardRecord) -> String {
    format!("{:02}  {}  {:.2}s", rank, record.name.to_uppercase(), record.time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending_and_capped() {
        let mut board = LocalLeaderboard::new();
        for (i, t) in [12.5, 3.0, 40.25, 7.0, 19.0, 1.0, 2.0, 8.0, 9.0, 10.0, 11.0, 0.5]
            .into_iter()
            .enumerate()
        {
            board.add(LeaderboardRecord::new(format!("p{}", i), t));
        }
        let top = board.top(10);
        assert_eq!(top.len(), MAX_RECORDS);
        assert!(top.windows(2).all(|w| w[0].time >= w[1].time));
        assert_eq!(top[0].time, 40.25);
        assert!(!top.iter().any(|r| r.time == 0.5));
    }

    #[test]
    fn test_rank_and_qualification() {
        let mut board = LocalLeaderboard::new();
        assert_eq!(board.add(LeaderboardRecord::new("a", 10.0)), Some(1));
        assert_eq!(board.add(LeaderboardRecord::new("b", 20.0)), Some(1));
        assert_eq!(board.add(LeaderboardRecord::new("c", 15.0)), Some(2));
        assert_eq!(board.add(LeaderboardRecord::new("d", 0.0)), None);
        assert!(!board.qualifies(0.0));
    }

    #[test]
    fn test_full_board_rejects_slow_runs() {
        let mut board = LocalLeaderboard::new();
        for i in 0..MAX_RECORDS {
            board.add(LeaderboardRecord::new("x", 10.0 + i as f64));
        }
        assert!(!board.qualifies(10.0));
        assert_eq!(board.add(LeaderboardRecord::new("slow", 5.0)), None);
        assert_eq!(board.entries.len(), MAX_RECORDS);
    }

    #[test]
    fn test_record_rounds_time() {
        let record = LeaderboardRecord::new("ana", 12.3456);
        assert_eq!(record.time, 12.35);
    }

    #[test]
    fn test_submit_persists_and_reloads() {
        let mut board = LocalLeaderboard::new();
        assert_eq!(board.submit(LeaderboardRecord::new("ana", 33.3)), Some(1));
        assert_eq!(board.submit(LeaderboardRecord::new("bo", 44.4)), Some(1));

        let loaded = LocalLeaderboard::load();
        assert_eq!(loaded.top(10), board.top(10));
        assert_eq!(loaded.top(1)[0].name, "bo");
    }

    #[test]
    fn test_noop_keeps_nothing() {
        let mut board = NoopLeaderboard;
        assert_eq!(board.submit(LeaderboardRecord::new("ana", 1.0)), None);
        assert!(board.top(10).is_empty());
    }

    #[test]
    fn test_format_rank_row() {
        let record = LeaderboardRecord::new("ana", 7.5);
        assert_eq!(format_rank_row(3, &record), "03  ANA  7.50s");
    }
}
