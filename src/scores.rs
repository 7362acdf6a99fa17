//! Score persistence and leaderboard reporting
//!
//! The session treats both as opaque collaborators: a [`ScoreStore`] holding
//! the monotonic best score and the remaining lives, and a [`Leaderboard`]
//! consuming fire-and-forget score reports. A JSON-file store backs native
//! builds; an in-memory store backs tests and embedders that persist
//! elsewhere.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of lives for a fresh profile
pub const DEFAULT_LIVES: u32 = 3;

/// Best-score and lives persistence
pub trait ScoreStore {
    /// Highest score ever saved (0 when none)
    fn best_score(&self) -> u32;
    /// Record a finished round. The best score only ever goes up.
    fn save_score(&mut self, points: u32);
    fn lives(&self) -> u32;
    fn set_lives(&mut self, lives: u32);
    /// Finished rounds on this profile
    fn rounds_played(&self) -> u32;
}

/// External score sink, fire-and-forget
pub trait Leaderboard {
    fn report_score(&mut self, points: u32);
}

/// Persisted score profile
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Profile {
    best: u32,
    lives: u32,
    rounds: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            best: 0,
            lives: DEFAULT_LIVES,
            rounds: 0,
        }
    }
}

/// In-memory score store
#[derive(Debug, Clone, Default)]
pub struct MemoryScores {
    profile: Profile,
}

impl MemoryScores {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScores {
    fn best_score(&self) -> u32 {
        self.profile.best
    }

    fn save_score(&mut self, points: u32) {
        self.profile.best = self.profile.best.max(points);
        self.profile.rounds += 1;
    }

    fn lives(&self) -> u32 {
        self.profile.lives
    }

    fn set_lives(&mut self, lives: u32) {
        self.profile.lives = lives;
    }

    fn rounds_played(&self) -> u32 {
        self.profile.rounds
    }
}

/// JSON-file-backed score store. Load failures fall back to a fresh
/// profile; save failures are logged and ignored (best effort).
#[derive(Debug)]
pub struct FileScores {
    path: PathBuf,
    profile: Profile,
}

impl FileScores {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(profile) => {
                    log::info!("Loaded score profile from {}", path.display());
                    profile
                }
                Err(e) => {
                    log::warn!("Corrupt score profile at {}: {e}", path.display());
                    Profile::default()
                }
            },
            Err(_) => {
                log::info!("No score profile at {}, starting fresh", path.display());
                Profile::default()
            }
        };
        Self { path, profile }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.profile) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    log::warn!("Failed to save scores to {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("Failed to serialize score profile: {e}"),
        }
    }
}

impl ScoreStore for FileScores {
    fn best_score(&self) -> u32 {
        self.profile.best
    }

    fn save_score(&mut self, points: u32) {
        if points > self.profile.best {
            log::info!("New best score: {points} (was {})", self.profile.best);
            self.profile.best = points;
        }
        self.profile.rounds += 1;
        self.persist();
    }

    fn lives(&self) -> u32 {
        self.profile.lives
    }

    fn set_lives(&mut self, lives: u32) {
        self.profile.lives = lives;
        self.persist();
    }

    fn rounds_played(&self) -> u32 {
        self.profile.rounds
    }
}

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
}

/// Local top-10 leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalLeaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl LocalLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score; returns the rank achieved (1-indexed) or None
    pub fn add_score(&mut self, score: u32, timestamp_ms: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            score,
            timestamp_ms,
        };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Leaderboard for LocalLeaderboard {
    fn report_score(&mut self, points: u32) {
        let now_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        match self.add_score(points, now_ms) {
            Some(rank) => log::info!("Score {points} entered leaderboard at rank {rank}"),
            None => log::debug!("Score {points} did not qualify for leaderboard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_score_is_monotonic() {
        let mut scores = MemoryScores::new();
        scores.save_score(5);
        assert_eq!(scores.best_score(), 5);
        scores.save_score(3);
        assert_eq!(scores.best_score(), 5);
        scores.save_score(9);
        assert_eq!(scores.best_score(), 9);
        assert_eq!(scores.rounds_played(), 3);
    }

    #[test]
    fn test_default_lives() {
        let scores = MemoryScores::new();
        assert_eq!(scores.lives(), DEFAULT_LIVES);
    }

    #[test]
    fn test_file_scores_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        {
            let mut scores = FileScores::load(&path);
            assert_eq!(scores.best_score(), 0);
            scores.save_score(7);
            scores.set_lives(2);
        }

        let scores = FileScores::load(&path);
        assert_eq!(scores.best_score(), 7);
        assert_eq!(scores.lives(), 2);
        assert_eq!(scores.rounds_played(), 1);
    }

    #[test]
    fn test_file_scores_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let scores = FileScores::load(&path);
        assert_eq!(scores.best_score(), 0);
        assert_eq!(scores.lives(), DEFAULT_LIVES);
    }

    #[test]
    fn test_leaderboard_ranks_and_truncates() {
        let mut board = LocalLeaderboard::new();
        assert!(!board.qualifies(0));

        for score in 1..=12 {
            board.add_score(score, score as u64);
        }
        assert_eq!(board.entries.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.top_score(), Some(12));
        // Lowest kept entry is 3; a 2 no longer qualifies
        assert!(!board.qualifies(2));
        assert_eq!(board.add_score(8, 0), Some(5));
    }
}
