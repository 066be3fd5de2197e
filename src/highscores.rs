//! High score leaderboard
//!
//! Persisted as a plain text file, one integer score per line. Tracks the
//! top 5 scores.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{APP_DIR, SCOREBOARD_CAPACITY};

#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("no data directory available for the scoreboard")]
    NoDataDir,
    #[error("scoreboard I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// In-memory leaderboard, always sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScores {
    entries: Vec<u32>,
}

impl TopScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from scores in any order, keeping the best `SCOREBOARD_CAPACITY`
    pub fn from_unsorted(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(SCOREBOARD_CAPACITY);
        Self { entries: scores }
    }

    /// Scores, best first
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= SCOREBOARD_CAPACITY
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().copied()
    }

    /// Lowest kept score (if any)
    pub fn lowest_score(&self) -> Option<u32> {
        self.entries.last().copied()
    }

    /// Check if a score would be kept: the board has room, or the score is at
    /// least as high as the current lowest
    pub fn qualifies(&self, score: u32) -> bool {
        if !self.is_full() {
            return true;
        }
        self.lowest_score().is_none_or(|lowest| score >= lowest)
    }

    /// Add a score if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // New scores rank behind equal ones already on the board
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, score);
        self.entries.truncate(SCOREBOARD_CAPACITY);

        (pos < SCOREBOARD_CAPACITY).then_some(pos + 1)
    }
}

/// File-backed scoreboard
#[derive(Debug, Clone)]
pub struct Scoreboard {
    path: PathBuf,
}

impl Scoreboard {
    const FILE_NAME: &'static str = "scoreboard.csv";

    /// Scoreboard stored at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Scoreboard in the platform data dir
    /// (`~/.local/share/flappy-drake/scoreboard.csv` on Linux)
    pub fn open_default() -> Result<Self, ScoreboardError> {
        let dir = dirs::data_local_dir().ok_or(ScoreboardError::NoDataDir)?;
        Ok(Self::at(dir.join(APP_DIR).join(Self::FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ScoreboardError {
        ScoreboardError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Create the parent directory and an empty file if they are missing
    fn prepare(&self) -> Result<(), ScoreboardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                log::info!("Created scoreboard at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Read the stored scores, best first.
    ///
    /// Lines that are not integers are skipped with a warning.
    pub fn load(&self) -> Result<TopScores, ScoreboardError> {
        self.prepare()?;
        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;

        let mut scores = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<u32>() {
                Ok(score) => scores.push(score),
                Err(e) => log::warn!(
                    "Skipping malformed scoreboard line {} in {}: {:?} ({})",
                    line_no + 1,
                    self.path.display(),
                    line,
                    e
                ),
            }
        }

        Ok(TopScores::from_unsorted(scores))
    }

    /// Overwrite the file with `scores`, one per line
    pub fn save(&self, scores: &TopScores) -> Result<(), ScoreboardError> {
        self.prepare()?;
        let text = scores
            .entries()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        log::info!("Scoreboard saved ({} entries)", scores.len());
        Ok(())
    }

    /// Add `score` to the stored board if it qualifies.
    ///
    /// Returns the rank achieved, or None when the board was left unchanged.
    pub fn record(&self, score: u32) -> Result<Option<usize>, ScoreboardError> {
        let mut scores = self.load()?;
        let rank = scores.insert(score);
        if rank.is_some() {
            self.save(&scores)?;
        }
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn board_in(dir: &tempfile::TempDir) -> Scoreboard {
        Scoreboard::at(dir.path().join("share").join("scoreboard.csv"))
    }

    #[test]
    fn test_first_record() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);

        assert!(board.load().unwrap().is_empty());
        assert_eq!(board.record(10).unwrap(), Some(1));
        assert_eq!(board.load().unwrap().entries(), &[10]);
    }

    #[test]
    fn test_capacity_keeps_five_highest() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);

        for score in [10, 5, 8, 3, 1, 20] {
            board.record(score).unwrap();
        }
        assert_eq!(board.load().unwrap().entries(), &[20, 10, 8, 5, 3]);
    }

    #[test]
    fn test_full_board_rejects_lower_score() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);
        for score in [10, 20, 30, 40, 50] {
            board.record(score).unwrap();
        }

        assert_eq!(board.record(9).unwrap(), None);
        // A tie with the lowest displaces an equal score: nothing changes
        assert_eq!(board.record(10).unwrap(), None);
        assert_eq!(board.record(11).unwrap(), Some(5));
        assert_eq!(board.load().unwrap().entries(), &[50, 40, 30, 20, 11]);
    }

    #[test]
    fn test_missing_file_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);
        assert!(!board.path().exists());

        assert!(board.load().unwrap().is_empty());
        assert!(board.path().exists());
    }

    #[test]
    fn test_unsorted_file_with_junk() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);
        fs::create_dir_all(board.path().parent().unwrap()).unwrap();
        fs::write(board.path(), "3\nabc\n\n17\n-4\n9").unwrap();

        assert_eq!(board.load().unwrap().entries(), &[17, 9, 3]);
    }

    #[test]
    fn test_lowest_found_after_sorting() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);
        fs::create_dir_all(board.path().parent().unwrap()).unwrap();
        // The lowest score is not on the last line
        fs::write(board.path(), "1\n50\n40\n30\n20").unwrap();

        assert_eq!(board.record(2).unwrap(), Some(5));
        assert_eq!(board.load().unwrap().entries(), &[50, 40, 30, 20, 2]);
    }

    #[test]
    fn test_file_format_is_one_score_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(&dir);
        board.record(4).unwrap();
        board.record(12).unwrap();

        let text = fs::read_to_string(board.path()).unwrap();
        assert_eq!(text, "12\n4");
    }

    #[test]
    fn test_insert_rank() {
        let mut scores = TopScores::new();
        assert_eq!(scores.insert(5), Some(1));
        assert_eq!(scores.insert(7), Some(1));
        assert_eq!(scores.insert(5), Some(3));
        assert_eq!(scores.top_score(), Some(7));
        assert_eq!(scores.lowest_score(), Some(5));
    }

    proptest! {
        #[test]
        fn prop_board_bounded_and_sorted(scores in prop::collection::vec(0u32..1000, 0..40)) {
            let mut board = TopScores::new();
            for &s in &scores {
                board.insert(s);
                prop_assert!(board.len() <= SCOREBOARD_CAPACITY);
                prop_assert!(board.entries().windows(2).all(|w| w[0] >= w[1]));
            }

            let mut expected = scores.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(SCOREBOARD_CAPACITY);
            prop_assert_eq!(board.entries(), expected.as_slice());
        }
    }
}
