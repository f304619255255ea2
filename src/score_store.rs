/// High-score persistence: a plain text file with one score per line.
///
/// Normal play only ever appends. The legacy `replace` and `remove`
/// operations work on the materialised top-`TOP_N` snapshot and, when they
/// match, rewrite the file to exactly that modified snapshot — history
/// beyond the snapshot is discarded. A missing file reads as an empty
/// list; any write failure is surfaced to the caller, never swallowed.
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::TOP_N;

const DEFAULT_FILE: &str = ".road_racer_scores";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high-score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high-score file {path}: unreadable entry on line {line}")]
    Parse { path: PathBuf, line: usize },
}

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in a dotfile under `$HOME`, falling back to the working
    /// directory when `HOME` is unset.
    pub fn at_default_path() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(PathBuf::from(home).join(DEFAULT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Append one score as a new line, creating the file if needed.
    /// Single attempt; a failure propagates.
    pub fn append(&self, score: u32) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        writeln!(file, "{score}").map_err(|e| self.io_err(e))
    }

    /// Up to `n` highest scores, descending. A missing file is an empty
    /// list, not an error; a line that is not a non-negative integer is.
    pub fn read_top(&self, n: usize) -> Result<Vec<u32>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        let mut scores = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let score = line.parse::<u32>().map_err(|_| StoreError::Parse {
                path: self.path.clone(),
                line: idx + 1,
            })?;
            scores.push(score);
        }
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(n);
        Ok(scores)
    }

    /// Replace the first occurrence of `old` in the top-`TOP_N` snapshot
    /// with `new`. No-op if `old` is not in the snapshot.
    pub fn replace(&self, old: u32, new: u32) -> Result<(), StoreError> {
        let mut scores = self.read_top(TOP_N)?;
        match scores.iter().position(|&s| s == old) {
            Some(idx) => {
                scores[idx] = new;
                self.rewrite(&scores)
            }
            None => Ok(()),
        }
    }

    /// Remove the first occurrence of `value` from the top-`TOP_N`
    /// snapshot. No-op if `value` is not in the snapshot.
    pub fn remove(&self, value: u32) -> Result<(), StoreError> {
        let mut scores = self.read_top(TOP_N)?;
        match scores.iter().position(|&s| s == value) {
            Some(idx) => {
                scores.remove(idx);
                self.rewrite(&scores)
            }
            None => Ok(()),
        }
    }

    fn rewrite(&self, scores: &[u32]) -> Result<(), StoreError> {
        let mut body = String::new();
        for score in scores {
            body.push_str(&score.to_string());
            body.push('\n');
        }
        fs::write(&self.path, body).map_err(|e| self.io_err(e))
    }
}
