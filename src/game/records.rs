use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::state::Difficulty;

pub const STORAGE_KEY: &str = "nmMemoryBestScores";

#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("malformed best-score data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("store contents could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunScore {
    pub moves: u32,
    pub time_secs: u32,
}

/// Fewer moves wins; equal moves need strictly less time.
pub fn is_new_best(run: RunScore, best: Option<RunScore>) -> bool {
    match best {
        None => true,
        Some(best) => {
            run.moves < best.moves || (run.moves == best.moves && run.time_secs < best.time_secs)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BestScores {
    easy: Option<RunScore>,
    medium: Option<RunScore>,
    hard: Option<RunScore>,
}

impl BestScores {
    pub fn get(&self, difficulty: Difficulty) -> Option<RunScore> {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn set(&mut self, difficulty: Difficulty, score: RunScore) {
        let slot = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        };
        *slot = Some(score);
    }

    pub fn is_empty(&self) -> bool {
        Difficulty::ALL.iter().all(|&d| self.get(d).is_none())
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct StoredBest {
    moves: Option<u32>,
    time: Option<u32>,
}

impl StoredBest {
    fn from_score(score: Option<RunScore>) -> Self {
        StoredBest {
            moves: score.map(|s| s.moves),
            time: score.map(|s| s.time_secs),
        }
    }

    fn into_score(self) -> Option<RunScore> {
        Some(RunScore {
            moves: self.moves?,
            time_secs: self.time?,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredRecords {
    #[serde(default)]
    easy: Option<StoredBest>,
    #[serde(default)]
    medium: Option<StoredBest>,
    #[serde(default)]
    hard: Option<StoredBest>,
}

pub fn decode_best_scores(raw: &str) -> Result<BestScores, RecordsError> {
    let stored: StoredRecords = serde_json::from_str(raw)?;
    let score = |entry: Option<StoredBest>| entry.and_then(StoredBest::into_score);
    Ok(BestScores {
        easy: score(stored.easy),
        medium: score(stored.medium),
        hard: score(stored.hard),
    })
}

pub fn encode_best_scores(scores: &BestScores) -> Result<String, StoreError> {
    let stored = StoredRecords {
        easy: Some(StoredBest::from_score(scores.easy)),
        medium: Some(StoredBest::from_score(scores.medium)),
        hard: Some(StoredBest::from_score(scores.hard)),
    };
    serde_json::to_string(&stored).map_err(StoreError::Encode)
}

/// Opaque string store the records live in.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON object of key -> string kept in a single file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(StoreError::Decode),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Decode(err)) => {
                log::warn!("replacing unreadable store {}: {}", self.path.display(), err);
                HashMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value);

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&entries).map_err(StoreError::Encode)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

pub trait ScoreStore {
    /// Never fails: missing or unreadable data yields empty records.
    fn load(&self) -> BestScores;
    fn save(&mut self, scores: &BestScores) -> Result<(), StoreError>;
}

pub struct KvScoreStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvScoreStore<S> {
    pub fn new(store: S) -> Self {
        KvScoreStore {
            store,
            key: STORAGE_KEY.to_string(),
        }
    }
}

impl<S: KeyValueStore> ScoreStore for KvScoreStore<S> {
    fn load(&self) -> BestScores {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => decode_best_scores(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring saved best scores: {}", err);
                BestScores::default()
            }),
            Ok(None) => BestScores::default(),
            Err(err) => {
                log::warn!("could not read best scores: {}", err);
                BestScores::default()
            }
        }
    }

    fn save(&mut self, scores: &BestScores) -> Result<(), StoreError> {
        let raw = encode_best_scores(scores)?;
        self.store.set(&self.key, raw)
    }
}

/// Per-difficulty best scores, loaded once and written back on improvement.
pub struct ScoreTracker {
    bests: BestScores,
    store: Box<dyn ScoreStore>,
    new_record: bool,
}

impl ScoreTracker {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let bests = store.load();
        ScoreTracker {
            bests,
            store,
            new_record: false,
        }
    }

    pub fn bests(&self) -> &BestScores {
        &self.bests
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<RunScore> {
        self.bests.get(difficulty)
    }

    /// Whether the last finished run set a record.
    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn clear_new_record(&mut self) {
        self.new_record = false;
    }

    pub fn register_run(&mut self, difficulty: Difficulty, run: RunScore) -> bool {
        self.new_record = is_new_best(run, self.bests.get(difficulty));
        if !self.new_record {
            return false;
        }

        log::info!(
            "new {} record: {} moves in {}s",
            difficulty.key(),
            run.moves,
            run.time_secs
        );
        self.bests.set(difficulty, run);
        if let Err(err) = self.store.save(&self.bests) {
            log::error!("Failed to save best scores: {}", err);
        }
        true
    }
}
