pub mod deck;
pub mod hud;
pub mod records;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod turn;

pub use records::{BestScores, FileStore, KvScoreStore, MemoryStore, RunScore, ScoreStore};
pub use session::{GameSession, SessionSnapshot};
pub use state::{Animal, Card, Difficulty, Phase};
pub use turn::{ClickOutcome, IgnoreReason};
