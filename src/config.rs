use std::path::PathBuf;

use clap::Parser;

use crate::game::Difficulty;

const APP_DIR: &str = "recall-match";
const RECORDS_FILE_NAME: &str = "records.json";

#[derive(Parser, Debug, Clone)]
#[command(name = "recall-match", version, about = "Terminal memory matching game")]
pub struct Config {
    /// Starting difficulty: easy, medium or hard
    #[arg(short, long, default_value = "medium", value_parser = parse_difficulty)]
    pub difficulty: Difficulty,

    /// Seed for the card shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Best-score file
    #[arg(long)]
    pub store: Option<PathBuf>,
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::parse_strict(value).ok_or_else(|| format!("unknown difficulty '{value}'"))
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(default_store_path)
    }
}

fn default_store_path() -> PathBuf {
    glib::user_config_dir().join(APP_DIR).join(RECORDS_FILE_NAME)
}
