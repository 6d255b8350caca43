use super::records::RunScore;
use super::session::GameSession;
use super::state::{Difficulty, Phase};

pub fn format_mm_ss(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

pub fn status_line(session: &GameSession) -> String {
    match session.phase() {
        Phase::Start => format!("Menu | {}", session.difficulty().name()),
        Phase::Playing | Phase::Complete => format!(
            "{} | Moves {} | Pairs {}/{} | {}",
            session.board_difficulty().name(),
            session.moves(),
            session.matches(),
            session.total_pairs(),
            format_mm_ss(session.seconds_elapsed())
        ),
    }
}

pub fn score_label(score: Option<RunScore>) -> String {
    match score {
        Some(score) => format!("{} moves, {}", score.moves, format_mm_ss(score.time_secs)),
        None => "no record".to_string(),
    }
}

/// One line per difficulty, each reading its own record.
pub fn best_score_lines(session: &GameSession) -> Vec<String> {
    Difficulty::ALL
        .iter()
        .map(|&difficulty| {
            format!(
                "{:<6} {}",
                difficulty.name(),
                score_label(session.best(difficulty))
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::records::{KvScoreStore, MemoryStore, STORAGE_KEY};

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(59), "00:59");
        assert_eq!(format_mm_ss(61), "01:01");
        assert_eq!(format_mm_ss(3600), "60:00");
    }

    #[test]
    fn test_status_line_while_playing() {
        let store = KvScoreStore::new(MemoryStore::new());
        let mut session = GameSession::with_seed(Box::new(store), 1);
        assert_eq!(status_line(&session), "Menu | Medium");
        session.select_difficulty(Difficulty::Easy);
        session.start_game();
        assert_eq!(status_line(&session), "Easy | Moves 0 | Pairs 0/3 | 00:00");
    }

    #[test]
    fn test_best_lines_per_difficulty() {
        let raw = r#"{"easy":{"moves":4,"time":65},"medium":{"moves":null,"time":null},"hard":{"moves":22,"time":190}}"#;
        let store = KvScoreStore::new(MemoryStore::with_entry(STORAGE_KEY, raw));
        let session = GameSession::with_seed(Box::new(store), 1);
        assert_eq!(
            best_score_lines(&session),
            vec![
                "Easy   4 moves, 01:05".to_string(),
                "Medium no record".to_string(),
                "Hard   22 moves, 03:10".to_string(),
            ]
        );
    }
}
