use crate::game::GameSession;

pub const TILE_GAP: &str = " ";

/// Face-down cards show their 1-based number; flipped ones their animal;
/// matched ones the animal in parentheses.
pub fn render_tile(session: &GameSession, index: usize) -> String {
    let Some(card) = session.cards().get(index) else {
        return String::new();
    };
    if card.matched {
        format!("({})", card.animal.glyph())
    } else if session.flipped_indices().contains(&index) {
        format!(" {} ", card.animal.glyph())
    } else {
        format!("[{:>2}]", index + 1)
    }
}

pub fn render_board(session: &GameSession) -> String {
    let (grid_cols, _) = session.board_difficulty().grid();
    let mut out = String::new();
    for (row_index, row) in (0..session.cards().len())
        .collect::<Vec<_>>()
        .chunks(grid_cols)
        .enumerate()
    {
        if row_index > 0 {
            out.push('\n');
        }
        let tiles: Vec<String> = row.iter().map(|&i| render_tile(session, i)).collect();
        out.push_str(&tiles.join(TILE_GAP));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::game::session::MATCH_RESOLVE_MS;
    use crate::game::{Difficulty, KvScoreStore, MemoryStore};

    fn easy_session() -> GameSession {
        let mut session = GameSession::with_seed(Box::new(KvScoreStore::new(MemoryStore::new())), 2);
        session.select_difficulty(Difficulty::Easy);
        session.start_game();
        session
    }

    #[test]
    fn test_fresh_board_is_face_down() {
        let session = easy_session();
        assert_eq!(render_board(&session), "[ 1] [ 2] [ 3]\n[ 4] [ 5] [ 6]");
    }

    #[test]
    fn test_flipped_and_matched_tiles() {
        let mut session = easy_session();
        let animal = session.cards()[0].animal;
        let partner = (1..6).find(|&i| session.cards()[i].animal == animal).unwrap();

        session.click_card(0);
        assert_eq!(render_tile(&session, 0), format!(" {} ", animal.glyph()));

        session.click_card(partner);
        session.advance(Duration::from_millis(MATCH_RESOLVE_MS));
        assert_eq!(render_tile(&session, 0), format!("({})", animal.glyph()));
        assert_eq!(render_tile(&session, partner), format!("({})", animal.glyph()));
    }

    #[test]
    fn test_menu_board_is_empty() {
        let session = GameSession::with_seed(Box::new(KvScoreStore::new(MemoryStore::new())), 2);
        assert_eq!(render_board(&session), "");
    }
}
