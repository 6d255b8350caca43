use crate::game::GameSession;
use crate::game::hud::{best_score_lines, format_mm_ss};

pub const INSTRUCTIONS: &str = "\
How to play
  Flip two cards at a time by typing their numbers.
  Matching animals stay face up; others flip back after a moment.
  Clear the board in as few moves as you can. Ties go to the faster time.

Commands
  start | s           start a game
  easy|medium|hard    choose difficulty (restarts a running game)
  <number>            flip that card
  reset | r           restart, or play again after a win
  menu | m            back to the menu
  best | b            best scores
  help | h | ?        this text
  quit | q            leave";

pub fn best_scores_dialog(session: &GameSession) -> String {
    let mut out = String::from("Best scores\n");
    for line in best_score_lines(session) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn victory_message(session: &GameSession) -> String {
    let Some((difficulty, run)) = session.last_run() else {
        return String::new();
    };
    let mut out = format!(
        "Board cleared on {} in {} moves, {}.",
        difficulty.name(),
        run.moves,
        format_mm_ss(run.time_secs)
    );
    if session.new_record() {
        out.push_str(" New record!");
    }
    out
}
