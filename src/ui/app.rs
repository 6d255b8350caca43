use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use crate::config::Config;
use crate::game::hud::status_line;
use crate::game::{ClickOutcome, Difficulty, FileStore, GameSession, KvScoreStore, Phase};

use super::board::render_board;
use super::dialogs::{INSTRUCTIONS, best_scores_dialog, victory_message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Difficulty(Difficulty),
    Card(usize),
    Reset,
    Menu,
    Best,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("type a command, or 'help'")]
    Empty,
    #[error("card numbers start at 1")]
    ZeroCard,
    #[error("unknown command '{0}'")]
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let word = line.trim().to_ascii_lowercase();
    if word.is_empty() {
        return Err(CommandError::Empty);
    }
    if let Ok(number) = word.parse::<usize>() {
        return match number {
            0 => Err(CommandError::ZeroCard),
            n => Ok(Command::Card(n - 1)),
        };
    }
    if let Some(difficulty) = Difficulty::parse_strict(&word) {
        return Ok(Command::Difficulty(difficulty));
    }
    match word.as_str() {
        "start" | "s" | "play" => Ok(Command::Start),
        "reset" | "r" | "again" => Ok(Command::Reset),
        "menu" | "m" => Ok(Command::Menu),
        "best" | "b" => Ok(Command::Best),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal driver around one [`GameSession`]. In real-time mode the session
/// clock follows the wall clock; otherwise pending resolutions are applied
/// immediately after each pair.
pub struct App {
    session: GameSession,
    realtime: bool,
    last_input: Instant,
}

impl App {
    pub fn new(session: GameSession, realtime: bool) -> Self {
        App {
            session,
            realtime,
            last_input: Instant::now(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn catch_up(&mut self) {
        let now = Instant::now();
        if self.realtime {
            self.session.advance(now.duration_since(self.last_input));
        }
        self.last_input = now;
    }

    fn wait_for_resolution<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        while let Some(delay) = self.session.pending_resolution_in() {
            if self.realtime {
                thread::sleep(delay);
                self.catch_up();
            } else {
                self.session.advance(delay);
            }
        }
        self.draw(out)
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", status_line(&self.session))?;
        match self.session.phase() {
            Phase::Start => writeln!(out, "Type 'start' to play, 'help' for rules.")?,
            Phase::Playing => writeln!(out, "{}", render_board(&self.session))?,
            Phase::Complete => {
                writeln!(out, "{}", render_board(&self.session))?;
                writeln!(out, "{}", victory_message(&self.session))?;
                writeln!(out, "Type 'reset' to play again or 'menu' to leave.")?;
            }
        }
        Ok(())
    }

    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        self.catch_up();
        match command {
            Command::Start => self.session.start_game(),
            Command::Difficulty(difficulty) => self.session.select_difficulty(difficulty),
            Command::Reset => self.session.reset_game(),
            Command::Menu => self.session.return_to_menu(),
            Command::Card(index) => match self.session.click_card(index) {
                ClickOutcome::Ignored(reason) => {
                    log::debug!("ignored card {}: {:?}", index + 1, reason);
                }
                ClickOutcome::Flipped => {}
                ClickOutcome::PairPending { .. } => {
                    self.draw(out)?;
                    return self.wait_for_resolution(out).map(|_| Flow::Continue);
                }
            },
            Command::Best => {
                write!(out, "{}", best_scores_dialog(&self.session))?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(out, "{}", INSTRUCTIONS)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        self.draw(out)?;
        Ok(Flow::Continue)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        self.draw(out)?;
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(command) => {
                    if self.handle(command, out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{}", err)?,
            }
            out.flush()?;
        }
        Ok(())
    }
}

pub fn run(config: &Config) -> io::Result<()> {
    let path = config.store_path();
    log::info!("best scores at {}", path.display());
    let store = Box::new(KvScoreStore::new(FileStore::new(path)));
    let mut session = match config.seed {
        Some(seed) => GameSession::with_seed(store, seed),
        None => GameSession::with_os_rng(store),
    };
    session.select_difficulty(config.difficulty);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    App::new(session, true).run(stdin.lock(), &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{KvScoreStore, MemoryStore};

    fn app() -> App {
        let session = GameSession::with_seed(Box::new(KvScoreStore::new(MemoryStore::new())), 8);
        App::new(session, false)
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(" 3 "), Ok(Command::Card(2)));
        assert_eq!(parse_command("HARD"), Ok(Command::Difficulty(Difficulty::Hard)));
        assert_eq!(parse_command("s"), Ok(Command::Start));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("0"), Err(CommandError::ZeroCard));
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(
            parse_command("flip"),
            Err(CommandError::Unknown("flip".to_string()))
        );
    }

    #[test]
    fn test_pair_is_resolved_before_next_prompt() {
        let mut app = app();
        let mut out = Vec::new();
        app.handle(Command::Difficulty(Difficulty::Easy), &mut out).unwrap();
        app.handle(Command::Start, &mut out).unwrap();

        let animal = app.session().cards()[0].animal;
        let other = (1..6)
            .find(|&i| app.session().cards()[i].animal != animal)
            .unwrap();
        app.handle(Command::Card(0), &mut out).unwrap();
        app.handle(Command::Card(other), &mut out).unwrap();

        assert_eq!(app.session().moves(), 1);
        assert!(app.session().flipped_indices().is_empty());
        assert!(!app.session().is_locked());
    }

    #[test]
    fn test_run_reads_until_quit() {
        let mut app = app();
        let mut out = Vec::new();
        let input = "easy\nstart\nbogus\nbest\nquit\nstart\n".as_bytes();
        app.run(input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Easy | Moves 0 | Pairs 0/3 | 00:00"));
        assert!(text.contains("unknown command 'bogus'"));
        assert!(text.contains("Best scores"));
        assert_eq!(app.session().phase(), Phase::Playing);
    }
}
