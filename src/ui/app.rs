use crate::ai::SearchEngine;
use crate::config::AppConfig;
use crate::game::{GameOutcome, Player, Position, CENTER_COL, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    position: Position,
    engine: SearchEngine,
    computer: Player,
    selected_column: usize,
    computer_pending: bool,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let computer = config.game.computer;
        App {
            position: Position::initial(),
            engine: SearchEngine::from_config(&config.search),
            computer,
            selected_column: CENTER_COL,
            computer_pending: computer == Player::One,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            // Draw first so the human's piece is visible while the engine thinks.
            if self.computer_pending {
                self.computer_move();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.position = Position::initial();
        self.selected_column = CENTER_COL;
        self.computer_pending = self.computer == Player::One;
    }

    /// Drop the human's piece in the selected column
    fn drop_piece(&mut self) {
        if self.position.is_game_over() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.position.active_player() == self.computer {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }

        match self.position.play_column(self.selected_column) {
            Ok(next) => {
                self.position = next;
                if !self.announce_outcome() {
                    self.computer_pending = true;
                    self.message = Some("Computer is thinking...".to_string());
                }
            }
            Err(e) => {
                self.message = Some(format!("Can't play there: {e}"));
            }
        }
    }

    /// Let the engine reply on the live position.
    fn computer_move(&mut self) {
        self.computer_pending = false;
        if self.position.is_game_over() {
            return;
        }

        let Some(best) = self.engine.find_best_move(&self.position) else {
            return;
        };
        match self.position.apply_move(best.mv) {
            Ok(next) => {
                tracing::info!(
                    mv = %best.mv,
                    utility = best.utility,
                    nodes = best.stats.nodes,
                    "computer moved"
                );
                self.position = next;
                self.selected_column = best.mv.column;
                if !self.announce_outcome() {
                    self.message = Some(format!("Computer played {}", best.mv));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "engine produced an illegal move");
                self.message = Some(format!("Engine error: {e}"));
            }
        }
    }

    /// Set the end-of-game message. Returns true if the game is over.
    fn announce_outcome(&mut self) -> bool {
        match self.position.outcome() {
            Some(outcome) => {
                self.message = Some(outcome_message(outcome, self.computer));
                true
            }
            None => false,
        }
    }

    fn status_line(&self) -> String {
        let depth = self.engine.depth();
        if self.position.is_game_over() {
            format!("Game Over  |  depth {depth}")
        } else if self.position.active_player() == self.computer {
            format!("Computer to move  |  depth {depth}")
        } else {
            format!("Your move  |  depth {depth}")
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.position,
            self.selected_column,
            &self.message,
            &self.status_line(),
        );
    }
}

fn outcome_message(outcome: GameOutcome, computer: Player) -> String {
    match outcome {
        GameOutcome::Winner(player) if player == computer => "Computer wins!".to_string(),
        GameOutcome::Winner(_) => "You win!".to_string(),
        GameOutcome::Draw => "It's a draw!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SearchConfig;
    use crate::config::GameConfig;

    fn app(computer: Player) -> App {
        let config = AppConfig {
            search: SearchConfig {
                depth: 1,
                ..SearchConfig::default()
            },
            game: GameConfig { computer },
        };
        App::new(&config)
    }

    #[test]
    fn test_human_move_queues_computer_reply() {
        let mut app = app(Player::Two);
        assert!(!app.computer_pending);

        app.handle_key(KeyEvent::from(KeyCode::Left));
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.position.ply_count(), 1);
        assert!(app.computer_pending);

        app.computer_move();
        assert_eq!(app.position.ply_count(), 2);
        assert_eq!(app.position.active_player(), Player::One);
        assert!(!app.computer_pending);
    }

    #[test]
    fn test_computer_opens_when_playing_first() {
        let mut app = app(Player::One);
        assert!(app.computer_pending);
        app.computer_move();
        assert_eq!(app.position.ply_count(), 1);

        app.handle_key(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(app.position.ply_count(), 0);
        assert!(app.computer_pending);
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let mut app = app(Player::One);
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.position.ply_count(), 0);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_full_column_reports_error() {
        let mut app = app(Player::Two);
        for _ in 0..3 {
            app.handle_key(KeyEvent::from(KeyCode::Char('1')));
            // answer in the same column instead of asking the engine
            app.computer_pending = false;
            app.position = app.position.play_column(0).unwrap();
        }
        assert!(app.position.board().is_column_full(0));
        app.handle_key(KeyEvent::from(KeyCode::Char('1')));
        assert_eq!(app.message.as_deref(), Some("Can't play there: column 0 is full"));
    }

    #[test]
    fn test_selection_stays_on_board() {
        let mut app = app(Player::Two);
        for _ in 0..10 {
            app.handle_key(KeyEvent::from(KeyCode::Right));
        }
        assert_eq!(app.selected_column, COLS - 1);
        for _ in 0..10 {
            app.handle_key(KeyEvent::from(KeyCode::Left));
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            outcome_message(GameOutcome::Winner(Player::Two), Player::Two),
            "Computer wins!"
        );
        assert_eq!(
            outcome_message(GameOutcome::Winner(Player::One), Player::Two),
            "You win!"
        );
        assert_eq!(outcome_message(GameOutcome::Draw, Player::One), "It's a draw!");
    }

    #[test]
    fn test_quit() {
        let mut app = app(Player::Two);
        app.handle_key(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
