//! # Level Session
//!
//! Owns everything about the level being played and drives it turn by turn.
//!
//! A session is created when a level starts, rebuilt wholesale on restart,
//! and dropped when the level ends. All engines receive the session's grid
//! explicitly; nothing is held globally.

use crate::game::{
    beam_pass, interact, is_won, move_player, BeamTrace, Grid, Markers, MoveOutcome, Position,
};
use crate::input::{Command, InputSource};
use crate::levels::{decode_level, LevelInfo, LevelSource, LoadError};
use crate::rendering::Renderer;
use crate::L1tResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Where a level session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    /// Every statue lit and every reverse statue dark
    Won,
    /// The player asked to leave
    Quit,
}

impl SessionState {
    /// `Won` and `Quit` end the session.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Playing)
    }
}

/// Everything a renderer needs for one screen, borrowed from the session.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub level: &'a LevelInfo,
    pub grid: &'a Grid,
    pub player: Position,
    pub beams: &'a [BeamTrace],
    pub state: SessionState,
    /// Commands handled since the level (re)started
    pub turn: u32,
}

/// One level being played.
#[derive(Debug, Clone)]
pub struct LevelSession {
    info: LevelInfo,
    source_text: String,
    grid: Grid,
    player: Position,
    markers: Markers,
    beams: Vec<BeamTrace>,
    state: SessionState,
    turn: u32,
}

impl LevelSession {
    /// Reads and decodes a level.
    pub fn load(source: LevelSource) -> Result<Self, LoadError> {
        let text = source.read_text()?;
        Self::from_text(LevelInfo::from_source(source), text)
    }

    /// Starts a session from level text already in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use l1t::{LevelInfo, LevelSession, LevelSource, SessionState};
    ///
    /// let info = LevelInfo::from_source(LevelSource::Builtin(0));
    /// let session = LevelSession::from_text(info, "4 S\nX  \n".to_string()).unwrap();
    /// assert_eq!(session.state(), SessionState::Playing);
    /// assert_eq!(session.markers().statues.len(), 1);
    /// ```
    pub fn from_text(info: LevelInfo, text: String) -> Result<Self, LoadError> {
        let decoded = decode_level(&text)?;
        info!(
            "Starting level {:?} ({}x{}, {} markers)",
            info.name,
            decoded.grid.rows(),
            decoded.grid.cols(),
            decoded.markers.len()
        );

        Ok(Self {
            info,
            source_text: text,
            grid: decoded.grid,
            player: decoded.player,
            markers: decoded.markers,
            beams: Vec::new(),
            state: SessionState::Playing,
            turn: 0,
        })
    }

    pub fn info(&self) -> &LevelInfo {
        &self.info
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Beams from the most recent pass.
    pub fn beams(&self) -> &[BeamTrace] {
        &self.beams
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Resets marker defaults and recomputes every beam.
    pub fn run_beams(&mut self) {
        self.beams = beam_pass(&mut self.grid, &self.markers);
    }

    /// Snapshot for the renderer.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            level: &self.info,
            grid: &self.grid,
            player: self.player,
            beams: &self.beams,
            state: self.state,
            turn: self.turn,
        }
    }

    /// Applies one command, reruns the beams and checks for a win.
    ///
    /// Commands given after the session ended are ignored.
    pub fn step(&mut self, command: Command) -> SessionState {
        if self.state.is_terminal() {
            return self.state;
        }

        match command {
            Command::Quit => {
                info!("Leaving level {:?}", self.info.name);
                self.state = SessionState::Quit;
                return self.state;
            }
            Command::Restart => {
                self.restart();
            }
            Command::Interact => {
                let toggled = interact(&mut self.grid, self.player);
                debug!("Interaction toggled {} lasers", toggled.len());
                self.turn += 1;
            }
            Command::MoveUp | Command::MoveDown | Command::MoveLeft | Command::MoveRight => {
                if let Some(direction) = command.direction() {
                    let outcome = move_player(&mut self.grid, self.player, direction);
                    if let Some(to) = outcome.new_position() {
                        self.player = to;
                    }
                    if outcome == MoveOutcome::Blocked {
                        debug!("Move {:?} from {} blocked", direction, self.player);
                    }
                }
                self.turn += 1;
            }
            Command::Noop => {
                self.turn += 1;
            }
        }

        self.run_beams();
        if is_won(&self.grid, &self.markers) {
            info!("Level {:?} solved in {} turns", self.info.name, self.turn);
            self.state = SessionState::Won;
        }
        self.state
    }

    /// Rebuilds the grid, player and markers from the stored level text.
    fn restart(&mut self) {
        match decode_level(&self.source_text) {
            Ok(decoded) => {
                info!("Restarting level {:?}", self.info.name);
                self.grid = decoded.grid;
                self.player = decoded.player;
                self.markers = decoded.markers;
                self.beams.clear();
                self.turn = 0;
            }
            // The text decoded once already, so this cannot happen.
            Err(e) => warn!("Restart of {:?} failed: {}", self.info.name, e),
        }
    }

    /// Runs the level until it is won or left.
    pub fn play<R, I>(&mut self, renderer: &mut R, input: &mut I) -> L1tResult<SessionState>
    where
        R: Renderer + ?Sized,
        I: InputSource + ?Sized,
    {
        while !self.state.is_terminal() {
            renderer.render(&self.frame())?;
            self.run_beams();
            renderer.render(&self.frame())?;

            let command = input.next_command()?;
            debug!("Turn {}: {:?}", self.turn, command);
            self.step(command);
        }

        renderer.render(&self.frame())?;
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CellKind;

    fn session(text: &str) -> LevelSession {
        let info = LevelInfo::from_source(LevelSource::Builtin(0));
        LevelSession::from_text(info, text.to_string()).unwrap()
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut s = session("X S\n");
        assert_eq!(s.step(Command::Quit), SessionState::Quit);
        assert_eq!(s.step(Command::MoveRight), SessionState::Quit);
        assert_eq!(s.player(), Position::new(0, 0));
    }

    #[test]
    fn test_move_updates_player() {
        let mut s = session("X  S\n");
        s.step(Command::MoveRight);
        assert_eq!(s.player(), Position::new(0, 1));
        assert_eq!(s.grid().kind_at(Position::new(0, 0)), Some(CellKind::Empty));
        assert_eq!(s.turn(), 1);
    }

    #[test]
    fn test_win_after_interact() {
        // Laser starts off; switching it on lights the statue.
        let mut s = session("8  S\nX   \n");
        assert_eq!(s.step(Command::Noop), SessionState::Playing);
        assert_eq!(s.step(Command::Interact), SessionState::Won);
        assert_eq!(s.beams().len(), 1);
    }

    #[test]
    fn test_restart_restores_level() {
        let mut s = session("XK \nS  \n");
        s.step(Command::MoveRight);
        assert_eq!(s.grid().kind_at(Position::new(0, 2)), Some(CellKind::Block));

        s.step(Command::Restart);
        assert_eq!(s.player(), Position::new(0, 0));
        assert_eq!(s.grid().kind_at(Position::new(0, 1)), Some(CellKind::Block));
        assert_eq!(s.turn(), 0);
        assert_eq!(s.state(), SessionState::Playing);
    }

    #[test]
    fn test_no_markers_won_after_first_command() {
        let mut s = session("X \n");
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.step(Command::Noop), SessionState::Won);
    }

    #[test]
    fn test_frame_serializes() {
        let mut s = session("4 S\nX  \n");
        s.run_beams();
        let json = serde_json::to_value(s.frame()).unwrap();
        assert_eq!(json["state"], "Playing");
        assert_eq!(json["beams"].as_array().unwrap().len(), 1);
    }
}
