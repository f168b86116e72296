//! # L1t
//!
//! A terminal puzzle game about lasers, mirrors and statues.
//!
//! ## Architecture Overview
//!
//! The engine is a pure grid simulation driven one command at a time:
//!
//! - **Game**: grid model, beam engine, movement, interaction and the win rule,
//!   tied together by a [`LevelSession`]
//! - **Levels**: level text decoding, the built-in pack and directory discovery
//! - **Input**: key binding configuration and the [`InputSource`] boundary
//! - **Rendering**: the [`Renderer`] boundary and a crossterm terminal display
//! - **Scenes**: playing a sequence of levels
//!
//! ```
//! use l1t::{Command, LevelInfo, LevelSession, LevelSource, SessionState};
//!
//! let info = LevelInfo::from_source(LevelSource::Builtin(0));
//! let mut session = LevelSession::from_text(info, "4  S\n   X\n".into()).unwrap();
//! assert_eq!(session.step(Command::Noop), SessionState::Won);
//! ```

pub mod game;
pub mod input;
pub mod levels;
pub mod rendering;
pub mod scenes;

pub use game::*;
pub use input::*;
pub use levels::{
    builtin_sources, decode_level, discover, BuiltinLevel, DecodedLevel, LevelInfo, LevelSource,
    LoadError, BUILTIN_LEVELS,
};
pub use rendering::*;
pub use scenes::{RunSummary, SceneManager, SceneType};

/// Core error type for L1t.
#[derive(thiserror::Error, Debug)]
pub enum L1tError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A level could not be started
    #[error("Level error: {0}")]
    Load(#[from] LoadError),

    /// Bad line in the key binding file
    #[error("Config error on line {line}: {message}")]
    Config { line: usize, message: String },

    /// Invalid command line or run setup
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the L1t codebase.
pub type L1tResult<T> = Result<T, L1tError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Key binding file, relative to the home directory
    pub const CONFIG_FILE: &str = ".config/l1t.conf";

    /// Extension of level files picked up from a directory
    pub const LEVEL_FILE_EXTENSION: &str = "l1t";

    /// A beam may take at most `rows * cols * this` steps
    pub const BEAM_STEP_GUARD_FACTOR: usize = 4;

    /// Log level when none is given
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}
