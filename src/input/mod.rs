//! # Input Module
//!
//! Turns terminal key events into [`Command`]s.
//!
//! The game core only ever sees commands through the [`InputSource`] trait,
//! so sessions can be driven by the real terminal or by a scripted list in
//! tests.

pub mod bindings;
pub mod commands;

pub use bindings::*;
pub use commands::*;

use crate::L1tResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::trace;

/// Anything that can hand the game its next command.
pub trait InputSource {
    /// Blocks until the next command is available.
    fn next_command(&mut self) -> L1tResult<Command>;
}

/// Maps key events to commands using a set of bindings.
///
/// Arrow keys always move, whatever the bindings say, and Ctrl-C always
/// quits since raw mode swallows the interrupt signal.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Creates a handler for the given bindings.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    /// use l1t::{Command, InputHandler, KeyBindings};
    ///
    /// let handler = InputHandler::new(KeyBindings::default());
    /// let event = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
    /// assert_eq!(handler.map_key(&event), Command::MoveLeft);
    /// ```
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// The command for a key press. Unbound keys give [`Command::Noop`].
    pub fn map_key(&self, event: &KeyEvent) -> Command {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Command::Quit;
        }

        if let Some(command) = self.bindings.command_for(event) {
            return command;
        }

        match event.code {
            KeyCode::Up => Command::MoveUp,
            KeyCode::Down => Command::MoveDown,
            KeyCode::Left => Command::MoveLeft,
            KeyCode::Right => Command::MoveRight,
            _ => Command::Noop,
        }
    }
}

/// Reads commands from the terminal with crossterm.
///
/// Expects the terminal to already be in raw mode.
#[derive(Debug, Clone, Default)]
pub struct TerminalInput {
    handler: InputHandler,
}

impl TerminalInput {
    pub fn new(handler: InputHandler) -> Self {
        Self { handler }
    }
}

impl InputSource for TerminalInput {
    fn next_command(&mut self) -> L1tResult<Command> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let command = self.handler.map_key(&key);
                    trace!("Key {:?} mapped to {:?}", key.code, command);
                    return Ok(command);
                }
                // A resize ends the turn so the screen gets redrawn.
                Event::Resize(_, _) => return Ok(Command::Noop),
                _ => {}
            }
        }
    }
}

/// Replays a fixed list of commands, then quits.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: std::collections::VecDeque<Command>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    /// Commands not yet handed out.
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> L1tResult<Command> {
        Ok(self.commands.pop_front().unwrap_or(Command::Quit))
    }
}
