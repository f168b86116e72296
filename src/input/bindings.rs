//! # Key Bindings
//!
//! Loading the `key = value` binding file and matching terminal key events
//! against it.
//!
//! ```text
//! # ~/.config/l1t.conf
//! MoveUpKey = w
//! MoveDownKey = s
//! InteractionKey = Space
//! ```

use crate::input::Command;
use crate::{L1tError, L1tResult};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A single bindable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Esc,
    Tab,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Parses a binding value: a single character or a key name.
    ///
    /// # Examples
    ///
    /// ```
    /// use l1t::Key;
    ///
    /// assert_eq!(Key::parse("k"), Some(Key::Char('k')));
    /// assert_eq!(Key::parse("Space"), Some(Key::Space));
    /// assert_eq!(Key::parse("esc"), Some(Key::Esc));
    /// assert_eq!(Key::parse("nope"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Key> {
        let mut chars = value.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(if ch == ' ' { Key::Space } else { Key::Char(ch) });
        }
        match value.to_ascii_lowercase().as_str() {
            "space" => Some(Key::Space),
            "enter" => Some(Key::Enter),
            "esc" | "escape" => Some(Key::Esc),
            "tab" => Some(Key::Tab),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            _ => None,
        }
    }

    /// Checks whether a terminal key event is this key.
    ///
    /// Events with Ctrl or Alt held never match, so a plain `q` binding
    /// does not fire on Alt-q.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match self {
            Key::Char(ch) => event.code == KeyCode::Char(*ch),
            Key::Space => event.code == KeyCode::Char(' '),
            Key::Enter => event.code == KeyCode::Enter,
            Key::Esc => event.code == KeyCode::Esc,
            Key::Tab => event.code == KeyCode::Tab,
            Key::Up => event.code == KeyCode::Up,
            Key::Down => event.code == KeyCode::Down,
            Key::Left => event.code == KeyCode::Left,
            Key::Right => event.code == KeyCode::Right,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(ch) => write!(f, "{}", ch),
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Esc => write!(f, "Esc"),
            Key::Tab => write!(f, "Tab"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
        }
    }
}

/// The configurable key for every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub move_up: Key,
    pub move_down: Key,
    pub move_left: Key,
    pub move_right: Key,
    pub interact: Key,
    pub restart: Key,
    pub quit: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: Key::Char('k'),
            move_down: Key::Char('j'),
            move_left: Key::Char('h'),
            move_right: Key::Char('l'),
            interact: Key::Space,
            restart: Key::Char('r'),
            quit: Key::Char('q'),
        }
    }
}

impl KeyBindings {
    /// Parses binding file contents on top of the defaults.
    ///
    /// Unknown setting names are logged and skipped. A line without `=`, or
    /// with a value that is not a key, is an error.
    pub fn parse(text: &str) -> L1tResult<Self> {
        let mut bindings = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, value) = line.split_once('=').ok_or_else(|| L1tError::Config {
                line: line_number,
                message: format!("expected `Name = key`, found {:?}", line),
            })?;
            let name = name.trim();
            let value = strip_inline_comment(value.trim());
            if value.is_empty() {
                return Err(L1tError::Config {
                    line: line_number,
                    message: format!("no key given for {}", name),
                });
            }
            let key = Key::parse(value).ok_or_else(|| L1tError::Config {
                line: line_number,
                message: format!("{:?} is not a key", value),
            })?;

            let slot = match name {
                "MoveUpKey" => &mut bindings.move_up,
                "MoveDownKey" => &mut bindings.move_down,
                "MoveLeftKey" => &mut bindings.move_left,
                "MoveRightKey" => &mut bindings.move_right,
                "InteractionKey" => &mut bindings.interact,
                "RestartKey" => &mut bindings.restart,
                "QuitKey" => &mut bindings.quit,
                other => {
                    warn!("Ignoring unknown key binding {:?} on line {}", other, line_number);
                    continue;
                }
            };
            *slot = key;
        }

        Ok(bindings)
    }

    /// Loads bindings from a file, falling back to the defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> L1tResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No key binding file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// `$HOME/.config/l1t.conf`, or relative to the working directory when
    /// `HOME` is unset.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(crate::config::CONFIG_FILE);
        path
    }

    /// The command a key event is bound to, if any.
    pub fn command_for(&self, event: &KeyEvent) -> Option<Command> {
        let table = [
            (self.move_up, Command::MoveUp),
            (self.move_down, Command::MoveDown),
            (self.move_left, Command::MoveLeft),
            (self.move_right, Command::MoveRight),
            (self.interact, Command::Interact),
            (self.restart, Command::Restart),
            (self.quit, Command::Quit),
        ];
        table
            .iter()
            .find(|(key, _)| key.matches(event))
            .map(|(_, command)| *command)
    }

    /// Short help line naming the bound keys.
    pub fn help_line(&self) -> String {
        format!(
            "move {}/{}/{}/{} or arrows  interact {}  restart {}  quit {}",
            self.move_up,
            self.move_left,
            self.move_down,
            self.move_right,
            self.interact,
            self.restart,
            self.quit
        )
    }
}

/// Drops a trailing `# comment`. A `#` only starts a comment after
/// whitespace, so `#` on its own is still a bindable key.
fn strip_inline_comment(value: &str) -> &str {
    let cut = value
        .char_indices()
        .zip(value.chars().skip(1))
        .find(|((_, ch), next)| ch.is_whitespace() && *next == '#')
        .map(|((i, _), _)| i);
    match cut {
        Some(i) => value[..i].trim_end(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_defaults() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.command_for(&key(KeyCode::Char('k'))), Some(Command::MoveUp));
        assert_eq!(bindings.command_for(&key(KeyCode::Char(' '))), Some(Command::Interact));
        assert_eq!(bindings.command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(bindings.command_for(&key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_parse_overrides_and_comments() {
        let text = "# movement\nMoveUpKey = w\n\nMoveLeftKey=a\nQuitKey = Esc\n";
        let bindings = KeyBindings::parse(text).unwrap();
        assert_eq!(bindings.move_up, Key::Char('w'));
        assert_eq!(bindings.move_left, Key::Char('a'));
        assert_eq!(bindings.quit, Key::Esc);
        // Untouched entries keep their defaults.
        assert_eq!(bindings.move_down, Key::Char('j'));
    }

    #[test]
    fn test_inline_comment_after_value() {
        let text = "MoveUpKey = w # up\nQuitKey = #\nRestartKey = Tab\t# again";
        let bindings = KeyBindings::parse(text).unwrap();
        assert_eq!(bindings.move_up, Key::Char('w'));
        assert_eq!(bindings.quit, Key::Char('#'));
        assert_eq!(bindings.restart, Key::Tab);
    }

    #[test]
    fn test_unknown_name_is_skipped() {
        let bindings = KeyBindings::parse("JumpKey = x\nRestartKey = n").unwrap();
        assert_eq!(bindings.restart, Key::Char('n'));
    }

    #[test]
    fn test_line_without_equals_is_error() {
        let err = KeyBindings::parse("MoveUpKey = w\nnonsense\n").unwrap_err();
        assert!(matches!(err, L1tError::Config { line: 2, .. }));
    }

    #[test]
    fn test_empty_value_is_error() {
        let err = KeyBindings::parse("QuitKey =").unwrap_err();
        assert!(matches!(err, L1tError::Config { line: 1, .. }));
    }

    #[test]
    fn test_modifiers_do_not_match_plain_binding() {
        let bindings = KeyBindings::default();
        let alt_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);
        assert_eq!(bindings.command_for(&alt_q), None);
    }
}
