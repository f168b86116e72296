//! # Scene Management System
//!
//! Plays a list of levels in order: each level runs as a session, a solved
//! level gets a banner before the next one starts, and quitting ends the run.

use crate::game::{LevelSession, SessionState};
use crate::input::{Command, InputSource};
use crate::levels::LevelSource;
use crate::rendering::Renderer;
use crate::L1tResult;
use log::info;
use serde::{Deserialize, Serialize};

/// Where the run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Playing the level at this index
    Playing(usize),
    /// The level at this index was just solved
    LevelComplete(usize),
    /// Every level solved
    Finished,
    /// The player quit
    Exited,
}

/// How a run ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Names of the levels solved, in order
    pub solved: Vec<String>,
    /// The level the player quit from, if they quit mid-level
    pub quit_during: Option<String>,
    /// True when the last level was solved
    pub completed: bool,
}

/// Drives a sequence of levels against a renderer and an input source.
pub struct SceneManager<R, I> {
    current_scene: SceneType,
    sources: Vec<LevelSource>,
    renderer: R,
    input: I,
}

impl<R: Renderer, I: InputSource> SceneManager<R, I> {
    pub fn new(sources: Vec<LevelSource>, renderer: R, input: I) -> Self {
        Self {
            current_scene: SceneType::Playing(0),
            sources,
            renderer,
            input,
        }
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Runs until the player quits or the last level is solved.
    ///
    /// A level that fails to load stops the run with the load error.
    pub fn run(&mut self) -> L1tResult<RunSummary> {
        let mut summary = RunSummary::default();

        loop {
            match self.current_scene {
                SceneType::Playing(index) => {
                    let Some(source) = self.sources.get(index).cloned() else {
                        self.current_scene = SceneType::Finished;
                        continue;
                    };
                    let mut session = LevelSession::load(source)?;
                    match session.play(&mut self.renderer, &mut self.input)? {
                        SessionState::Won => {
                            summary.solved.push(session.info().name.clone());
                            self.current_scene = SceneType::LevelComplete(index);
                        }
                        SessionState::Quit | SessionState::Playing => {
                            summary.quit_during = Some(session.info().name.clone());
                            self.current_scene = SceneType::Exited;
                        }
                    }
                }
                SceneType::LevelComplete(index) => {
                    self.current_scene = self.update_level_complete(index)?;
                }
                SceneType::Finished => {
                    info!("All {} levels solved", self.sources.len());
                    summary.completed = true;
                    self.renderer.show_banner(&[
                        "Every level solved!".to_string(),
                        "Press any key to exit".to_string(),
                    ])?;
                    self.input.next_command()?;
                    break;
                }
                SceneType::Exited => {
                    info!("Run ended after {} solved levels", summary.solved.len());
                    break;
                }
            }
        }

        Ok(summary)
    }

    fn update_level_complete(&mut self, index: usize) -> L1tResult<SceneType> {
        let next = index + 1;
        if next >= self.sources.len() {
            return Ok(SceneType::Finished);
        }

        let solved = self
            .sources
            .get(index)
            .map(LevelSource::name)
            .unwrap_or_default();
        self.renderer.show_banner(&[
            format!("{} complete!", solved),
            "Press any key for the next level, or quit".to_string(),
        ])?;

        match self.input.next_command()? {
            Command::Quit => Ok(SceneType::Exited),
            _ => Ok(SceneType::Playing(next)),
        }
    }
}
