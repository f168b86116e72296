//! Integration tests for whole level sessions and multi-level runs.

use l1t::{
    builtin_sources, Command, L1tResult, LevelSession, LevelSource, ScriptedInput, SceneManager,
    SceneType, SessionState, TextRenderer,
};

use l1t::Command::{Interact, MoveDown as Down, MoveLeft as Left, MoveRight as Right, MoveUp as Up};

/// Known solutions for the bundled levels, in order.
fn solutions() -> Vec<Vec<Command>> {
    vec![
        vec![Right, Right, Up, Up, Down],
        vec![Right, Down, Down, Left, Left, Left],
        vec![
            Interact, Right, Right, Right, Right, Right, Right, Right, Down, Left, Right,
        ],
        vec![
            Up, Left, Left, Left, Down, Right, Down, Left, Left, Left, Up, Up, Interact,
        ],
    ]
}

#[test]
fn test_each_builtin_level_is_solved_on_its_last_command() {
    for (index, solution) in solutions().into_iter().enumerate() {
        let mut session = LevelSession::load(LevelSource::Builtin(index)).unwrap();
        let (last, rest) = solution.split_last().unwrap();

        for command in rest {
            assert_eq!(
                session.step(*command),
                SessionState::Playing,
                "level {} solved too early",
                index + 1
            );
        }
        assert_eq!(session.step(*last), SessionState::Won, "level {}", index + 1);
    }
}

#[test]
fn test_play_renders_twice_per_turn() -> L1tResult<()> {
    let mut session = LevelSession::load(LevelSource::Builtin(0))?;
    let mut renderer = TextRenderer::new();
    let mut input = ScriptedInput::new(solutions().remove(0));

    let state = session.play(&mut renderer, &mut input)?;
    assert_eq!(state, SessionState::Won);
    // Two renders for each of the five turns, plus the closing frame.
    assert_eq!(renderer.frames().len(), 11);
    assert_eq!(input.remaining(), 0);

    let last = renderer.last().unwrap_or_default();
    assert!(last.contains("S"));
    assert!(last.contains('>'));
    Ok(())
}

#[test]
fn test_first_render_shows_no_beam_then_second_does() -> L1tResult<()> {
    let mut session = LevelSession::load(LevelSource::Builtin(0))?;
    let mut renderer = TextRenderer::new();
    let mut input = ScriptedInput::new([Command::Quit]);

    assert_eq!(session.play(&mut renderer, &mut input)?, SessionState::Quit);
    let frames = renderer.frames();
    assert!(!frames[0].contains('-'));
    assert!(frames[1].contains("I>-->K"));
    Ok(())
}

#[test]
fn test_restart_mid_level_then_solve() {
    let mut session = LevelSession::load(LevelSource::Builtin(1)).unwrap();
    for command in [Right, Down, Down, Left, Command::Restart] {
        session.step(command);
    }
    assert_eq!(session.turn(), 0);

    let mut state = SessionState::Playing;
    for command in solutions().remove(1) {
        state = session.step(command);
    }
    assert_eq!(state, SessionState::Won);
}

#[test]
fn test_scene_manager_plays_whole_pack() -> L1tResult<()> {
    let mut script = Vec::new();
    for solution in solutions() {
        script.extend(solution);
        // Dismiss the banner that follows each solved level.
        script.push(Command::Noop);
    }

    let mut manager = SceneManager::new(
        builtin_sources(),
        TextRenderer::new(),
        ScriptedInput::new(script),
    );
    let summary = manager.run()?;

    assert!(summary.completed);
    assert_eq!(summary.solved.len(), 4);
    assert_eq!(summary.solved[0], "First Light");
    assert_eq!(summary.quit_during, None);
    assert_eq!(manager.current_scene(), SceneType::Finished);
    assert!(manager
        .renderer()
        .last()
        .is_some_and(|text| text.contains("Every level solved")));
    Ok(())
}

#[test]
fn test_quit_on_banner_ends_run() -> L1tResult<()> {
    let mut script = solutions().remove(0);
    script.push(Command::Quit);

    let mut manager = SceneManager::new(
        builtin_sources(),
        TextRenderer::new(),
        ScriptedInput::new(script),
    );
    let summary = manager.run()?;

    assert_eq!(summary.solved, vec!["First Light".to_string()]);
    assert!(!summary.completed);
    assert_eq!(summary.quit_during, None);
    Ok(())
}
