//! Runs the `coup` binary end to end.

use std::process::Command;
use coup_cli::GameEvent;

fn coup(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_coup")).args(args).output().unwrap()
}

#[test]
fn json_stdout_is_only_events() {
    let output = coup(&["--watch", "--json", "--seed", "1"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let events: Vec<GameEvent> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|err| panic!("{line:?}: {err}")))
        .collect();

    assert!(matches!(events.first(), Some(GameEvent::TurnStarted { turn: 0, .. })));
    assert!(matches!(events.last(), Some(GameEvent::Winner { .. })));
}

#[test]
fn watched_game_shows_the_table() {
    let output = coup(&["--watch", "--players", "4", "--seed", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Welcome to Coup"));
    assert!(stdout.contains("Table:"));
    assert!(stdout.contains("won the game!"));
}

#[test]
fn rejects_bad_player_count() {
    let output = coup(&["--watch", "--players", "9"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("between 2 and 6"));
}
