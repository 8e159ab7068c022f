use std::io;
use std::process::ExitCode;
use clap::Parser;
use coup_cli::config::Cli;
use coup_cli::console::{display_state, display_welcome, ConsoleDecisions, ConsoleSink};
use coup_cli::engine::MAX_TURNS;
use coup_cli::notify::JsonSink;
use coup_cli::{CoupError, GameConfig, GameSession, NotificationSink, TurnEngine, TurnOutcome};

fn main() -> ExitCode {
    let config = match GameConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("game aborted: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut config: GameConfig) -> Result<(), CoupError> {
    // with --json, stdout carries nothing but events
    let prose = !config.json_events;

    if prose {
        display_welcome(&mut io::stdout())?;
    }

    // stdin is locked by whoever is prompting, so every console lives in its own scope
    if !config.all_computer && !config.name_given {
        let name = ConsoleDecisions::stdin(config.json_events).ask("Enter your name: ")?;
        if !name.is_empty() {
            config.human_name = name;
        }
    }

    loop {
        play(&config)?;

        if config.all_computer {
            return Ok(());
        }

        let again = ConsoleDecisions::stdin(config.json_events)
            .ask_yes_no("Would you like to play again? Enter 'y' for yes or 'n' for no: ")?;
        if !again {
            return Ok(());
        }

        // a fixed seed would deal the same game again
        config.seed = config.seed.map(|seed| seed.wrapping_add(1));
        if prose {
            display_welcome(&mut io::stdout())?;
        }
    }
}

fn play(config: &GameConfig) -> Result<(), CoupError> {
    let mut session = GameSession::new(config)?;
    let mut engine = TurnEngine::for_session(&session, config);
    let mut sink: Box<dyn NotificationSink> = if config.json_events {
        Box::new(JsonSink::new(io::stdout()))
    } else {
        Box::new(ConsoleSink::stdout())
    };

    loop {
        if !config.json_events {
            display_state(&mut io::stdout(), &session)?;
        }

        if let TurnOutcome::GameOver { .. } = engine.play_turn(&mut session, sink.as_mut())? {
            return Ok(());
        }

        if session.turn() >= MAX_TURNS {
            return Err(CoupError::TurnLimit(session.turn()));
        }
    }
}
