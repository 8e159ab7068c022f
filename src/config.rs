use std::time::Duration;
use clap::{Parser, ValueEnum};
use crate::ai::ChallengePolicy;
use crate::CoupError;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub num_players: usize,
    pub human_name: String,
    // every seat is a computer, for watching or simulating games
    pub all_computer: bool,
    pub seed: Option<u64>,
    pub ai_delay: Duration,
    pub computer_policy: ChallengePolicy,
    // emit events as json lines instead of prose
    pub json_events: bool,
    // the name was given on the command line, don't prompt for it
    pub name_given: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 3,
            human_name: "Human".to_string(),
            all_computer: false,
            seed: None,
            ai_delay: Duration::ZERO,
            computer_policy: ChallengePolicy::Never,
            json_events: false,
            name_given: false,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), CoupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(CoupError::InvalidPlayerCount(self.num_players));
        }

        Ok(())
    }
}

/// How computer seats answer challenge and block offers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Never,
    Random,
    Honest,
}

impl From<PolicyArg> for ChallengePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Never => ChallengePolicy::Never,
            PolicyArg::Random => ChallengePolicy::Random(0.5),
            PolicyArg::Honest => ChallengePolicy::HonestBlock,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "coup")]
#[command(about = "Coup - bluff your way past computer players in the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value_t = 3)]
    #[arg(help = "Number of players, 2 to 6")]
    pub players: usize,

    #[arg(long)]
    #[arg(help = "Your name, asked for at start when missing")]
    pub name: Option<String>,

    #[arg(long)]
    #[arg(help = "RNG seed for reproducible games")]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 0)]
    #[arg(help = "Pause before each computer decision, in milliseconds")]
    pub delay_ms: u64,

    #[arg(long, value_enum, default_value_t = PolicyArg::Never)]
    pub policy: PolicyArg,

    #[arg(long)]
    #[arg(help = "Computer players only")]
    pub watch: bool,

    #[arg(long)]
    #[arg(help = "Print events as JSON lines")]
    pub json: bool,
}

impl TryFrom<Cli> for GameConfig {
    type Error = CoupError;

    fn try_from(cli: Cli) -> Result<Self, CoupError> {
        let defaults = GameConfig::default();
        let config = GameConfig {
            num_players: cli.players,
            name_given: cli.name.is_some(),
            human_name: cli.name.unwrap_or(defaults.human_name),
            all_computer: cli.watch,
            seed: cli.seed,
            ai_delay: Duration::from_millis(cli.delay_ms),
            computer_policy: cli.policy.into(),
            json_events: cli.json,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use clap::{CommandFactory, Parser};
    use crate::ai::ChallengePolicy;
    use crate::config::{Cli, GameConfig};
    use crate::CoupError;

    fn cli(line: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("coup").chain(line.split_whitespace()))
    }

    fn parsed(line: &str) -> Result<GameConfig, CoupError> {
        GameConfig::try_from(cli(line).unwrap())
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = parsed("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.num_players, 3);
        assert_eq!(config.computer_policy, ChallengePolicy::Never);
    }

    #[test]
    fn all_flags() {
        let config = parsed("--players 5 --name Ada --seed 42 --delay-ms 250 --policy random --watch --json").unwrap();
        assert_eq!(config.num_players, 5);
        assert_eq!(config.human_name, "Ada");
        assert!(config.name_given);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ai_delay, Duration::from_millis(250));
        assert_eq!(config.computer_policy, ChallengePolicy::Random(0.5));
        assert!(config.all_computer);
        assert!(config.json_events);

        assert_eq!(parsed("--policy honest").unwrap().computer_policy, ChallengePolicy::HonestBlock);
    }

    #[test]
    fn player_count_bounds() {
        assert_eq!(parsed("--players 1"), Err(CoupError::InvalidPlayerCount(1)));
        assert_eq!(parsed("--players 7"), Err(CoupError::InvalidPlayerCount(7)));
        assert!(parsed("--players 6").is_ok());
    }

    #[test]
    fn bad_arguments() {
        assert!(cli("--players").is_err());
        assert!(cli("--players many").is_err());
        assert!(cli("--policy smart").is_err());
        assert!(cli("--colour").is_err());
    }
}
