//! Command-line interface for sonamang.

use clap::Parser;
use std::path::PathBuf;

/// Sõnamäng - Estonian tile-placement word game in the terminal
#[derive(Parser, Debug)]
#[command(name = "sonamang")]
#[command(about = "Estonian tile-placement word game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game configuration file (TOML). Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Word list, one word per line. Hunspell `.dic` files are accepted.
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Seed for the tile bag, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Player name; repeat for each player. Overrides the config file.
    #[arg(long = "player", value_name = "NAME")]
    pub players: Vec<String>,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["sonamang"]);
        assert!(cli.config.is_none());
        assert!(cli.words.is_none());
        assert!(cli.seed.is_none());
        assert!(cli.players.is_empty());
    }

    #[test]
    fn test_repeated_players_and_seed() {
        let cli = Cli::parse_from([
            "sonamang",
            "--player",
            "Mari",
            "--player",
            "Jaan",
            "--seed",
            "42",
            "--words",
            "et.dic",
        ]);
        assert_eq!(cli.players, vec!["Mari", "Jaan"]);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.words, Some(PathBuf::from("et.dic")));
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["sonamang", "--seed", "abc"]).is_err());
    }
}
