//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use hanabira_core::EffectsConfig;

#[derive(Debug, Parser)]
#[command(name = "hanabira")]
#[command(about = "Ambient petals, snow and stars over your terminal", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Show falling cherry blossom petals
    #[arg(long)]
    pub sakura: bool,

    /// Show falling snow
    #[arg(long)]
    pub snow: bool,

    /// Show twinkling stars
    #[arg(long)]
    pub stars: bool,

    /// Path to the user config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a JSON site config with an `effects` object
    #[arg(long, value_name = "PATH")]
    pub site_config: Option<PathBuf>,

    /// Fixed RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Effect switches given on the command line, if any flag was passed.
    pub fn effects_override(&self) -> Option<EffectsConfig> {
        let effects = EffectsConfig {
            sakura: self.sakura,
            snow: self.snow,
            stars: self.stars,
        };
        effects.any().then_some(effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_no_override() {
        let cli = Cli::parse_from(["hanabira"]);
        assert_eq!(cli.effects_override(), None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::parse_from(["hanabira", "--snow", "--stars", "-vv", "--seed", "9"]);
        assert_eq!(
            cli.effects_override(),
            Some(EffectsConfig {
                sakura: false,
                snow: true,
                stars: true,
            })
        );
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["hanabira", "-q", "-v"]).is_err());
    }
}
