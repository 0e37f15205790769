use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "results-lookup")]
#[command(about = "Look up exam results by exam number (with channel subscription check)", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Results dataset JSON (default: env var, then config file, then bundled sample)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up one exam number
    Lookup {
        /// Exam number
        #[arg(allow_hyphen_values = true)]
        exam_number: String,
    },

    /// Look up exam numbers interactively
    Interactive,

    /// Show or edit settings
    Config {
        /// Save the dataset path
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },

    /// Show dataset information
    Dataset {
        /// Report duplicate exam numbers
        #[arg(long)]
        check: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::parse_from(["results-lookup", "-vv", "lookup", "12345"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Lookup { ref exam_number } if exam_number == "12345"));
    }

    #[test]
    fn test_parse_lookup_empty_value() {
        let cli = Cli::parse_from(["results-lookup", "lookup", ""]);
        assert!(matches!(cli.command, Commands::Lookup { ref exam_number } if exam_number.is_empty()));
    }

    #[test]
    fn test_parse_global_dataset() {
        let cli = Cli::parse_from(["results-lookup", "dataset", "--check", "--dataset", "s.json"]);
        assert_eq!(cli.dataset, Some(PathBuf::from("s.json")));
        assert!(matches!(cli.command, Commands::Dataset { check: true }));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
