use clap::Parser;
use clap::builder::RangedU64ValueParser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::utils::config::{SearchDefaults, WorkerThreadLimits};

/// Content-based image similarity search by color histogram intersection.
#[derive(Clone, Debug, Parser)]
#[command(name = "histsearch")]
#[command(about = "Rank the .jpg images in a directory by color similarity to a query image.")]
pub struct Cli {
    /// Query image.
    #[arg(value_name = "QUERY")]
    pub query: PathBuf,

    /// Directory of candidate images (only `*.jpg` directly inside it are considered).
    #[arg(value_name = "DATASET_DIR")]
    pub dataset_dir: PathBuf,

    /// Number of histogram workers. 0 uses all available cores.
    #[arg(long, short = 'w', default_value_t = WorkerThreadLimits::DEFAULT_THREADS)]
    pub workers: usize,

    /// Number of most similar images to report.
    #[arg(long = "top", short = 'k', default_value_t = SearchDefaults::TOP_K, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub top_k: usize,

    /// Verbose output: debug logs and a progress bar.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Exit status for a malformed command line.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Outcome of parsing the command line.
#[derive(Debug)]
pub enum ParsedArgs {
    Run(Cli),
    /// `--help` or `--version`: let clap print and exit as it normally does.
    Exit(clap::Error),
    /// Wrong argument count or an invalid option value.
    Usage(clap::Error),
}

pub fn parse_args_from<I, T>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParsedArgs::Run(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            ParsedArgs::Exit(e)
        }
        Err(e) => ParsedArgs::Usage(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_usage(args: &[&str]) -> bool {
        matches!(parse_args_from(args.iter().copied()), ParsedArgs::Usage(_))
    }

    #[test]
    fn wrong_positional_count_is_usage_error() {
        assert!(is_usage(&["histsearch"]));
        assert!(is_usage(&["histsearch", "q.jpg"]));
        assert!(is_usage(&["histsearch", "q.jpg", "data", "extra"]));
    }

    #[test]
    fn zero_top_k_is_usage_error() {
        assert!(is_usage(&["histsearch", "q.jpg", "data", "-k", "0"]));
    }

    #[test]
    fn two_positionals_use_defaults() {
        let ParsedArgs::Run(cli) = parse_args_from(["histsearch", "q.jpg", "data"]) else {
            panic!("expected a runnable command line");
        };
        assert_eq!(cli.query, PathBuf::from("q.jpg"));
        assert_eq!(cli.dataset_dir, PathBuf::from("data"));
        assert_eq!(cli.workers, WorkerThreadLimits::DEFAULT_THREADS);
        assert_eq!(cli.top_k, SearchDefaults::TOP_K);
        assert!(!cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn options_override_defaults() {
        let ParsedArgs::Run(cli) =
            parse_args_from(["histsearch", "-w", "0", "--top", "3", "--json", "q.jpg", "data"])
        else {
            panic!("expected a runnable command line");
        };
        assert_eq!(cli.workers, 0);
        assert_eq!(cli.top_k, 3);
        assert!(cli.json);
    }

    #[test]
    fn help_is_not_a_usage_error() {
        assert!(matches!(
            parse_args_from(["histsearch", "--help"]),
            ParsedArgs::Exit(_)
        ));
    }
}
