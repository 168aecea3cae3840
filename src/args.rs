use clap::{ArgAction, Parser};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Command line arguments parser
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Copy a file into every solution folder below a directory")]
#[command(name = "file-to-solution")]
pub struct Args {
    /// The path to the source file
    #[arg(value_name = "SOURCE_FILE")]
    pub source_file: PathBuf,

    /// The directory where the destination solution folders reside [default: current directory]
    #[arg(value_name = "TARGET_DIRECTORY")]
    pub target_directory: Option<PathBuf>,

    /// Subfolder to copy into, searched at any depth. Without it, solution root folders are used
    #[arg(short = 'd', long = "destination-subfolder", value_name = "NAME")]
    pub destination_subfolder: Option<String>,

    /// Pairs of strings to replace in the copied content: SEARCH REPLACEMENT ...
    #[arg(
        short = 'r',
        long = "replace-strings",
        value_name = "STRING",
        num_args = 1..,
        action = ArgAction::Append
    )]
    pub replace_strings: Vec<String>,

    /// Maximum number of destination files written at the same time
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// Do not print a line for every copied file
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Outcome of reading the command line
#[derive(Debug)]
pub enum Parsed {
    /// Arguments are ready to be resolved into a plan
    Run(Args),
    /// Help or version text was requested; print it to stdout and exit successfully
    Display(String),
    /// The command line was invalid; print the message to stderr and fail
    Invalid(String),
}

/// Parse the process command line
pub fn parse() -> Parsed {
    parse_from(std::env::args_os())
}

/// Parse an explicit argument list. Help and version requests are detected here,
/// before anything touches the filesystem.
pub fn parse_from<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::error::ErrorKind;

    match Args::try_parse_from(args) {
        Ok(args) => Parsed::Run(args),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Parsed::Display(err.render().to_string())
            }
            _ => Parsed::Invalid(err.render().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Args {
        match parse_from(args) {
            Parsed::Run(args) => args,
            other => panic!("expected arguments, got {:?}", other),
        }
    }

    #[test]
    fn test_positional_arguments() {
        let args = run(&["file-to-solution", "stylecop.json", "/work"]);
        assert_eq!(args.source_file, PathBuf::from("stylecop.json"));
        assert_eq!(args.target_directory, Some(PathBuf::from("/work")));
        assert!(args.destination_subfolder.is_none());
        assert!(args.replace_strings.is_empty());
        assert!(args.jobs.is_none());
    }

    #[test]
    fn test_target_directory_is_optional() {
        let args = run(&["file-to-solution", "stylecop.json"]);
        assert!(args.target_directory.is_none());
    }

    #[test]
    fn test_replace_strings_are_collected_in_order() {
        let args = run(&[
            "file-to-solution",
            "a.txt",
            "/work",
            "-d",
            "src",
            "-r",
            "A",
            "1",
            "B",
            "2",
            "--replace-strings",
            "C",
            "3",
        ]);
        assert_eq!(args.destination_subfolder.as_deref(), Some("src"));
        assert_eq!(args.replace_strings, vec!["A", "1", "B", "2", "C", "3"]);
    }

    #[test]
    fn test_jobs_must_be_positive() {
        let zero = parse_from(["file-to-solution", "a.txt", "-j", "0"]);
        assert!(matches!(zero, Parsed::Invalid(_)));
        let args = run(&["file-to-solution", "a.txt", "-j", "4"]);
        assert_eq!(args.jobs.map(NonZeroUsize::get), Some(4));
    }

    #[test]
    fn test_help_and_version_are_displayed() {
        match parse_from(["file-to-solution", "--help"]) {
            Parsed::Display(text) => assert!(text.contains("--destination-subfolder")),
            other => panic!("expected help, got {:?}", other),
        }
        let version = parse_from(["file-to-solution", "--version"]);
        assert!(matches!(version, Parsed::Display(_)));
    }

    #[test]
    fn test_missing_source_is_invalid() {
        assert!(matches!(parse_from(["file-to-solution"]), Parsed::Invalid(_)));
        let unknown = parse_from(["file-to-solution", "a.txt", "--bogus"]);
        assert!(matches!(unknown, Parsed::Invalid(_)));
    }
}
