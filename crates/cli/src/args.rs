//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{bail, Result};

pub const USAGE: &str = "\
Usage: tds-upload [OPTIONS] PATH...

Upload PDF files (or directories of them) to the TDS extraction service
and save the returned CSV.

Options:
  --check           Verify the service status endpoint before uploading
  --output DIR      Directory to save the result into
  --config FILE     Configuration file (default: $TDS_UPLOAD_CONFIG or ./tds-upload.toml)
  -h, --help        Show this help";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub check: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--check" => parsed.check = true,
                "--output" => parsed.output = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "--config" => parsed.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "--" => {
                    parsed.paths.extend(args.by_ref().map(PathBuf::from));
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                _ => parsed.paths.push(PathBuf::from(arg)),
            }
        }

        if !parsed.help && parsed.paths.is_empty() {
            bail!("No input paths given");
        }
        Ok(parsed)
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.starts_with("--") => Ok(v),
        _ => bail!("{} requires a value", flag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn parse(args: &[&str]) -> Result<CliArgs> {
        CliArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_paths_and_flags() {
        let args = assert_ok!(parse(&["--check", "a.pdf", "--output", "out", "statements/"]));
        assert!(args.check);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(
            args.paths,
            vec![PathBuf::from("a.pdf"), PathBuf::from("statements/")]
        );
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_config_flag() {
        let args = assert_ok!(parse(&["--config", "/etc/tds-upload.toml", "x.pdf"]));
        assert_eq!(args.config, Some(PathBuf::from("/etc/tds-upload.toml")));
    }

    #[test]
    fn test_missing_value_is_error() {
        let err = assert_err!(parse(&["a.pdf", "--output"]));
        assert!(err.to_string().contains("--output requires a value"));

        let err = assert_err!(parse(&["--config", "--check", "a.pdf"]));
        assert!(err.to_string().contains("--config requires a value"));
    }

    #[test]
    fn test_unknown_option_is_error() {
        let err = assert_err!(parse(&["--verbose", "a.pdf"]));
        assert!(err.to_string().contains("--verbose"));
    }

    #[test]
    fn test_no_paths_is_error_unless_help() {
        assert_err!(parse(&["--check"]));
        let args = assert_ok!(parse(&["--help"]));
        assert!(args.help);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let args = assert_ok!(parse(&["--", "--odd-name.pdf"]));
        assert_eq!(args.paths, vec![PathBuf::from("--odd-name.pdf")]);
    }
}
