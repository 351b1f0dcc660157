use bundle_model::application::dto::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query a bundle workspace snapshot
#[derive(Parser, Debug)]
#[command(name = "bundle-model")]
#[command(version)]
#[command(about = "Query bundle models, dependency closures and classpath propagation", long_about = None)]
pub struct Args {
    /// Workspace snapshot to load (.json or .toml)
    #[arg(short, long, value_name = "PATH")]
    pub snapshot: PathBuf,

    /// Configuration file (defaults to bundle-model.config.yml next to the snapshot)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the dependency closure of the given bundles
    Closure {
        /// Bundle ids (`system.bundle` is accepted as an alias)
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,

        /// Leave the requested bundles out of the result
        #[arg(long)]
        exclude_self: bool,
    },
    /// Replay a change of the given bundles and print the reinstalled containers
    Affected {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// List the active models
    List {
        /// Include disabled models
        #[arg(long)]
        include_disabled: bool,
    },
}

impl Args {
    /// Parses the command line, returning clap's error instead of exiting
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("bundle-model").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_closure() {
        let args = parse(&["--snapshot", "ws.json", "closure", "a", "b", "--exclude-self"]).unwrap();
        assert_eq!(args.snapshot, PathBuf::from("ws.json"));
        assert_eq!(args.format, OutputFormat::Text);
        match args.command {
            Command::Closure { ids, exclude_self } => {
                assert_eq!(ids, ["a", "b"]);
                assert!(exclude_self);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_format_json() {
        let args = parse(&["-s", "ws.json", "--format", "JSON", "list"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(matches!(
            args.command,
            Command::List {
                include_disabled: false
            }
        ));
    }

    #[test]
    fn test_parse_invalid_format() {
        let err = parse(&["-s", "ws.json", "--format", "xml", "list"]).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_snapshot_is_required() {
        assert!(parse(&["list"]).is_err());
    }

    #[test]
    fn test_closure_requires_ids() {
        assert!(parse(&["-s", "ws.json", "closure"]).is_err());
    }

    #[test]
    fn test_parse_affected_with_config() {
        let args = parse(&["-s", "ws.toml", "-c", "cfg.yml", "affected", "core"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("cfg.yml")));
        assert!(matches!(args.command, Command::Affected { ref ids } if ids == &["core"]));
    }
}
