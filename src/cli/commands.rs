//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lazy, paginated access to REST APIs described in YAML
#[derive(Parser, Debug)]
#[command(name = "restorm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API definition file (YAML)
    #[arg(short, long, global = true)]
    pub definition: Option<PathBuf>,

    /// Model to query
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the API definition
    Validate,

    /// List the models of the API definition
    Models,

    /// Print the number of instances (fetches one page)
    Count,

    /// Print the instance at an index
    Get {
        /// Zero-based index into the collection
        #[arg(long)]
        index: usize,
    },

    /// Print the instances in [start, stop)
    Slice {
        /// First index
        #[arg(long, default_value = "0")]
        start: usize,

        /// End index (exclusive)
        #[arg(long)]
        stop: usize,
    },

    /// Print every instance, fetching pages as needed
    List {
        /// Query parameters as key=value (repeatable)
        #[arg(long = "filter", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,

        /// Ordering field (`-field` for descending)
        #[arg(long, allow_hyphen_values = true)]
        order_by: Option<String>,

        /// Maximum instances to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print one instance by slug from its detail URL
    Detail {
        /// Slug (usually the id)
        #[arg(long)]
        slug: String,
    },

    /// Print a short preview of the collection (fetches one page)
    Preview,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::parse_from([
            "restorm",
            "-d",
            "blog.yaml",
            "-m",
            "Post",
            "list",
            "--filter",
            "author=alice",
            "--order-by",
            "-id",
            "--limit",
            "5",
        ]);

        assert_eq!(cli.model.as_deref(), Some("Post"));
        match cli.command {
            Commands::List {
                filters,
                order_by,
                limit,
            } => {
                assert_eq!(filters, vec![("author".to_string(), "alice".to_string())]);
                assert_eq!(order_by.as_deref(), Some("-id"));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_slice() {
        let cli = Cli::parse_from(["restorm", "slice", "--start", "35", "--stop", "45"]);
        assert!(matches!(cli.command, Commands::Slice { start: 35, stop: 45 }));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_filter_rejected() {
        assert!(Cli::try_parse_from(["restorm", "list", "--filter", "nope"]).is_err());
    }
}
