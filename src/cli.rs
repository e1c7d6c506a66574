//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::namespace::NamespaceStyle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Open Graph metadata renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (config and relative paths resolve against it)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: opengraph.toml)
    #[arg(short = 'C', long, default_value = "opengraph.toml")]
    pub config: PathBuf,

    /// Override `[excerpt].length`
    #[arg(long)]
    pub excerpt_length: Option<usize>,

    /// Override `[namespace].style`
    #[arg(long, value_enum)]
    pub style: Option<NamespaceStyle>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Property overrides shared by all commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Set a value, e.g. `--set title=Hello` or `--set fb:app_id=123` (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the root namespace attributes and the meta tags for a context file
    Render {
        /// Context snapshot (.toml or .json)
        context: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Inject meta tags into an HTML page
    Inject {
        /// Context snapshot (.toml or .json)
        context: PathBuf,

        /// HTML page to decorate
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Inject every `page.html` that has a sibling `page.og.toml`/`page.og.json`
    Build {
        /// Directory to scan
        dir: PathBuf,

        /// Output directory (default: rewrite pages in place)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

impl Commands {
    pub const fn overrides(&self) -> &OverrideArgs {
        match self {
            Self::Render { overrides, .. }
            | Self::Inject { overrides, .. }
            | Self::Build { overrides, .. } => overrides,
        }
    }
}

/// Parse `KEY=VALUE`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("title=Hello = World"),
            Ok(("title".into(), "Hello = World".into()))
        );
        assert_eq!(parse_key_value("fb:app_id="), Ok(("fb:app_id".into(), String::new())));
        assert!(parse_key_value("title").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_cli_render_with_overrides() {
        let cli = Cli::try_parse_from([
            "opengraph",
            "--style",
            "xmlns",
            "render",
            "post.og.toml",
            "--set",
            "title=Custom",
            "-s",
            "fb:app_id=1",
        ])
        .unwrap();

        assert_eq!(cli.style, Some(NamespaceStyle::Xmlns));
        assert_eq!(cli.config, PathBuf::from("opengraph.toml"));
        assert!(matches!(&cli.command, Commands::Render { context, .. } if context == &PathBuf::from("post.og.toml")));
        assert_eq!(
            cli.command.overrides().set,
            [
                ("title".to_owned(), "Custom".to_owned()),
                ("fb:app_id".to_owned(), "1".to_owned())
            ]
        );
    }

    #[test]
    fn test_cli_inject_and_build() {
        let cli =
            Cli::try_parse_from(["opengraph", "inject", "ctx.json", "page.html", "-o", "out.html"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inject { output: Some(_), .. }
        ));

        let cli = Cli::try_parse_from(["opengraph", "-C", "og.toml", "build", "public"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("og.toml"));
        assert!(matches!(cli.command, Commands::Build { output: None, .. }));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["opengraph"]).is_err());
    }
}
