//! opengraph - Open Graph meta tags for CMS pages.

use anyhow::{Context, Result};
use clap::Parser;
use opengraph::{
    OpenGraph,
    build::{build_pages, inject_file},
    cli::{Cli, Commands},
    config::OpenGraphConfig,
    context::Snapshot,
    log,
};
use std::{
    fs,
    io::{Write, stdout},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut og = OpenGraph::new(config);
    og.apply_overrides(&cli.command.overrides().set);
    let config = og.config();

    match &cli.command {
        Commands::Render { context, .. } => {
            let snapshot = Snapshot::from_path(&config.resolve(context))?;
            let mut render = og.render(&snapshot, &snapshot);
            let mut stdout = stdout().lock();
            writeln!(stdout, "{}", render.language_attributes(""))?;
            write!(stdout, "{}", render.meta_tags())?;
            Ok(())
        }
        Commands::Inject {
            context,
            input,
            output,
            ..
        } => {
            let html = inject_file(&og, &config.resolve(context), &config.resolve(input))?;
            match output {
                Some(path) => {
                    let path = config.resolve(path);
                    fs::write(&path, html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    log!("inject"; "{}", path.display());
                }
                None => stdout().lock().write_all(&html)?,
            }
            Ok(())
        }
        Commands::Build { dir, output, .. } => {
            let output = output.as_deref().map(|path| config.resolve(path));
            build_pages(&og, &config.resolve(dir), output.as_deref()).map(|_| ())
        }
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file means defaults.
fn load_config(cli: &Cli) -> Result<OpenGraphConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        OpenGraphConfig::from_path(&config_path)?
    } else {
        OpenGraphConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
