use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use cosketch::Config;
use cosketch::artwork::{ArtworkId, Catalog};
use cosketch::collab::{self, CollabError, Orchestrator};
use cosketch::session::{Command, Script, Session};
use cosketch::ui::{self, Panel};

#[derive(Parser, Debug)]
#[command(name = "cosketch")]
#[command(
    version,
    about = "Co-create a figure with an AI collaborator from a reference artwork"
)]
struct Cli {
    /// Config file to use instead of ~/.config/cosketch/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Parse a saved model reply and print the result as JSON
    Parse {
        /// File holding the reply text
        file: PathBuf,

        /// Treat the reply as a complete-vision reply and extract its markup
        #[arg(long)]
        vision: bool,
    },

    /// Replay a pointer/tool script and write the canvas as PNG
    Draw {
        /// JSON script of input commands
        #[arg(long, value_name = "FILE")]
        script: PathBuf,

        /// PNG file to write
        #[arg(long, value_name = "PNG")]
        out: PathBuf,
    },

    /// Run both collaboration phases against the relay
    Collab {
        /// Artwork file inside the artwork directory (random when omitted)
        #[arg(long, value_name = "FILE")]
        artwork: Option<String>,

        /// Artwork directory, overriding the config
        #[arg(long, value_name = "DIR")]
        artwork_dir: Option<PathBuf>,

        /// Directory receiving body.svg and vision.svg
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        CliCommand::Parse { file, vision } => run_parse(&file, vision),
        CliCommand::Draw { script, out } => {
            let config = Config::load(cli.config.as_deref())?;
            run_draw(&config, &script, &out)
        }
        CliCommand::Collab {
            artwork,
            artwork_dir,
            out_dir,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            let runtime = tokio::runtime::Runtime::new()
                .context("Failed to create Tokio runtime for relay requests")?;
            runtime.block_on(run_collab(&config, artwork, artwork_dir, &out_dir))
        }
    }
}

fn run_parse(file: &Path, vision: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read reply from {}", file.display()))?;

    let json = if vision {
        serde_json::to_string_pretty(&collab::extract(&text))?
    } else {
        serde_json::to_string_pretty(&collab::parse(&text))?
    };
    println!("{json}");
    Ok(())
}

fn run_draw(config: &Config, script_path: &Path, out: &Path) -> Result<()> {
    let script_str = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script from {}", script_path.display()))?;
    let script: Script = serde_json::from_str(&script_str)
        .with_context(|| format!("Failed to parse script from {}", script_path.display()))?;

    let collab = Orchestrator::from_config(config, None)?;
    let mut session = Session::from_config(config, collab);
    session.replay(&script);

    let mut file = fs::File::create(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    session.write_png(&mut file)?;

    println!(
        "Wrote {} marks to {}",
        session.input.canvas.len(),
        out.display()
    );
    println!("{}", ui::tool_status(&session.input.tools));
    Ok(())
}

async fn run_collab(
    config: &Config,
    artwork: Option<String>,
    artwork_dir: Option<PathBuf>,
    out_dir: &Path,
) -> Result<()> {
    let root = artwork_dir.unwrap_or_else(|| config.artwork.directory.clone());
    let artwork = match artwork {
        Some(name) => ArtworkId::new(name),
        None => {
            let catalog = Catalog::scan(&root)
                .with_context(|| format!("Failed to list artworks in {}", root.display()))?;
            catalog
                .pick_random()
                .cloned()
                .ok_or_else(|| anyhow!("No artworks found in {}", root.display()))?
        }
    };

    let collab = Orchestrator::from_config(config, Some(root))?;
    let mut session = Session::from_config(config, collab);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    println!("Artwork: {}", artwork.title());
    println!("{}", ui::INSTRUCTIONS_LOADING);
    session.dispatch(Command::StartPhase1(artwork)).await?;

    let panels = session.panels().await;
    println!("{}", ui::render_text(&panels.instructions));
    if let Panel::Markup { markup } = &panels.body {
        write_svg(&out_dir.join("body.svg"), markup)?;
    }

    println!("{}", ui::VISION_LOADING);
    if let Err(err) = session.dispatch(Command::StartPhase2).await {
        if let CollabError::PreconditionUnmet(unmet) = err {
            println!("{unmet}");
            return Ok(());
        }
        return Err(err.into());
    }

    let panels = session.panels().await;
    match &panels.vision {
        Panel::Markup { markup } => write_svg(&out_dir.join("vision.svg"), markup)?,
        other => println!("{}", ui::render_text(other)),
    }
    Ok(())
}

fn write_svg(path: &Path, markup: &str) -> Result<()> {
    fs::write(path, markup).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
