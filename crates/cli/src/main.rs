#![deny(unsafe_code)]
//! CLI binary for the engrave hatching generator.
//!
//! Subcommands:
//! - `render`: generate a hatched page and write SVG or PNG
//! - `schema`: print the parameter schema as JSON
//! - `list`: print output formats and default parameters

mod error;
mod output;

use clap::{Parser, Subcommand};
use engrave_hatch::{HatchConfig, Hatcher};
use engrave_render::{render_to_file, OutputFormat};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "engrave", about = "Engraved cross-hatching generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a hatched page.
    Render {
        /// Page width (overrides params and recipe).
        #[arg(short = 'W', long)]
        width: Option<f64>,

        /// Page height (overrides params and recipe).
        #[arg(short = 'H', long)]
        height: Option<f64>,

        /// Run seed. A fresh seed is drawn and reported when absent.
        #[arg(long)]
        seed: Option<u64>,

        /// Parameter overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Replay a recipe written by an earlier run.
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Output format (svg, png). Inferred from --output when omitted.
        #[arg(short, long)]
        format: Option<String>,

        /// Output file path. Defaults to a timestamped name in --out-dir.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name prefix for timestamped output.
        #[arg(long, default_value = "hatching")]
        prefix: String,

        /// Directory for timestamped output.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also write a JSON recipe next to the output.
        #[arg(long)]
        write_recipe: bool,
    },
    /// Print every parameter with its type, default, and range.
    Schema,
    /// List output formats and default parameters.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&HatchConfig::param_schema())?);
        }
        Command::List => {
            let formats = OutputFormat::list_formats();
            let defaults = HatchConfig::default().to_json();
            if cli.json {
                let info = serde_json::json!({
                    "formats": formats,
                    "defaults": defaults,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Formats:");
                println!("  {}", formats.join(", "));
                println!("Defaults:");
                if let serde_json::Value::Object(map) = defaults {
                    for (key, value) in map {
                        println!("  {key} = {value}");
                    }
                }
            }
        }
        Command::Render {
            width,
            height,
            seed,
            params,
            recipe,
            format,
            output: out_path,
            prefix,
            out_dir,
            write_recipe,
        } => {
            let overrides: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let recipe = recipe.as_deref().map(output::read_recipe).transpose()?;
            let merged = output::layer_params(recipe.as_ref(), &overrides, width, height, seed)?;

            let cfg = output::load_config(&merged)?;
            let seed = cfg.resolve_seed(rand::random::<u64>);

            let format = output::resolve_format(format.as_deref(), out_path.as_deref())?;
            let path = out_path.unwrap_or_else(|| {
                out_dir.join(output::output_name(
                    &prefix,
                    format.extension(),
                    chrono::Utc::now(),
                ))
            });

            let hatcher = Hatcher::new(cfg.clone(), seed)?;
            let stats = render_to_file(format, &path, cfg.width, cfg.height, cfg.paper, hatcher)?;

            let recipe_out = if write_recipe {
                let recipe_path = output::recipe_path(&path);
                output::write_recipe(&output::recipe_for(&cfg, seed), &recipe_path)?;
                Some(recipe_path)
            } else {
                None
            };

            if cli.json {
                let info = serde_json::json!({
                    "output": path.display().to_string(),
                    "format": format.extension(),
                    "seed": seed,
                    "width": cfg.width,
                    "height": cfg.height,
                    "strokes": stats.strokes(),
                    "primaries": stats.primaries,
                    "ghosts": stats.ghosts,
                    "points": stats.points,
                    "recipe": recipe_out.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "wrote {} (seed {seed}, {} strokes)",
                    path.display(),
                    stats.strokes()
                );
                if let Some(p) = recipe_out {
                    eprintln!("recipe {}", p.display());
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
