use crate::config::{load_config, VisualizerConfig};
use crate::layout::compute_layout;
use crate::parser::parse_log;
use crate::render::{render_script, write_output_script};
use crate::theme::Theme;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = ".trace_timeline_config.json";

#[derive(Parser, Debug)]
#[command(name = "ttr", version, about = "Parse a trace log and generate timeline draw commands")]
pub struct Args {
    /// Log file to parse, or '-' for stdin
    pub log_file: PathBuf,

    /// Config JSON file (unknown keys are warned about and ignored)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Output file for the draw script. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    let config = load_run_config(args.config.as_deref())?;
    let input = read_input(&args.log_file)?;
    let root = parse_log(&input)?;

    let theme = Theme::spectrum();
    let commands = compute_layout(&root, &theme, &config)?;
    let script = render_script(&commands);
    write_output_script(&script, args.output.as_deref())?;

    if let Some(output) = &args.output {
        eprintln!("Generated {} commands -> {}", commands.len(), output.display());
    }
    Ok(())
}

// An explicitly named config that is missing gets a notice; the conventional
// path is probed silently.
fn load_run_config(config: Option<&Path>) -> Result<VisualizerConfig> {
    let path = config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    if !path.exists() {
        if config.is_some() {
            eprintln!("Config file '{}' not found, using defaults", path.display());
        }
        return Ok(VisualizerConfig::default());
    }
    load_config(Some(&path))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read log input from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))
}
