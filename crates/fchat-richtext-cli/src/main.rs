//! fchat-richtext - parse an F-Chat message and print the rich-text tree

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use fchat_richtext_config::{Config, OutputFormat};
use fchat_richtext_engine::{RichTextNode, parse_with, snapshot};

#[derive(Parser, Debug)]
#[command(name = "fchat-richtext")]
#[command(version, about = "Parse F-Chat BBCode and markdown into a rich-text tree", long_about = None)]
#[command(after_help = "EXAMPLES:
    fchat-richtext '[b]hi[/b]'                   Print the node tree
    fchat-richtext --markdown '**hi** :wave:'    Parse markdown as well
    echo '[i]x[/i]' | fchat-richtext --format json")]
struct Cli {
    /// Message to parse (read from stdin when neither this nor --file is given)
    #[arg(value_name = "INPUT", conflicts_with = "file")]
    input: Option<String>,

    /// Read the message from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Recognize markdown delimiters
    #[arg(long, overrides_with = "no_markdown")]
    markdown: bool,

    /// Only recognize bracket tags
    #[arg(long, overrides_with = "markdown")]
    no_markdown: bool,

    /// Maximum number of nested spans (at most 1024)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Config file (default: ~/.config/fchat-richtext/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log parser fallbacks
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Tree,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Tree => OutputFormat::Tree,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(cli.config.as_ref())?;
    let mut options = config.parse_options();
    if cli.markdown {
        options.markdown = true;
    } else if cli.no_markdown {
        options.markdown = false;
    }
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    let format = cli.format.map(OutputFormat::from).unwrap_or(config.format);
    log::debug!(
        "markdown={} max_depth={} format={format}",
        options.markdown,
        options.max_depth
    );

    let input = read_input(&cli)?;
    let nodes = parse_with(&input, &options);
    print!("{}", render(&nodes, format)?);
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = Config::expand_path(path);
            log::debug!("Config path: {}", path.display());
            match Config::load_from_path(&path)? {
                Some(config) => Ok(config),
                None => bail!("Config file not found: {}", path.display()),
            }
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// The message from the argument, the file or stdin. One trailing line
/// ending is dropped from file and stdin input.
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }

    let raw = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            raw
        }
    };
    Ok(trim_line_ending(raw))
}

fn trim_line_ending(mut raw: String) -> String {
    if raw.ends_with('\n') {
        raw.pop();
        if raw.ends_with('\r') {
            raw.pop();
        }
    }
    raw
}

fn render(nodes: &[RichTextNode<'_>], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Tree => snapshot::Dump(nodes).to_string(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(nodes)?;
            json.push('\n');
            json
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn trims_one_line_ending() {
        assert_eq!(trim_line_ending("x\n".to_string()), "x");
        assert_eq!(trim_line_ending("x\r\n".to_string()), "x");
        assert_eq!(trim_line_ending("x\n\n".to_string()), "x\n");
        assert_eq!(trim_line_ending("x".to_string()), "x");
    }

    #[test]
    fn later_markdown_flag_wins() {
        let cli = Cli::parse_from(["fchat-richtext", "--markdown", "--no-markdown", "x"]);
        assert!(!cli.markdown);
        assert!(cli.no_markdown);
    }

    #[test]
    fn renders_empty_json_array() {
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]\n");
        assert_eq!(render(&[], OutputFormat::Tree).unwrap(), "");
    }
}
