//! Command-line argument parsing for the studio-stream CLI.
//!
//! ```text
//! studio-stream [--model M] [--mode managed|chat] [--session S] <prompt...>
//! ```

use crate::models::GenerationMode;

pub const DEFAULT_MODEL: &str = "default";

pub const USAGE: &str = "\
Usage: studio-stream [OPTIONS] <PROMPT>...

Options:
  --model <MODEL>      Model id to generate with (default: default)
  --mode <MODE>        managed | chat (default: managed)
  --session <ID>       Session id (default: a fresh id)
  -V, --version        Print version
  -h, --help           Print this help

Environment:
  STUDIO_STREAM_URL, STUDIO_STREAM_PATH, STUDIO_MAX_RETRIES,
  STUDIO_RETRY_BASE_MS, STUDIO_CHANNEL_CAPACITY, RUST_LOG";

/// Arguments of a single generation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SendArgs {
    pub model: String,
    pub mode: GenerationMode,
    pub session: Option<String>,
    pub prompt: String,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send one prompt and stream the reply
    Send(SendArgs),
}

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use studio_stream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["studio-stream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: Iterator<Item = String>,
{
    let mut model = DEFAULT_MODEL.to_string();
    let mut mode = GenerationMode::default();
    let mut session = None;
    let mut prompt: Vec<String> = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--model" => model = value_for(&arg, args.next())?,
            "--mode" => mode = value_for(&arg, args.next())?.parse()?,
            "--session" => session = Some(value_for(&arg, args.next())?),
            // everything after `--` is prompt text
            "--" => {
                prompt.extend(args.by_ref());
                break;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            _ => prompt.push(arg),
        }
    }

    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("missing prompt".to_string());
    }

    Ok(CliCommand::Send(SendArgs {
        model,
        mode,
        session,
        prompt,
    }))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => Err(format!("{} requires a value", flag)),
    }
}
