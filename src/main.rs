use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use dotenvy::dotenv;
use tracing::{error, info};

mod config;
mod handlers;
mod llm;
mod options;
mod prompt;
mod utils;

use handlers::enhance::{enhance_handler, EnhanceArgs};
use handlers::prompt::{options_handler, prompt_handler, PromptArgs};
use handlers::OptionSource;
use utils::logging::init_logging;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Enhance(EnhanceArgs),
    Prompt(PromptArgs),
    Options { json: bool },
    Help,
}

fn usage() -> &'static str {
    "Usage:
  kitchen-retouch enhance --input <photo> [--options <file>] [--set field=value]... [--output <path>]
  kitchen-retouch prompt [--options <file>] [--set field=value]... [--json]
  kitchen-retouch options [--json]
  kitchen-retouch help"
}

fn next_value<'a>(args: &'a [String], index: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *index += 1;
    args.get(*index)
        .map(|value| value.as_str())
        .ok_or_else(|| anyhow!("Missing value for {flag}"))
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let Some(command) = args.get(1).map(|value| value.as_str()) else {
        return Ok(Command::Help);
    };

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut source = OptionSource::default();
    let mut json = false;

    let takes_options = matches!(command, "enhance" | "prompt");
    match command {
        "help" | "--help" | "-h" => return Ok(Command::Help),
        "enhance" | "prompt" | "options" => {}
        other => return Err(anyhow!("Unknown command: {other}\n{}", usage())),
    }

    let mut index = 2;
    while index < args.len() {
        match args[index].as_str() {
            "--input" if command == "enhance" => {
                input = Some(PathBuf::from(next_value(args, &mut index, "--input")?));
            }
            "--output" if command == "enhance" => {
                output = Some(PathBuf::from(next_value(args, &mut index, "--output")?));
            }
            "--options" if takes_options => {
                source.options_path =
                    Some(PathBuf::from(next_value(args, &mut index, "--options")?));
            }
            "--set" if takes_options => {
                source
                    .assignments
                    .push(next_value(args, &mut index, "--set")?.to_string());
            }
            "--json" if command != "enhance" => {
                json = true;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                return Err(anyhow!(
                    "Unknown {command} argument: {other}\n{}",
                    usage()
                ));
            }
        }
        index += 1;
    }

    Ok(match command {
        "enhance" => Command::Enhance(EnhanceArgs {
            input: input.ok_or_else(|| anyhow!("--input is required\n{}", usage()))?,
            output,
            source,
        }),
        "prompt" => Command::Prompt(PromptArgs { source, json }),
        _ => Command::Options { json },
    })
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Enhance(args) => {
            let path = enhance_handler(&args).await?;
            println!("{}", path.display());
        }
        Command::Prompt(args) => println!("{}", prompt_handler(&args)?),
        Command::Options { json } => println!("{}", options_handler(json)?),
        Command::Help => println!("{}", usage()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let _guards = init_logging();
    info!("Starting kitchen-retouch {}", env!("CARGO_PKG_VERSION"));

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("command failed: {err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
