use std::io;
use std::sync::Arc;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use studio_stream::adapters::{ErrorLog, ReqwestHttpClient, StaticSession};
use studio_stream::cli::{parse_args, CliCommand, SendArgs, TurnPrinter, USAGE, VERSION};
use studio_stream::config::StreamConfig;
use studio_stream::orchestrator::{Orchestrator, TurnPhase, TurnUpdate};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studio_stream=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Send one prompt and print the reply until the turn ends or Ctrl-C.
async fn run_turn(args: SendArgs) -> Result<TurnPhase> {
    let config = StreamConfig::from_env();
    tracing::info!("Streaming from {}", config.stream_url());

    let http = Arc::new(ReqwestHttpClient::with_connect_timeout(config.connect_timeout)?);
    let session_id = args
        .session
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let session = Arc::new(StaticSession::new(session_id));
    let errors = Arc::new(ErrorLog::new(config.error_ttl));

    let mut orchestrator = Orchestrator::new(&config, http, session, errors);
    let assistant_id = orchestrator.handle_send(&args.prompt, &args.model, args.mode)?;

    let mut printer = TurnPrinter::new();
    let mut stdout = io::stdout();

    loop {
        tokio::select! {
            update = orchestrator.next_update() => {
                let Some(update) = update else { break };
                printer.render(&mut stdout, &update, orchestrator.message(&assistant_id))?;
            }
            _ = tokio::signal::ctrl_c() => {
                if orchestrator.cancel_generation() {
                    printer.render(
                        &mut stdout,
                        &TurnUpdate::Finished(TurnPhase::Cancelled),
                        orchestrator.message(&assistant_id),
                    )?;
                }
                break;
            }
        }
    }

    if let Some(error) = orchestrator.error() {
        eprintln!("Error: {}", error);
    }
    Ok(orchestrator.phase())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("studio-stream {}", VERSION);
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Send(args)) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    init_tracing();

    if run_turn(args).await? == TurnPhase::Errored {
        std::process::exit(1);
    }
    Ok(())
}
