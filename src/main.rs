use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use story_gen::cli::CliOptions;
use story_gen::config::setup_logging;
use story_gen::fs_utils::{load_input_images, write_output_image};
use story_gen::generate::GenerationClient;
use story_gen::models::GenerationRequest;
use story_gen::session::{GenerationState, StorySession, SubmitOutcome};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Failed to initialise logging: {}", err);
    }

    match run(cli).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: CliOptions) -> anyhow::Result<PathBuf> {
    let config = cli.client_config()?;
    let images = load_input_images(&cli.images).await?;
    let request = GenerationRequest::new(cli.prompt.clone(), images, cli.styles());

    let session = StorySession::new(GenerationClient::new(&config), cli.locale);
    let outcome = session
        .submit_until_interrupted(request, cli.platform, tokio::signal::ctrl_c())
        .await;

    let png = match (outcome, session.state()) {
        (SubmitOutcome::Delivered, GenerationState::Success(png)) => png,
        (SubmitOutcome::Delivered, GenerationState::Error(message)) => bail!(message),
        (_, state) => bail!("Generation did not finish ({:?})", state),
    };

    let output = write_output_image(&cli.out_dir, &png).await?;
    info!(path = %output.display(), bytes = png.len(), "Story image saved");

    Ok(output)
}
