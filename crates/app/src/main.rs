//! Passage - command line entry point
//!
//! Loads configuration, installs logging, restores any stored session once,
//! and runs the requested command.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use passage::render::{bootstrap_note, gate_line};
use passage::{Cli, Command, SessionClient};
use passage_domain::{ProtectedView, RegisterCredentials, SignInCredentials, gate};
use passage_infrastructure::ClientConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.overrides.config.as_deref())?;
    cli.overrides.apply(&mut config);
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        stale_token_policy = ?config.stale_token_policy,
        "configuration loaded"
    );

    let client = SessionClient::from_config(&config)?;
    run(cli.command, &client).await
}

async fn run(command: Command, client: &SessionClient) -> Result<ExitCode> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            client
                .register(&RegisterCredentials::new(name, email, password))
                .await?;
            println!("account created; sign in to continue");
        }
        Command::SignIn { email, password } => {
            client
                .sign_in(&SignInCredentials::new(email, password))
                .await?;
            println!("{}", gate_line(&gate(&client.session())));
        }
        Command::SignOut => {
            client.sign_out()?;
            println!("signed out");
        }
        Command::Status => {
            restore(client).await;
            let session = client.session();
            let view = gate(&session);
            println!("{}", gate_line(&view));
            if !view.is_allowed() {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Get { path } => {
            restore(client).await;
            let session = client.session();
            let view = gate(&session);
            if let ProtectedView::SignInRequired { .. } = view {
                eprintln!("{}", gate_line(&view));
                return Ok(ExitCode::from(2));
            }
            let response = client.api().get(&path).await?;
            println!("{}", response.body);
            if !response.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn restore(client: &SessionClient) {
    let outcome = client.bootstrap().await;
    if let Some(note) = bootstrap_note(&outcome) {
        eprintln!("{note}");
    }
}
