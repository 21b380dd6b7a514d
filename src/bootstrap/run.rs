//! Wizard entry point
//!
//! ```text
//! resolve_config() → wire_dependencies() → WizardSession::load() → command loop → shutdown()
//! ```

use std::io::Write;

use intake_app::{AppPaths, SessionTimings, WizardSession};
use intake_core::config::AppConfig;
use intake_core::ValidationErrors;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, info_span, warn, Instrument};

use super::wiring::wire_dependencies;
use crate::cli::Cli;
use crate::commands::{execute, Command, CommandError, Reply};
use crate::views::{render_screen, ViewContext};

/// Run the wizard against stdin/stdout until `quit` or end of input.
pub async fn run_app(config: AppConfig, cli: Cli) -> anyhow::Result<()> {
    let paths = AppPaths::from_data_root(&config.data_dir);
    let deps = wire_dependencies(&config, &paths)?;
    info!(
        api_base_url = %config.api_base_url,
        data_dir = %config.data_dir.display(),
        "audit intake starting"
    );

    let session = WizardSession::new(deps, SessionTimings::from_config(&config));
    session.load().await;
    session.start();
    prepare(&session, &cli).await;

    if let Some(error) = &cli.sso_error {
        println!("Google sign-in failed: {error}");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let result = command_loop(&session, stdin)
        .instrument(info_span!("wizard.command_loop"))
        .await;

    session.shutdown().await;
    info!("audit intake stopped");
    result
}

/// Apply `--reset`, the SSO hand-off and launch options, in that order.
async fn prepare(session: &WizardSession, cli: &Cli) {
    if cli.reset {
        session.discard_draft().await;
    }
    if let Some((token, profile)) = cli.external_session() {
        session.adopt_external_session(token, profile).await;
    }
    session.apply_launch_options(&cli.launch_options());
}

fn screen(session: &WizardSession, errors: Option<&ValidationErrors>) -> String {
    let state = session.store().state();
    let auth = session.auth_state();
    render_screen(&ViewContext {
        state: &state,
        auth: &auth,
        errors,
    })
}

fn prompt() {
    print!("> ");
    if let Err(err) = std::io::stdout().flush() {
        warn!(error = %err, "failed to flush prompt");
    }
}

async fn command_loop<R>(session: &WizardSession, input: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}", screen(session, None));
    println!("Type `help` for commands.");

    let mut lines = input.lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match execute(session, command).await {
            Ok(Reply::Screen { errors }) => println!("{}", screen(session, errors.as_ref())),
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}
