use audit_intake_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use audit_intake_lib::Cli;
use clap::Parser;
use intake_app::AppPaths;

fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = bootstrap::resolve_config(cli.config.clone())?;

    let paths = AppPaths::from_data_root(&config.data_dir);
    init_tracing_subscriber(&paths.logs_dir)?;

    // Single-threaded event loop; only network and file awaits suspend.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(bootstrap::run_app(config, cli))
}
