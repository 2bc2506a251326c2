use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use userform::{HttpUserApi, UserForm, cli, load_config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("userform=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    tracing::debug!(config = %config, "Loaded configuration");

    let api = HttpUserApi::from_config(&config.api)?;
    let mut form = UserForm::new(Arc::new(api), Arc::new(cli::StdinConfirm))
        .with_date_format(config.display.date_format.clone());

    cli::run(&mut form).await?;

    Ok(())
}
