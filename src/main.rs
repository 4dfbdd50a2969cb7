use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nlp2fhir_api::AppState;
use nlp2fhir_core::FormConfig;

/// Main entry point for the NLP2FHIR form service
///
/// Starts the REST server that hosts form sessions and forwards submissions to the conversion
/// backend.
///
/// # Environment Variables
/// - `NLP2FHIR_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NLP2FHIR_BACKEND_URL`: Base URL of the conversion backend (default: "http://localhost:8080")
/// - `NLP2FHIR_SUBMIT_TIMEOUT_SECS`: Timeout for one submission (default: 600)
///
/// Exports are returned as HTTP attachments, so the server never reads `NLP2FHIR_DOWNLOAD_DIR`;
/// that variable only applies to the `nlp2fhir` CLI.
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nlp2fhir=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = server_config(
        std::env::var("NLP2FHIR_BACKEND_URL").ok(),
        std::env::var("NLP2FHIR_SUBMIT_TIMEOUT_SECS").ok(),
    )?;
    let rest_addr =
        std::env::var("NLP2FHIR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting NLP2FHIR REST on {}", rest_addr);
    tracing::info!("++ Submitting to {}", config.submit_url()?);

    let state = AppState::from_config(config)?;
    let app = nlp2fhir_api::router(state);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Server configuration from raw environment values. No download directory is involved.
fn server_config(
    backend_url: Option<String>,
    submit_timeout_secs: Option<String>,
) -> nlp2fhir_core::FormResult<FormConfig> {
    FormConfig::from_env_values(backend_url, None, submit_timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn server_config_takes_backend_and_timeout_only() {
        let config = server_config(Some("http://pipeline:9000".into()), Some("120".into())).unwrap();

        assert_eq!(config.submit_url().unwrap().as_str(), "http://pipeline:9000/submit");
        assert_eq!(config.submit_timeout(), Duration::from_secs(120));
        assert_eq!(config.download_dir(), std::path::Path::new("."));
    }
}
