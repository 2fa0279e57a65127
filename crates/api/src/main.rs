use anyhow::Context;

use ledgerkeep_auth::{AccountAdministrator, AuthConfig};
use ledgerkeep_infra::StoreHandle;

/// Process configuration, resolved once at startup. Missing values are
/// startup-fatal, never per-request errors.
struct Config {
    auth: AuthConfig,
    store: StoreHandle,
}

fn load_config() -> anyhow::Result<Config> {
    let secret = std::env::var("LEDGERKEEP_SECRET")
        .context("LEDGERKEEP_SECRET is not set (signing secret is required)")?;

    let descriptor = std::env::var("LEDGERKEEP_DB")
        .context("LEDGERKEEP_DB is not set (e.g. 'memory:' or 'file:ledger.json')")?;

    let store = ledgerkeep_infra::open_store(&descriptor)
        .with_context(|| format!("opening storage backend '{descriptor}'"))?;

    Ok(Config {
        auth: AuthConfig::new(secret),
        store,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledgerkeep_observability::init();

    let config = load_config()?;

    // `ledgerkeep-api create-admin <email> <password>` bootstraps the first
    // admin account; admin-gated operations are impossible without one.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("create-admin") {
        let (email, password) = match (args.get(2), args.get(3)) {
            (Some(e), Some(p)) => (e, p),
            _ => anyhow::bail!("usage: ledgerkeep-api create-admin <email> <password>"),
        };
        let admin = AccountAdministrator::new(config.store.principals.clone());
        let created = admin.bootstrap_admin(email, password)?;
        tracing::info!(principal = %created.id, email = %created.email, "admin created");
        return Ok(());
    }

    let app = ledgerkeep_api::app::build_app(config.auth, config.store);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .context("failed to bind 0.0.0.0:8080")?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
