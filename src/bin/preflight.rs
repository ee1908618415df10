use ehealth_registry::infra::telemetry;
use ehealth_registry::{AccountKind, AccountStore, Config, PostgresAccountStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars (or .env / db.env):\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, DB_ACQUIRE_TIMEOUT_SECS, PASSWORD_HASH_MEMORY_KIB, PASSWORD_HASH_ITERATIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = Config::from_env()?;
    // Fail early with a clear message instead of a connect error.
    config.database_url()?;
    config.password_hasher()?;

    tracing::info!(port = config.port, cors_origin = %config.cors_origin, "preflight: config ok");

    let store = PostgresAccountStore::connect(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Database not reachable or schema setup failed: {}", e))?;
    tracing::info!("preflight: database reachable, account tables present");

    for kind in AccountKind::ALL {
        let n = store.count(kind).await?;
        tracing::info!(table = kind.table_name(), accounts = n, "preflight: table ok");
    }

    store.close().await;
    tracing::info!("preflight OK");
    Ok(())
}
