//! Boot-time hook: make sure the required custom search attributes exist in
//! the configured Temporal namespace.
//!
//! Always exits 0 — an unreachable cluster degrades the application, it must
//! not keep it from starting.

use env_logger::Env;
use log::info;
use search_attributes_bootstrap::{Settings, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();
    info!(
        "ensuring search attributes in namespace {:?} via {}",
        settings.namespace, settings.address
    );

    let outcome = run(&settings).await;
    info!("search attribute bootstrap finished: {outcome:?}");

    Ok(())
}
