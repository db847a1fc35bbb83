use tokio::time;
use tracing::{debug, info};

use crate::{config::Config, registry::Registry};

pub async fn start_cleanup_task(registry: Registry, config: Config) {
    let mut interval = time::interval(config.sweep_interval());

    info!(
        "Started game cleanup task: sweeping every {}ms, games expire after {}s",
        config.sweep_interval_ms, config.expiry_secs
    );

    loop {
        interval.tick().await;
        let removed = registry.sweep(config.expiry_secs).await;
        debug!("Sweep removed {} games, {} live", removed, registry.len());
    }
}
