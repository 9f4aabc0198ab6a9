//! material-inventory - 建材目录与库存

use std::sync::Arc;

use anyhow::Context;
use config::AppConfig;
use tracing::{info, warn};

use material_inventory::application::{ImportExchangeCommand, InventoryService};
use material_inventory::config::InventoryConfig;
use material_inventory::infrastructure::{InMemoryCatalogRepository, InMemoryStorageRepository};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("TUZEP_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let app_config = AppConfig::load(&config_dir)?;
    let _metrics = telemetry::init(&app_config.telemetry)?;
    info!(
        app = %app_config.app_name,
        env = %app_config.app_env,
        "Initializing material inventory..."
    );

    let inventory = InventoryConfig::load(&config_dir)?;
    let rules = Arc::new(inventory.rules);
    let service = InventoryService::new(
        Arc::new(InMemoryCatalogRepository::new()),
        Arc::new(InMemoryStorageRepository::new()),
        rules,
    );
    info!("Repositories initialized");

    let locations = service.ensure_locations(&inventory.storage_locations)?;
    info!(count = locations.len(), "Storage locations ready");

    let files: Vec<String> = std::env::args().skip(1).collect();
    if !files.is_empty() {
        let target = locations
            .first()
            .context("no storage location configured for imports")?;
        for path in files {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            match service.import_exchange(ImportExchangeCommand {
                location_id: target.id,
                text,
                quantity: 1,
            }) {
                Ok(outcome) => info!(
                    file = %path,
                    material_id = %outcome.upsert.id(),
                    outcome = outcome.upsert.as_str(),
                    quantity = outcome.entry.quantity,
                    "Imported"
                ),
                Err(e) => warn!(file = %path, error = %e, "Import failed"),
            }
        }
    }

    for location in service.list_locations()? {
        let content = service.location_content(location.id)?;
        for held in &content {
            info!(
                location = %location.name,
                material_id = %held.material.id(),
                material = %held.material.name(),
                tag = %held.material.tag(),
                quantity = held.quantity,
                gross_price = held.material.gross_price(),
                "Holding"
            );
        }
        info!(
            location = %location.name,
            entries = content.len(),
            value = service.location_value(location.id)?,
            "Location summary"
        );
    }

    Ok(())
}
