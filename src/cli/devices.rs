use tabled::Table;
use tokio_util::sync::CancellationToken;

use crate::{
    config, error, info,
    management::TokenManager,
    spotify::player,
    types::DeviceTableRow,
};

/// Lists the playback devices currently known to the user's account.
pub async fn devices() {
    let credentials = match config::Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load credentials: {}", e),
    };

    let mut manager = match TokenManager::load(credentials).await {
        Ok(m) => m,
        Err(e) => error!(
            "Failed to load token. Please run sporemote auth\n Error: {}",
            e
        ),
    };

    let cancel = CancellationToken::new();
    let token = match manager.ensure_valid(&cancel).await {
        Ok(t) => t,
        Err(e) => error!("Failed to refresh token: {}", e),
    };

    match player::get_devices(&token).await {
        Ok(devices) => {
            if devices.is_empty() {
                info!("No devices available");
                return;
            }

            let table_rows: Vec<DeviceTableRow> = devices
                .iter()
                .map(|d| DeviceTableRow {
                    name: d.name.clone(),
                    kind: d.kind.clone(),
                    active: d.is_active,
                    volume: match d.volume_percent {
                        Some(v) if d.supports_volume => format!("{v}%"),
                        _ => "-".to_string(),
                    },
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
        }
        Err(e) => error!("Failed to fetch devices: {}", e),
    }
}
