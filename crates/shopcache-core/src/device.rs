//! Simulated device information module.
//!
//! The real app reads this from a platform native module; the simulation
//! keeps the same fixed-shape record and the bridge round-trip delay. Only
//! these fields are ever read, so the payload is a closed struct rather
//! than a dynamic map.

use std::time::Duration;

/// Bridge round-trip delay the real native call exhibits
const SIMULATED_BRIDGE_DELAY_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub os_name: String,
    pub os_version: String,
    pub device_model: String,
    pub device_brand: String,
    pub is_emulator: bool,
}

pub struct SimulatedDeviceModule;

impl SimulatedDeviceModule {
    pub async fn os_info(&self) -> DeviceInfo {
        tokio::time::sleep(Duration::from_millis(SIMULATED_BRIDGE_DELAY_MS)).await;

        DeviceInfo {
            os_name: std::env::consts::OS.to_string(),
            os_version: "unknown".to_string(),
            device_model: "Simulated Device".to_string(),
            device_brand: "Simulated Brand".to_string(),
            is_emulator: true,
        }
    }
}
