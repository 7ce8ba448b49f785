//! Host telemetry snapshot shapes.

use serde::{Deserialize, Serialize};

/// Latest-known host resource metrics.
///
/// Each `system_info` frame replaces the previous snapshot wholesale; no
/// history is kept on the client. Sections default individually so a server
/// that omits one (e.g. no disk probe) still produces a usable snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub cpu: CpuInfo,
    #[serde(default)]
    pub memory: MemoryInfo,
    #[serde(default)]
    pub disk: DiskInfo,
    #[serde(default)]
    pub network: NetworkInfo,
}

/// Processor usage and core count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Usage as a percentage, 0.0 to 100.0.
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub cores: u32,
}

/// Memory totals in bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryInfo {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub free: u64,
}

/// Disk totals in bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiskInfo {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub free: u64,
}

/// Cumulative network byte counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkInfo {
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub received: u64,
}
