use serde::Deserialize;

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Audit run configuration. Every field has a default, so a run against a
/// bare CSV with the stock column names needs no config file at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub name: String,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub risk: RiskConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            name: "freight audit".into(),
            source: SourceConfig::default(),
            output: OutputConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

impl AuditConfig {
    pub fn from_toml(s: &str) -> Result<Self, AuditError> {
        toml::from_str(s).map_err(|e| AuditError::ConfigParse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Source + column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Input file; CLI arguments may override it.
    pub file: Option<String>,
    pub columns: ColumnMapping,
}

/// Header names in the source table. Defaults match the carrier invoice
/// export this tool was built around.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub shipment_id: String,
    pub charge_type: String,
    pub charge: String,
    pub carrier: String,
    pub zone: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            shipment_id: "Tracking Number".into(),
            charge_type: "Charge Type".into(),
            charge: "Charge".into(),
            carrier: "Carrier Name".into(),
            zone: "Zones".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub shipments_file: String,
    pub carriers_file: String,
    pub worst_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".into(),
            shipments_file: "shipment_level_data.csv".into(),
            carriers_file: "carrier_stats.csv".into(),
            worst_file: "worst_shipments_10pct.csv".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Worst-decile spend share above which the heavy-tail flag raises.
    pub heavy_tail_share_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self { heavy_tail_share_pct: 30.0 }
    }
}
