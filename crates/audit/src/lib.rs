//! `freightlens-audit`: freight invoice classification and cost-audit engine.
//!
//! Pure engine crate: receives raw charge lines, returns classified and
//! aggregated results. No CLI dependencies.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod decile;
pub mod derive;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod report;
pub mod stats;
pub mod summary;

pub use classify::classify;
pub use config::AuditConfig;
pub use engine::{distinct_charge_types, load_charge_lines, run};
pub use error::AuditError;
pub use model::{AuditResult, Category, ChargeLine};
