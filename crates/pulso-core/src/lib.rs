//! # Pulso Core
//!
//! Financial profile calculations for the Pulso Vital service.
//!
//! This crate turns a free-form client intake document (`datos_crudos`) into a
//! financial report: income and expense aggregates, operating balances,
//! emergency-fund coverage, net worth, insurance protection and a patrimonial
//! risk rating. Input values arrive as arbitrary JSON (numbers, or strings in
//! either Spanish `1.234.567,89` or English `1,234,567.89` notation, possibly
//! with currency symbols), so the crate ships a lenient numeric coercion layer
//! that never fails.
//!
//! ## Modules
//!
//! - **`numeric`**: coercion of arbitrary JSON values into `f64` amounts.
//! - **`format`**: Spanish-locale rendering of money, percentages and numbers.
//! - **`report`**: the calculation pipeline producing a [`Report`].
//! - **`config`**: centralized weights and risk thresholds.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pulso-core = "1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust
//! use pulso_core::compute_financials;
//! use serde_json::json;
//!
//! let datos = json!({
//!     "economico": { "ingresos_fijos": "25.000,00", "egresos_fijos": 18000 },
//!     "patrimonial": { "activos_inmobiliarios": 1_500_000 }
//! });
//!
//! let report = compute_financials(&datos, &json!({}));
//! assert_eq!(report.raw.ingresos_totales_mensuales, 25_000.0);
//! assert_eq!(report.formatted.operacion_final.ingresos_totales, "25.000,00");
//! ```

pub mod config;
pub mod format;
pub mod numeric;
pub mod report;
pub mod types;

// Re-export the main entry point and result types
pub use report::compute_financials;
pub use types::{
    FormattedReport, OperacionFinal, PerfilPatrimonial, RawFigures, Report, RiskLevel,
};
