//! Result types produced by the calculation pipeline.
//!
//! Field names follow the wire format consumed by the advisory front end,
//! which is Spanish throughout; the serialized shape of [`Report`] is part of
//! the public API and must stay stable.

use serde::{Deserialize, Serialize};

use crate::config::risk;

/// Patrimonial risk rating derived from the protection/patrimony coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Coverage at or below 45%.
    #[serde(rename = "Alto")]
    High,
    /// Coverage above 45% and at or below 80%.
    #[serde(rename = "Moderado")]
    Moderate,
    /// Coverage above 80%.
    #[serde(rename = "Bajo")]
    Low,
}

impl RiskLevel {
    /// Rates a coverage percentage against the configured crossovers.
    pub fn from_coverage(coverage_pct: f64) -> Self {
        if coverage_pct <= risk::HIGH_RISK_COVERAGE_MAX {
            RiskLevel::High
        } else if coverage_pct <= risk::MODERATE_RISK_COVERAGE_MAX {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::High => write!(f, "Alto"),
            RiskLevel::Moderate => write!(f, "Moderado"),
            RiskLevel::Low => write!(f, "Bajo"),
        }
    }
}

/// Complete output of [`crate::compute_financials`].
///
/// `raw` carries the plain numbers for downstream computation, `formatted`
/// carries the locale-rendered strings painted directly into the client
/// document, and `notes` records every normalization applied to the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub raw: RawFigures,
    pub formatted: FormattedReport,
    pub notes: Vec<String>,
}

/// Unformatted numeric results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFigures {
    pub ingresos_fijos: f64,
    pub ingresos_variables: f64,
    pub prestaciones_fijas: f64,
    pub prestaciones_variables: f64,
    pub egresos_fijos: f64,
    pub egresos_variables: f64,
    pub ingresos_totales_mensuales: f64,
    pub prestaciones_totales_mensuales: f64,
    pub ingresos_globales_mensuales: f64,
    pub egresos_globales_mensuales: f64,
    pub credito_mensual: f64,
    pub credito_anual: f64,
    pub futuros_compromisos_total_anual: f64,
    pub balance_mensual_operativo: f64,
    pub balance_total_mensual: f64,
    pub balance_total_anual: f64,
    pub balance_global: f64,
    pub fondo_emergencia: f64,
    pub porc_emergencia: f64,
    pub meses_cubiertos: f64,
    pub patrimonio_total: f64,
    pub proteccion_total: f64,
    pub porc_cobertura: f64,
    pub riesgo_patrimonial_porcentaje: f64,
    pub nivel_riesgo_patrimonial: RiskLevel,
}

/// Locale-formatted strings, nested the way the client document expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedReport {
    pub operacion_final: OperacionFinal,
    pub balance_total: String,
    pub balance_global: String,
    pub fondo_de_emergencia: String,
    pub operaciones_perfil_patrimonial: PerfilPatrimonial,
}

/// Monthly operating figures of the final statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperacionFinal {
    pub ingresos_mensuales_fijos: String,
    pub ingresos_mensuales_variables: String,
    pub ingresos_totales: String,
    pub prestaciones_totales: String,
    pub ingresos_globales: String,
    pub egresos_globales: String,
    pub futuros_compromisos: String,
    pub futuros_compromisos_total: String,
    pub credito_mensual: String,
    pub credito_anual: String,
}

/// Net worth and insurance protection summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfilPatrimonial {
    pub patrimonio_total: String,
    pub proteccion_total: String,
    pub nivel_riesgo_patrimonial: RiskLevel,
    pub riesgo_patrimonial_porcentaje: f64,
    pub activos_desgaste_rapido: String,
    pub activos_inmobiliarios: String,
    pub inversiones: String,
    pub sociedades_y_acciones: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_crossovers() {
        assert_eq!(RiskLevel::from_coverage(0.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_coverage(45.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_coverage(45.01), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_coverage(80.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_coverage(80.01), RiskLevel::Low);
        assert_eq!(RiskLevel::from_coverage(150.0), RiskLevel::Low);
    }

    #[test]
    fn risk_level_serializes_in_spanish() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Moderate).unwrap(),
            "\"Moderado\""
        );
        assert_eq!(RiskLevel::High.to_string(), "Alto");
    }
}
