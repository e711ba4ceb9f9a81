//! Configuration constants and tuning parameters for the report calculations.
//!
//! This module centralizes the weighting factors and rating thresholds so the
//! calculation pipeline and its tests share a single source of truth.

/// Months-per-year factor used for every monthly/annual conversion.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Weighting factors applied when aggregating insurance protection.
pub mod weights {
    /// Fraction of the insured vehicle value that counts as protection.
    ///
    /// Vehicle policies cover replacement value, not net loss, so only a
    /// portion of the insured sum is credited against the patrimony.
    pub const AUTO_INSURANCE: f64 = 0.60;

    /// Fraction of the major-medical (GMM) insured sum that counts as
    /// protection.
    ///
    /// GMM sums are event ceilings rather than payable capital, hence the
    /// small factor.
    pub const MAJOR_MEDICAL_SUM: f64 = 0.02;
}

/// Coverage thresholds for the patrimonial risk rating.
///
/// Coverage is the protection/patrimony ratio expressed as a percentage.
pub mod risk {
    /// Coverage at or below this percentage rates as high risk ("Alto").
    pub const HIGH_RISK_COVERAGE_MAX: f64 = 45.0;

    /// Coverage at or below this percentage (and above
    /// [`HIGH_RISK_COVERAGE_MAX`]) rates as moderate risk ("Moderado").
    /// Anything higher rates as low risk ("Bajo").
    pub const MODERATE_RISK_COVERAGE_MAX: f64 = 80.0;
}
