//! The financial report pipeline.
//!
//! Aggregates the `economico` and `patrimonial` sections of an intake
//! document into income/expense totals, balances, emergency-fund coverage,
//! net worth, protection and the patrimonial risk rating. Every
//! normalization applied to the input (derived monthly credit, zeroed
//! double-counted figures) is recorded as a human-readable note.

use serde_json::Value;

use crate::config::{weights, MONTHS_PER_YEAR};
use crate::format::{money_es, number_es, percent_es};
use crate::numeric::{field, truthy};
use crate::types::{
    FormattedReport, OperacionFinal, PerfilPatrimonial, RawFigures, Report, RiskLevel,
};

/// Fixed description line for the future-commitments row of the statement.
pub const FUTUROS_COMPROMISOS_DESC: &str =
    "Compromisos futuros anualizados según lo declarado";

/// Computes the full financial report for an intake document.
///
/// `datos_crudos` is the raw client document; only its `economico` and
/// `patrimonial` sections are read, and a missing or malformed section
/// behaves as empty. `flags` carries the anti-double-count switches:
///
/// - `credito_incluido_en_egresos`: the monthly credit payment is already
///   part of the declared expenses, so it is zeroed before the balances.
/// - `futuros_compromisos_incluido_en_egresos`: likewise for the annualized
///   future commitments.
///
/// The computation never fails; unreadable amounts count as zero.
pub fn compute_financials(datos_crudos: &Value, flags: &Value) -> Report {
    let mut notes: Vec<String> = Vec::new();

    let economico = section(datos_crudos, "economico");
    let patrimonial = section(datos_crudos, "patrimonial");

    // --- Inputs (economico) ---
    let ingresos_fijos = field(economico, &["ingresos_fijos"]);
    let ingresos_variables = field(economico, &["ingresos_variables"]);
    let prestaciones_fijas = field(economico, &["prestaciones_fijas"]);
    let prestaciones_variables = field(economico, &["prestaciones_variables"]);
    let egresos_fijos = field(economico, &["egresos_fijos"]);
    let egresos_variables = field(economico, &["egresos_variables"]);

    // credit / debt
    let mut credito_mensual = field(economico, &["credito_mensual", "pago_mensual_deuda"]);
    let credito_anual_in = field(economico, &["credito_anual"]);
    if credito_mensual == 0.0 && credito_anual_in != 0.0 {
        credito_mensual = credito_anual_in / MONTHS_PER_YEAR;
        notes.push("credito_mensual no venía; se derivó de credito_anual/12.".to_string());
    }

    if flag(flags, "credito_incluido_en_egresos") {
        if credito_mensual != 0.0 {
            notes.push(
                "credito_incluido_en_egresos=true: se forzó credito_mensual=0 \
                 para evitar doble conteo."
                    .to_string(),
            );
        }
        credito_mensual = 0.0;
    }

    // future commitments, normalized once: annual > monthly*12 > 0
    // `futuros_compromisos_anual` takes priority over the legacy
    // `futuros_compromisos_total_anual` key
    let mut futuros_total_anual = field(
        economico,
        &["futuros_compromisos_anual", "futuros_compromisos_total_anual"],
    );
    let futuros_mensual = field(economico, &["futuros_compromisos_mensual"]);

    if futuros_total_anual == 0.0 && futuros_mensual != 0.0 {
        futuros_total_anual = futuros_mensual * MONTHS_PER_YEAR;
    }
    if flag(flags, "futuros_compromisos_incluido_en_egresos") {
        if futuros_total_anual != 0.0 {
            notes.push(
                "futuros_compromisos_incluido_en_egresos=true: se forzó \
                 futuros_compromisos_total_anual=0 para evitar doble conteo."
                    .to_string(),
            );
        }
        futuros_total_anual = 0.0;
    }

    // --- Inputs (patrimonial) ---
    let activos_inmobiliarios = field(patrimonial, &["activos_inmobiliarios"]);
    let activos_desgaste_rapido = field(patrimonial, &["activos_desgaste_rapido"]);
    let inversiones = field(patrimonial, &["inversiones"]);
    let sociedades_y_acciones = field(patrimonial, &["sociedades_y_acciones"]);
    let mut fondo_emergencia = field(patrimonial, &["fondo_emergencia"]);
    if fondo_emergencia == 0.0 {
        fondo_emergencia = field(economico, &["fondo_emergencia"]);
    }

    let seguro_vida = field(patrimonial, &["seguro_vida"]);
    let valor_seguro_auto = field(patrimonial, &["valor_seguro_auto"]);
    let seguros_accidentes_personales = field(patrimonial, &["seguros_accidentes_personales"]);
    let seguro_inmuebles = field(patrimonial, &["seguro_inmuebles"]);
    let gastos_funeral = field(patrimonial, &["gastos_funeral"]);
    let plan_retiro_sa = field(patrimonial, &["plan_retiro_sa"]);
    let plan_ahorro_sa = field(patrimonial, &["plan_ahorro_sa"]);
    let persona_clave_sa = field(patrimonial, &["persona_clave_sa"]);
    let intersocios_sa = field(patrimonial, &["intersocios_sa"]);
    let suma_asegurada_gmm = field(patrimonial, &["suma_asegurada_gmm"]);

    // --- Incomes ---
    let ingresos_totales_mensuales = ingresos_fijos + ingresos_variables;
    let prestaciones_totales_mensuales = prestaciones_fijas + prestaciones_variables;
    let ingresos_globales_mensuales = ingresos_totales_mensuales + prestaciones_totales_mensuales;

    // --- Expenses ---
    let egresos_globales_mensuales = egresos_variables + egresos_fijos;

    // --- Emergency fund vs incomes ---
    let (porc_emergencia, meses_cubiertos) = if ingresos_totales_mensuales <= 0.0 {
        (0.0, 0.0)
    } else {
        (
            (fondo_emergencia / ingresos_totales_mensuales) * 100.0,
            fondo_emergencia / ingresos_totales_mensuales,
        )
    };

    // --- Credit ---
    let credito_anual = credito_mensual * MONTHS_PER_YEAR;

    // --- Balances ---
    let futuros_mensual_equiv = futuros_total_anual / MONTHS_PER_YEAR;
    let balance_mensual_operativo = ingresos_globales_mensuales - egresos_globales_mensuales;
    let balance_total_mensual = balance_mensual_operativo - credito_mensual;
    let balance_total_anual = balance_total_mensual * MONTHS_PER_YEAR;
    let balance_global = balance_total_mensual - futuros_mensual_equiv;

    // --- Patrimony and protection ---
    let patrimonio_total = activos_inmobiliarios
        + activos_desgaste_rapido
        + inversiones
        + sociedades_y_acciones
        + fondo_emergencia;

    let proteccion_total = seguro_vida
        + weights::AUTO_INSURANCE * valor_seguro_auto
        + seguros_accidentes_personales
        + seguro_inmuebles
        + gastos_funeral
        + plan_retiro_sa
        + plan_ahorro_sa
        + persona_clave_sa
        + intersocios_sa
        + weights::MAJOR_MEDICAL_SUM * suma_asegurada_gmm;

    let porc_cobertura = if patrimonio_total <= 0.0 {
        0.0
    } else {
        (proteccion_total / patrimonio_total) * 100.0
    };

    let riesgo_patrimonial_porcentaje = (100.0 - porc_cobertura).clamp(0.0, 100.0);
    let nivel_riesgo = RiskLevel::from_coverage(porc_cobertura);

    let formatted = FormattedReport {
        operacion_final: OperacionFinal {
            ingresos_mensuales_fijos: money_es(ingresos_fijos),
            ingresos_mensuales_variables: money_es(ingresos_variables),
            ingresos_totales: money_es(ingresos_totales_mensuales),
            prestaciones_totales: money_es(prestaciones_totales_mensuales),
            ingresos_globales: money_es(ingresos_globales_mensuales),
            egresos_globales: money_es(egresos_globales_mensuales),
            futuros_compromisos: FUTUROS_COMPROMISOS_DESC.to_string(),
            futuros_compromisos_total: format!("{} (anual)", money_es(futuros_total_anual)),
            credito_mensual: money_es(credito_mensual),
            credito_anual: money_es(credito_anual),
        },
        balance_total: money_es(balance_total_mensual),
        balance_global: money_es(balance_global),
        fondo_de_emergencia: format!(
            "{} ({} meses de ingresos equivalentes)",
            percent_es(porc_emergencia),
            number_es(meses_cubiertos, 2)
        ),
        operaciones_perfil_patrimonial: PerfilPatrimonial {
            patrimonio_total: money_es(patrimonio_total),
            proteccion_total: money_es(proteccion_total),
            nivel_riesgo_patrimonial: nivel_riesgo,
            riesgo_patrimonial_porcentaje: round2(riesgo_patrimonial_porcentaje),
            activos_desgaste_rapido: money_es(activos_desgaste_rapido),
            activos_inmobiliarios: money_es(activos_inmobiliarios),
            inversiones: money_es(inversiones),
            sociedades_y_acciones: money_es(sociedades_y_acciones),
        },
    };

    let raw = RawFigures {
        ingresos_fijos,
        ingresos_variables,
        prestaciones_fijas,
        prestaciones_variables,
        egresos_fijos,
        egresos_variables,
        ingresos_totales_mensuales,
        prestaciones_totales_mensuales,
        ingresos_globales_mensuales,
        egresos_globales_mensuales,
        credito_mensual,
        credito_anual,
        futuros_compromisos_total_anual: futuros_total_anual,
        balance_mensual_operativo,
        balance_total_mensual,
        balance_total_anual,
        balance_global,
        fondo_emergencia,
        porc_emergencia,
        meses_cubiertos,
        patrimonio_total,
        proteccion_total,
        porc_cobertura,
        riesgo_patrimonial_porcentaje,
        nivel_riesgo_patrimonial: nivel_riesgo,
    };

    Report {
        raw,
        formatted,
        notes,
    }
}

/// Looks up a top-level section; anything that is not a JSON object reads as
/// an empty one.
fn section<'a>(datos: &'a Value, key: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    match datos.get(key) {
        Some(v) if v.is_object() => v,
        _ => &NULL,
    }
}

fn flag(flags: &Value, key: &str) -> bool {
    flags.get(key).map(truthy).unwrap_or(false)
}

/// Rounds to 2 decimal places for display alongside formatted strings.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
