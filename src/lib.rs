use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Process constants shared by both formula families.
pub mod factors {
    /// Yield factor applied to the quantity in fixed mode.
    pub const FIXED_EFFICIENCY: f64 = 0.95;
    /// Base dye proportion used by formula A.
    pub const DYE_FACTOR: f64 = 2.35;
}

/// Which formula family a group uses.
///
/// `A` mixes `additional_water` into the numerator; `B` divides
/// `min_water` by the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcType {
    A,
    B,
}

/// One production group as delivered by the configuration document.
///
/// Wire format is camelCase JSON; numeric fields missing from the
/// document default to zero. Definitions are fetched once per session
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDefinition {
    pub group: String,
    #[serde(default)]
    pub description: String,
    pub calc_type: CalcType,
    #[serde(default)]
    pub additional_water: f64,
    #[serde(default)]
    pub min_water: f64,
    #[serde(default)]
    pub min_water_ratio: f64,
}

/// Process mode selecting the formula variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Fixed,
    NonFixed,
}

// Rejected quantity input. Never surfaced to the user; the caller
// leaves the result field empty instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    Empty,
    NotANumber,
    NotPositive,
}

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityError::Empty => write!(f, "Quantity is empty"),
            QuantityError::NotANumber => write!(f, "Quantity must be a whole number"),
            QuantityError::NotPositive => write!(f, "Quantity must be greater than zero"),
        }
    }
}

impl std::error::Error for QuantityError {}

/// Parse a raw quantity string into a positive integer.
///
/// Leading/trailing whitespace is ignored. Zero, negative and
/// non-numeric input are rejected with a typed error so callers can
/// distinguish "field is empty" from "field holds garbage".
pub fn parse_quantity(input: &str) -> Result<u32, QuantityError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }
    // A leading minus is a parse failure for u32, so negatives fold
    // into NotANumber; only an explicit zero reaches NotPositive.
    let value: u32 = trimmed.parse().map_err(|_| QuantityError::NotANumber)?;
    if value == 0 {
        return Err(QuantityError::NotPositive);
    }
    Ok(value)
}

/// Round to one decimal place, half away from zero at the tenths digit.
#[inline]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute the dye-to-water ratio for one group.
///
/// Pure: the caller is responsible for writing the formatted value into
/// the matching result field. The raw ratio is rounded to one decimal
/// and then floored at the group's `min_water_ratio`.
pub fn water_ratio(def: &GroupDefinition, quantity: u32, mode: Mode) -> f64 {
    let q = quantity as f64;
    let raw = match (def.calc_type, mode) {
        (CalcType::A, Mode::Fixed) => {
            let effective = q * factors::FIXED_EFFICIENCY;
            (effective * factors::DYE_FACTOR + def.additional_water) / effective
        }
        (CalcType::A, Mode::NonFixed) => (q * factors::DYE_FACTOR + def.additional_water) / q,
        (CalcType::B, Mode::Fixed) => def.min_water / (q * factors::FIXED_EFFICIENCY) - 1.0,
        (CalcType::B, Mode::NonFixed) => def.min_water / q - 1.0,
    };

    let rounded = round_to_tenth(raw);
    let clamped = rounded.max(def.min_water_ratio);
    debug!(
        "group {}: q={} mode={:?} raw={:.4} -> {:.1}",
        def.group, quantity, mode, raw, clamped
    );
    clamped
}

/// Format a ratio for display with exactly one decimal digit.
#[inline]
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.1}", ratio)
}

/// Formatted ratio for one group and one raw quantity string, or `None`
/// when the quantity does not validate.
pub fn result_for(def: &GroupDefinition, raw_quantity: &str, mode: Mode) -> Option<String> {
    let quantity = parse_quantity(raw_quantity).ok()?;
    Some(format_ratio(water_ratio(def, quantity, mode)))
}

/// Project the full result column from session state.
///
/// The quantity map is the single source of truth; this is a pure
/// function of (definitions, quantities, mode). Groups whose quantity
/// is absent, empty or invalid get no entry. Quantity keys with no
/// matching definition are skipped.
pub fn recompute_all(
    defs: &[GroupDefinition],
    quantities: &HashMap<String, String>,
    mode: Mode,
) -> HashMap<String, String> {
    let mut results = HashMap::with_capacity(defs.len());
    for def in defs {
        let Some(raw) = quantities.get(&def.group) else {
            continue;
        };
        if let Some(formatted) = result_for(def, raw, mode) {
            results.insert(def.group.clone(), formatted);
        }
    }
    debug!(
        "recomputed {} of {} groups ({:?} mode)",
        results.len(),
        defs.len(),
        mode
    );
    results
}

/// Parse the configuration document body into group definitions.
pub fn parse_group_definitions(body: &str) -> Result<Vec<GroupDefinition>, serde_json::Error> {
    let defs: Vec<GroupDefinition> = serde_json::from_str(body)?;
    info!("loaded {} group definitions", defs.len());
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_a(additional_water: f64, min_water_ratio: f64) -> GroupDefinition {
        GroupDefinition {
            group: "X".into(),
            description: "reactive dark".into(),
            calc_type: CalcType::A,
            additional_water,
            min_water: 0.0,
            min_water_ratio,
        }
    }

    fn type_b(min_water: f64, min_water_ratio: f64) -> GroupDefinition {
        GroupDefinition {
            group: "Y".into(),
            description: "light shades".into(),
            calc_type: CalcType::B,
            additional_water: 0.0,
            min_water,
            min_water_ratio,
        }
    }

    #[test]
    fn type_a_fixed_worked_example() {
        // numerator 100*0.95*2.35 + 10 = 233.25, denominator 95
        let def = type_a(10.0, 2.0);
        assert_eq!(result_for(&def, "100", Mode::Fixed), Some("2.5".into()));
    }

    #[test]
    fn type_a_non_fixed_drops_efficiency_factor() {
        // (100*2.35 + 10) / 100 = 2.45 -> 2.5 after rounding
        let def = type_a(10.0, 0.0);
        assert_eq!(format_ratio(water_ratio(&def, 100, Mode::NonFixed)), "2.5");
        // with no extra water the ratio is the dye factor, 2.35 -> 2.4
        let plain = type_a(0.0, 0.0);
        assert_eq!(
            format_ratio(water_ratio(&plain, 100, Mode::NonFixed)),
            "2.4"
        );
    }

    #[test]
    fn type_b_non_fixed_worked_example() {
        // 500/50 - 1 = 9.0
        let def = type_b(500.0, 1.0);
        assert_eq!(result_for(&def, "50", Mode::NonFixed), Some("9.0".into()));
    }

    #[test]
    fn type_b_fixed_divides_effective_quantity() {
        // 500 / (50*0.95) - 1 = 9.526... -> 9.5
        let def = type_b(500.0, 1.0);
        assert_eq!(format_ratio(water_ratio(&def, 50, Mode::Fixed)), "9.5");
    }

    #[test]
    fn ratio_is_clamped_to_group_minimum() {
        // 500/400 - 1 = 0.25 -> 0.3, clamped up to 3.0
        let def = type_b(500.0, 3.0);
        assert_eq!(result_for(&def, "400", Mode::NonFixed), Some("3.0".into()));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_tenth(2.45), 2.5);
        assert_eq!(round_to_tenth(2.4499), 2.4);
        assert_eq!(round_to_tenth(-0.25), -0.3);
        // B formula can go negative before the clamp kicks in
        let def = type_b(10.0, -5.0);
        assert_eq!(format_ratio(water_ratio(&def, 40, Mode::NonFixed)), "-0.8");
    }

    #[test]
    fn recompute_is_idempotent() {
        let def = type_a(10.0, 2.0);
        let first = result_for(&def, "100", Mode::Fixed);
        let second = result_for(&def, "100", Mode::Fixed);
        assert_eq!(first, second);
    }

    #[test]
    fn quantity_validation() {
        assert_eq!(parse_quantity("100"), Ok(100));
        assert_eq!(parse_quantity("  7 "), Ok(7));
        assert_eq!(parse_quantity(""), Err(QuantityError::Empty));
        assert_eq!(parse_quantity("   "), Err(QuantityError::Empty));
        assert_eq!(parse_quantity("0"), Err(QuantityError::NotPositive));
        assert_eq!(parse_quantity("-5"), Err(QuantityError::NotANumber));
        assert_eq!(parse_quantity("3.5"), Err(QuantityError::NotANumber));
        assert_eq!(parse_quantity("abc"), Err(QuantityError::NotANumber));
    }

    #[test]
    fn invalid_quantity_yields_no_result() {
        let def = type_a(10.0, 2.0);
        assert_eq!(result_for(&def, "", Mode::Fixed), None);
        assert_eq!(result_for(&def, "0", Mode::Fixed), None);
        assert_eq!(result_for(&def, "ten", Mode::Fixed), None);
    }

    #[test]
    fn recompute_all_skips_empty_and_unknown_groups() {
        let defs = vec![type_a(10.0, 2.0), type_b(500.0, 1.0)];
        let mut quantities = HashMap::new();
        quantities.insert("X".to_string(), "100".to_string());
        quantities.insert("Y".to_string(), "".to_string());
        quantities.insert("ghost".to_string(), "42".to_string());

        let results = recompute_all(&defs, &quantities, Mode::Fixed);
        assert_eq!(results.get("X"), Some(&"2.5".to_string()));
        assert_eq!(results.get("Y"), None);
        assert_eq!(results.get("ghost"), None);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn mode_toggle_recomputes_filled_groups_only() {
        let defs = vec![type_b(500.0, 1.0), type_a(10.0, 2.0)];
        let mut quantities = HashMap::new();
        quantities.insert("Y".to_string(), "50".to_string());

        let non_fixed = recompute_all(&defs, &quantities, Mode::NonFixed);
        assert_eq!(non_fixed.get("Y"), Some(&"9.0".to_string()));
        assert_eq!(non_fixed.get("X"), None);

        // 500 / (50*0.95) - 1 = 9.526... -> 9.5
        let fixed = recompute_all(&defs, &quantities, Mode::Fixed);
        assert_eq!(fixed.get("Y"), Some(&"9.5".to_string()));
        assert_eq!(fixed.get("X"), None);
    }

    #[test]
    fn clearing_quantities_clears_every_result() {
        let defs = vec![type_a(10.0, 2.0), type_b(500.0, 1.0)];
        let results = recompute_all(&defs, &HashMap::new(), Mode::Fixed);
        assert!(results.is_empty());
    }

    #[test]
    fn config_document_round_trip() {
        let body = r#"[
            {"group": "X", "description": "reactive dark", "calcType": "A",
             "additionalWater": 10, "minWaterRatio": 2.0},
            {"group": "Y", "description": "light shades", "calcType": "B",
             "minWater": 500, "minWaterRatio": 1.0, "extra": "ignored"}
        ]"#;
        let defs = parse_group_definitions(body).expect("valid document");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].calc_type, CalcType::A);
        assert_eq!(defs[0].additional_water, 10.0);
        // minWater absent for X, defaults to zero
        assert_eq!(defs[0].min_water, 0.0);
        assert_eq!(defs[1].calc_type, CalcType::B);
        assert_eq!(defs[1].min_water, 500.0);
    }

    #[test]
    fn malformed_config_document_is_an_error() {
        assert!(parse_group_definitions("not json").is_err());
        assert!(parse_group_definitions(r#"[{"group": "X"}]"#).is_err());
    }
}
