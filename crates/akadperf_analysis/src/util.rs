//! Stateless helper functions shared by the analysis stages.

use polars::prelude::AnyValue;

/// Interpret one cell as a whole number.
///
/// Integer dtypes pass through, floats must be integral, strings must parse
/// as integers after trimming. Anything else (including missing cells) is
/// `None`; callers turn that into an invalid-value failure.
pub fn derive_i64_from_any_value(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::UInt8(val) => Some(i64::from(*val)),
        AnyValue::UInt16(val) => Some(i64::from(*val)),
        AnyValue::UInt32(val) => Some(i64::from(*val)),
        AnyValue::UInt64(val) => i64::try_from(*val).ok(),
        AnyValue::Int8(val) => Some(i64::from(*val)),
        AnyValue::Int16(val) => Some(i64::from(*val)),
        AnyValue::Int32(val) => Some(i64::from(*val)),
        AnyValue::Int64(val) => Some(*val),
        AnyValue::Int128(val) => i64::try_from(*val).ok(),
        AnyValue::Float32(val) => derive_i64_from_f64(f64::from(*val)),
        AnyValue::Float64(val) => derive_i64_from_f64(*val),
        AnyValue::String(val) => val.trim().parse::<i64>().ok(),
        AnyValue::StringOwned(val) => val.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn derive_i64_from_f64(val: f64) -> Option<i64> {
    if val.is_finite() && val.fract() == 0.0 {
        Some(val as i64)
    } else {
        None
    }
}

/// Extract a text cell value; numeric and missing cells yield `None`.
pub fn derive_str_from_any_value(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::String(val) => Some((*val).to_string()),
        AnyValue::StringOwned(val) => Some(val.to_string()),
        _ => None,
    }
}

/// Round to the nearest integer, ties to the even neighbor.
pub fn round_half_to_even(x: f64) -> f64 {
    let floor = x.floor();
    let frac = x - floor;
    if (frac - 0.5).abs() < f64::EPSILON {
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        x.round()
    }
}

/// Join labels as `'A', 'B' veya 'C'` for user-facing messages.
pub fn join_quoted_with_or(l_labels: &[String]) -> String {
    match l_labels.len() {
        0 => String::new(),
        1 => format!("'{}'", l_labels[0]),
        _ => {
            let l_head: Vec<String> = l_labels[..l_labels.len() - 1]
                .iter()
                .map(|label| format!("'{label}'"))
                .collect();
            format!(
                "{} veya '{}'",
                l_head.join(", "),
                l_labels[l_labels.len() - 1]
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_i64_accepts_integral_values_only() {
        assert_eq!(derive_i64_from_any_value(&AnyValue::Int64(7)), Some(7));
        assert_eq!(derive_i64_from_any_value(&AnyValue::UInt32(0)), Some(0));
        assert_eq!(
            derive_i64_from_any_value(&AnyValue::Float64(4.0)),
            Some(4)
        );
        assert_eq!(derive_i64_from_any_value(&AnyValue::Float64(2.5)), None);
        assert_eq!(derive_i64_from_any_value(&AnyValue::String(" 12 ")), Some(12));
        assert_eq!(derive_i64_from_any_value(&AnyValue::String("abc")), None);
        assert_eq!(derive_i64_from_any_value(&AnyValue::Null), None);
    }

    #[test]
    fn test_round_half_to_even_breaks_ties_to_even() {
        assert_eq!(round_half_to_even(0.5), 0.0);
        assert_eq!(round_half_to_even(1.5), 2.0);
        assert_eq!(round_half_to_even(2.5), 2.0);
        assert_eq!(round_half_to_even(33.4), 33.0);
        assert_eq!(round_half_to_even(66.6), 67.0);
    }

    #[test]
    fn test_join_quoted_with_or_formats_turkish_list() {
        let l_titles = vec![
            "Prof. Dr.".to_string(),
            "Doç. Dr.".to_string(),
            "Dr. Öğr. Üyesi".to_string(),
        ];
        assert_eq!(
            join_quoted_with_or(&l_titles),
            "'Prof. Dr.', 'Doç. Dr.' veya 'Dr. Öğr. Üyesi'"
        );
        assert_eq!(
            join_quoted_with_or(&["Prof. Dr.".to_string()]),
            "'Prof. Dr.'"
        );
    }
}
