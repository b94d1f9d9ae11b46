//! Stateless helper utilities used by the XLSX writer kernel.

use std::collections::BTreeSet;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{EnumCellValue, SpecSheetTable};

/// Replace Excel-illegal characters and truncate to the sheet-name limit.
///
/// An empty result collapses to a single replacement token so the workbook
/// never receives a blank name.
pub fn sanitize_sheet_name(name: &str, replacement: &str) -> String {
    let mut name_clean = name.to_string();
    for token in TUP_EXCEL_ILLEGAL {
        name_clean = name_clean.replace(token, replacement);
    }
    let name_clean: String = name_clean
        .chars()
        .take(N_LEN_EXCEL_SHEET_NAME_MAX)
        .collect();
    if name_clean.is_empty() {
        replacement.to_string()
    } else {
        name_clean
    }
}

/// Reject duplicate column names.
pub fn validate_unique_columns(l_colnames: &[String]) -> Result<(), String> {
    let mut set_seen = BTreeSet::new();
    for colname in l_colnames {
        if !set_seen.insert(colname.as_str()) {
            return Err(format!("Duplicate column name: {colname}"));
        }
    }
    Ok(())
}

/// Estimate displayed width units for a string, widening non-ASCII glyphs.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Estimate displayed width units for one cell value.
///
/// Used by column autofit inference.
pub fn estimate_cell_width(
    value: &EnumCellValue,
    if_is_integer_col: bool,
    if_is_decimal_col: bool,
) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::String(s) => estimate_unicode_string_width(s),
        EnumCellValue::Number(n) => {
            if if_is_integer_col {
                (*n as i64).to_string().len()
            } else if if_is_decimal_col {
                format!("{n:.2}").len()
            } else {
                estimate_unicode_string_width(&n.to_string())
            }
        }
    }
}

/// Classify table columns for number formatting.
///
/// A column is numeric when every non-blank body cell is a number; it is
/// integer when additionally every number is integral. Returns
/// `(if_numeric, if_integer)` flags per column.
pub fn derive_numeric_column_flags(table: &SpecSheetTable) -> Vec<(bool, bool)> {
    let mut l_flags = vec![(true, true); table.width()];
    for row in table.rows() {
        for (n_idx_col, value) in row.iter().enumerate() {
            match value {
                EnumCellValue::None => {}
                EnumCellValue::Number(n) => {
                    if n.fract() != 0.0 || !n.is_finite() {
                        l_flags[n_idx_col].1 = false;
                    }
                }
                EnumCellValue::String(_) => {
                    l_flags[n_idx_col] = (false, false);
                }
            }
        }
    }
    // A column with no numeric evidence stays a text column.
    for (n_idx_col, flags) in l_flags.iter_mut().enumerate() {
        let if_has_number = table
            .rows()
            .iter()
            .any(|row| matches!(row[n_idx_col], EnumCellValue::Number(_)));
        if !if_has_number {
            *flags = (false, false);
        }
    }
    l_flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name_replaces_illegal_and_truncates() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        let name_long = "x".repeat(40);
        assert_eq!(
            sanitize_sheet_name(&name_long, "_").chars().count(),
            N_LEN_EXCEL_SHEET_NAME_MAX
        );
        assert_eq!(sanitize_sheet_name("", "_"), "_");
    }

    #[test]
    fn test_validate_unique_columns_detects_duplicate() {
        let l_ok = vec!["Unvan".to_string(), "Sıklık".to_string()];
        assert!(validate_unique_columns(&l_ok).is_ok());

        let l_dup = vec!["A".to_string(), "A".to_string()];
        assert!(validate_unique_columns(&l_dup).is_err());
    }

    #[test]
    fn test_estimate_unicode_string_width_widens_non_ascii() {
        assert_eq!(estimate_unicode_string_width("abcd"), 4);
        // 4 ASCII chars + 2 non-ASCII at 1.6 units each.
        assert_eq!(estimate_unicode_string_width("Sıklık"), 4 + 3);
    }

    #[test]
    fn test_estimate_cell_width_formats_by_column_kind() {
        assert_eq!(
            estimate_cell_width(&EnumCellValue::Number(1234.0), true, false),
            4
        );
        assert_eq!(
            estimate_cell_width(&EnumCellValue::Number(1.5), false, true),
            4
        );
        assert_eq!(estimate_cell_width(&EnumCellValue::None, false, false), 0);
    }

    #[test]
    fn test_derive_numeric_column_flags_classifies_columns() {
        let table = SpecSheetTable::new(
            vec!["K".to_string(), "N".to_string(), "D".to_string()],
            vec![
                vec![
                    EnumCellValue::String("a".to_string()),
                    EnumCellValue::Number(3.0),
                    EnumCellValue::Number(1.5),
                ],
                vec![
                    EnumCellValue::String("b".to_string()),
                    EnumCellValue::Number(7.0),
                    EnumCellValue::Number(2.0),
                ],
            ],
        )
        .unwrap();

        let l_flags = derive_numeric_column_flags(&table);
        assert_eq!(l_flags[0], (false, false));
        assert_eq!(l_flags[1], (true, true));
        assert_eq!(l_flags[2], (true, false));
    }
}
