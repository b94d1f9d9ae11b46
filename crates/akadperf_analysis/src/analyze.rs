//! Aggregation engine: grouped counts, shares, and zero-publication
//! cross-tabulations over the prepared dataset.

use std::collections::BTreeMap;

use akadperf_io_xlsx::{
    CELL_CHART_ANCHOR_DEFAULT, EnumCellValue, EnumChartKind, SpecChartSpec, SpecSheetTable,
};
use polars::prelude::{Column, DataFrame, PolarsError};

use crate::conf::{
    CHART_AXIS_TITLE_STAFF_COUNT, CHART_TITLE_TITLE_DISTRIBUTION, COLNAME_FREQUENCY,
    COLNAME_PERCENT, COLNAME_TOTAL_STAFF, derive_zero_count_chart_title,
};
use crate::spec::{ReportRunError, SpecAnalysisConfig, SpecZeroCountView};
use crate::util::{derive_i64_from_any_value, derive_str_from_any_value, round_half_to_even};

/// Title distribution view: per-category row count and whole-percent share.
///
/// Ordering is frequency-descending; ties keep the order categories first
/// appear in the input (stable sort). Percentages use round-half-to-even.
pub fn derive_title_distribution(
    df_prepared: &DataFrame,
    cfg: &SpecAnalysisConfig,
) -> Result<SpecSheetTable, ReportRunError> {
    let col_title = df_prepared
        .column(&cfg.colname_title)
        .map_err(derive_unexpected)?;
    let l_counts = derive_value_counts(col_title)?;
    let n_total: usize = l_counts.iter().map(|(_, n)| n).sum();

    let l_rows = l_counts
        .iter()
        .map(|(title, n_count)| {
            let pct = round_half_to_even(*n_count as f64 / n_total as f64 * 100.0);
            vec![
                EnumCellValue::String(title.clone()),
                EnumCellValue::Number(*n_count as f64),
                EnumCellValue::Number(pct),
            ]
        })
        .collect();

    SpecSheetTable::new(
        vec![
            cfg.colname_title.clone(),
            COLNAME_FREQUENCY.to_string(),
            COLNAME_PERCENT.to_string(),
        ],
        l_rows,
    )
    .map_err(ReportRunError::Unexpected)
}

/// Pie chart descriptor for the title distribution table.
pub fn derive_distribution_chart_spec() -> SpecChartSpec {
    SpecChartSpec {
        kind: EnumChartKind::Pie,
        title: CHART_TITLE_TITLE_DISTRIBUTION.to_string(),
        title_axis_x: None,
        title_axis_y: None,
        col_idx_categories: 0,
        l_cols_idx_values: vec![1],
        cell_anchor: CELL_CHART_ANCHOR_DEFAULT,
        if_show_values: true,
    }
}

/// One focused-mode view: per-category staff total paired with the count of
/// staff whose metric is exactly zero.
///
/// Category order equals the distribution order; categories with no
/// zero-metric members are filled with 0. Metric cells follow the same
/// strict whole-number rule as the preparer.
pub fn derive_zero_count_table(
    df_prepared: &DataFrame,
    view: &SpecZeroCountView,
    cfg: &SpecAnalysisConfig,
) -> Result<SpecSheetTable, ReportRunError> {
    let col_title = df_prepared
        .column(&cfg.colname_title)
        .map_err(derive_unexpected)?;
    let col_metric = df_prepared
        .column(&view.colname_metric)
        .map_err(derive_unexpected)?;
    let l_counts_total = derive_value_counts(col_title)?;

    let mut dict_zero_by_title: BTreeMap<String, usize> = BTreeMap::new();
    for n_idx_row in 0..df_prepared.height() {
        let value_metric = col_metric.get(n_idx_row).map_err(derive_unexpected)?;
        let n_metric = derive_i64_from_any_value(&value_metric).ok_or_else(|| {
            ReportRunError::InvalidNumericValue {
                colname: view.colname_metric.clone(),
                n_idx_row,
            }
        })?;
        if n_metric != 0 {
            continue;
        }
        let value_title = col_title.get(n_idx_row).map_err(derive_unexpected)?;
        if let Some(title) = derive_str_from_any_value(&value_title) {
            *dict_zero_by_title.entry(title).or_insert(0) += 1;
        }
    }

    let l_rows = l_counts_total
        .iter()
        .map(|(title, n_total)| {
            let n_zero = dict_zero_by_title.get(title).copied().unwrap_or(0);
            vec![
                EnumCellValue::String(title.clone()),
                EnumCellValue::Number(*n_total as f64),
                EnumCellValue::Number(n_zero as f64),
            ]
        })
        .collect();

    SpecSheetTable::new(
        vec![
            cfg.colname_title.clone(),
            COLNAME_TOTAL_STAFF.to_string(),
            view.colname_zero_count.clone(),
        ],
        l_rows,
    )
    .map_err(ReportRunError::Unexpected)
}

/// Bar chart descriptor for one zero-count table.
pub fn derive_zero_count_chart_spec(
    view: &SpecZeroCountView,
    cfg: &SpecAnalysisConfig,
) -> SpecChartSpec {
    SpecChartSpec {
        kind: EnumChartKind::Column,
        title: derive_zero_count_chart_title(&view.name_metric),
        title_axis_x: Some(cfg.colname_title.clone()),
        title_axis_y: Some(CHART_AXIS_TITLE_STAFF_COUNT.to_string()),
        col_idx_categories: 0,
        l_cols_idx_values: vec![1, 2],
        cell_anchor: CELL_CHART_ANCHOR_DEFAULT,
        if_show_values: true,
    }
}

/// Count occurrences of each text value in first-appearance order, then sort
/// frequency-descending. The sort is stable, so ties keep appearance order.
fn derive_value_counts(col: &Column) -> Result<Vec<(String, usize)>, ReportRunError> {
    let mut l_counts: Vec<(String, usize)> = Vec::new();
    for n_idx_row in 0..col.len() {
        let value = col.get(n_idx_row).map_err(derive_unexpected)?;
        let Some(key) = derive_str_from_any_value(&value) else {
            continue;
        };
        match l_counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n_count)) => *n_count += 1,
            None => l_counts.push((key, 1)),
        }
    }
    l_counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(l_counts)
}

fn derive_unexpected(err: PolarsError) -> ReportRunError {
    ReportRunError::Unexpected(err.to_string())
}
