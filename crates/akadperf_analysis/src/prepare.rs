//! Data preparer: derived quartile-sum columns.

use polars::prelude::{DataFrame, NamedFrom, PolarsError, Series};

use crate::spec::{ReportRunError, SpecAnalysisConfig};
use crate::util::derive_i64_from_any_value;

/// Append the two derived quartile-sum columns to the filtered dataset.
///
/// Each derived cell is the exact row-wise sum of its four source columns.
/// Numeric interpretation is strict and identical for both column groups:
/// a cell that is not a whole number (including a blank cell) fails with
/// `InvalidNumericValue`. Existing rows and columns are left untouched and
/// the row count is preserved.
pub fn prepare_dataset(
    df: DataFrame,
    cfg: &SpecAnalysisConfig,
) -> Result<DataFrame, ReportRunError> {
    let mut df = df;
    let v_sums_wos = derive_row_sums(&df, &cfg.l_colnames_wos_q)?;
    let v_sums_scopus = derive_row_sums(&df, &cfg.l_colnames_scopus_q)?;

    df.with_column(Series::new(
        cfg.colname_wos_q_total.as_str().into(),
        v_sums_wos,
    ))
    .map_err(derive_unexpected)?;
    df.with_column(Series::new(
        cfg.colname_scopus_q_total.as_str().into(),
        v_sums_scopus,
    ))
    .map_err(derive_unexpected)?;

    Ok(df)
}

fn derive_row_sums(
    df: &DataFrame,
    l_colnames: &[String],
) -> Result<Vec<i64>, ReportRunError> {
    let mut v_sums = vec![0i64; df.height()];
    for colname in l_colnames {
        let col = df.column(colname).map_err(derive_unexpected)?;
        for (n_idx_row, n_sum) in v_sums.iter_mut().enumerate() {
            let value = col.get(n_idx_row).map_err(derive_unexpected)?;
            let n_value = derive_i64_from_any_value(&value).ok_or_else(|| {
                ReportRunError::InvalidNumericValue {
                    colname: colname.clone(),
                    n_idx_row,
                }
            })?;
            *n_sum = n_sum.saturating_add(n_value);
        }
    }
    Ok(v_sums)
}

fn derive_unexpected(err: PolarsError) -> ReportRunError {
    ReportRunError::Unexpected(err.to_string())
}
