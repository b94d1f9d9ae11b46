//! Schema validator: title filtering and required-column checks.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PlSmallStr, PolarsError};

use crate::spec::{ReportRunError, SpecAnalysisConfig};
use crate::util::derive_str_from_any_value;

/// Validate the raw dataset and return it filtered to recognized titles.
///
/// Rows outside the recognized title set are silently dropped. Check order
/// follows the upstream behavior: filter first, then the required-column
/// check on the surviving rows; the one exception is an absent category
/// column, which is reported as missing columns instead of an opaque
/// failure. Rows are never mutated here.
pub fn check_and_filter_dataset(
    df: &DataFrame,
    cfg: &SpecAnalysisConfig,
) -> Result<DataFrame, ReportRunError> {
    let l_colnames: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    if !l_colnames.contains(&cfg.colname_title) {
        return Err(ReportRunError::MissingColumns(derive_missing_columns(
            &l_colnames,
            cfg,
        )));
    }

    let col_title = df.column(&cfg.colname_title).map_err(derive_unexpected)?;
    let mut v_mask = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let value = col_title.get(n_idx_row).map_err(derive_unexpected)?;
        let if_recognized = derive_str_from_any_value(&value)
            .map(|title| cfg.l_titles_target.iter().any(|target| *target == title))
            .unwrap_or(false);
        v_mask.push(if_recognized);
    }

    let mask = BooleanChunked::from_slice(PlSmallStr::EMPTY, &v_mask);
    let df_filtered = df.filter(&mask).map_err(derive_unexpected)?;
    if df_filtered.height() == 0 {
        return Err(ReportRunError::NoRecognizedRecords {
            l_titles: cfg.l_titles_target.clone(),
        });
    }

    let l_missing = derive_missing_columns(&l_colnames, cfg);
    if !l_missing.is_empty() {
        return Err(ReportRunError::MissingColumns(l_missing));
    }

    Ok(df_filtered)
}

/// Required columns absent from the dataset, in declared order.
fn derive_missing_columns(l_colnames: &[String], cfg: &SpecAnalysisConfig) -> Vec<String> {
    cfg.derive_required_columns()
        .into_iter()
        .filter(|colname| !l_colnames.contains(colname))
        .collect()
}

fn derive_unexpected(err: PolarsError) -> ReportRunError {
    ReportRunError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::derive_default_analysis_config;
    use polars::prelude::*;

    fn derive_df_roster() -> DataFrame {
        df!(
            "Unvan" => ["Prof. Dr.", "Prof. Dr.", "Doç. Dr.", "Dr. Öğr. Üyesi", "Arş. Gör."],
            "Toplam Yayın" => [5i64, 0, 3, 0, 9],
            "Ad Soyad" => ["Ayşe Kaya", "Ali Demir", "Ece Yılmaz", "Ozan Arslan", "Derya Çelik"],
            "WoS Q1 Makale Sayısı" => [1i64, 0, 1, 0, 2],
            "WoS Q2 Makale Sayısı" => [2i64, 0, 0, 0, 1],
            "WoS Q3 Makale Sayısı" => [0i64, 0, 1, 0, 3],
            "WoS Q4 Makale Sayısı" => [1i64, 0, 0, 0, 0],
            "Scopus Q1 Yayın Sayısı" => [0i64, 0, 1, 0, 1],
            "Scopus Q2 Yayın Sayısı" => [1i64, 0, 0, 0, 2],
            "Scopus Q3 Yayın Sayısı" => [0i64, 0, 0, 0, 0],
            "Scopus Q4 Yayın Sayısı" => [0i64, 0, 1, 0, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_filter_drops_unrecognized_titles_without_error() {
        let cfg = derive_default_analysis_config();
        let df_filtered = check_and_filter_dataset(&derive_df_roster(), &cfg).unwrap();
        assert_eq!(df_filtered.height(), 4);
        assert_eq!(df_filtered.width(), 11);
    }

    #[test]
    fn test_zero_recognized_rows_fail_with_no_recognized_records() {
        let cfg = derive_default_analysis_config();
        let mut df = derive_df_roster();
        let col_titles = Series::new(
            "Unvan".into(),
            ["Arş. Gör.", "Okutman", "Arş. Gör.", "Okutman", "Arş. Gör."],
        );
        df.replace("Unvan", col_titles).unwrap();

        let err = check_and_filter_dataset(&df, &cfg).unwrap_err();
        assert!(matches!(err, ReportRunError::NoRecognizedRecords { .. }));
        assert!(err.to_string().contains("'Prof. Dr.'"));
    }

    #[test]
    fn test_missing_columns_are_listed_in_declared_order() {
        let cfg = derive_default_analysis_config();
        let df = derive_df_roster()
            .drop("Scopus Q2 Yayın Sayısı")
            .unwrap()
            .drop("Ad Soyad")
            .unwrap();

        let err = check_and_filter_dataset(&df, &cfg).unwrap_err();
        assert_eq!(
            err,
            ReportRunError::MissingColumns(vec![
                "Ad Soyad".to_string(),
                "Scopus Q2 Yayın Sayısı".to_string(),
            ])
        );
    }

    #[test]
    fn test_absent_category_column_reports_missing_columns() {
        let cfg = derive_default_analysis_config();
        let df = derive_df_roster().drop("Unvan").unwrap();

        let err = check_and_filter_dataset(&df, &cfg).unwrap_err();
        match err {
            ReportRunError::MissingColumns(l_missing) => {
                assert_eq!(l_missing, vec!["Unvan".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }
}
