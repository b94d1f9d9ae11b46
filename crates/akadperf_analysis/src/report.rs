//! Report orchestrator: validate, prepare, aggregate, and emit one workbook.

use std::io::Cursor;

use akadperf_io_xlsx::{
    XlsxWriter, derive_default_autofit_policy, derive_default_xlsx_formats,
};
use polars::prelude::{DataFrame, IpcReader, SerReader};

use crate::analyze::{
    derive_distribution_chart_spec, derive_title_distribution, derive_zero_count_chart_spec,
    derive_zero_count_table,
};
use crate::check::check_and_filter_dataset;
use crate::conf::{SHEET_NAME_TITLE_DISTRIBUTION, derive_output_file_name, derive_zero_count_views};
use crate::prepare::prepare_dataset;
use crate::spec::{EnumReportMode, ReportRunError, SpecAnalysisConfig, SpecReportArtifact};

/// Run one report end to end and return the serialized workbook.
///
/// Validation and preparation run once; each view of the selected mode then
/// aggregates and emits one sheet+chart pair. The first failure aborts the
/// run and no partial workbook is ever surfaced. Every invocation builds its
/// own writer and buffer; nothing is shared or cached across runs.
pub fn run_report(
    df: &DataFrame,
    mode: EnumReportMode,
    cfg: &SpecAnalysisConfig,
) -> Result<SpecReportArtifact, ReportRunError> {
    let df_filtered = check_and_filter_dataset(df, cfg)?;
    let df_prepared = prepare_dataset(df_filtered, cfg)?;

    let mut writer = XlsxWriter::new(
        derive_default_xlsx_formats(),
        derive_default_autofit_policy(),
    );

    match mode {
        EnumReportMode::Detailed => {
            // Further detailed-mode views (per-title publication
            // contribution, detailed zero-publication breakdown) have no
            // settled algorithm yet; see DESIGN.md.
            let table = derive_title_distribution(&df_prepared, cfg)?;
            let chart_spec = derive_distribution_chart_spec();
            writer
                .write_report_sheet(&table, SHEET_NAME_TITLE_DISTRIBUTION, Some(&chart_spec))
                .map_err(ReportRunError::Unexpected)?;
        }
        EnumReportMode::Focused => {
            for view in derive_zero_count_views(cfg) {
                let table = derive_zero_count_table(&df_prepared, &view, cfg)?;
                let chart_spec = derive_zero_count_chart_spec(&view, cfg);
                writer
                    .write_report_sheet(&table, &view.sheet_name, Some(&chart_spec))
                    .map_err(ReportRunError::Unexpected)?;
            }
        }
    }

    let l_reports = writer.report();
    let v_bytes_xlsx = writer.finish().map_err(ReportRunError::Unexpected)?;

    Ok(SpecReportArtifact {
        file_name: derive_output_file_name(mode).to_string(),
        v_bytes_xlsx,
        l_reports,
    })
}

/// Run one report from a Polars IPC payload handed across a shell boundary.
pub fn run_report_from_ipc_bytes(
    v_ipc_df: &[u8],
    mode: EnumReportMode,
    cfg: &SpecAnalysisConfig,
) -> Result<SpecReportArtifact, ReportRunError> {
    let df = IpcReader::new(Cursor::new(v_ipc_df))
        .finish()
        .map_err(|err| {
            ReportRunError::Unexpected(format!("Failed to read IPC DataFrame bytes: {err}"))
        })?;
    run_report(&df, mode, cfg)
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
    fn test_detailed_report_produces_distribution_sheet() {
        let cfg = derive_default_analysis_config();
        let artifact = run_report(&derive_df_roster(), EnumReportMode::Detailed, &cfg).unwrap();

        assert!(!artifact.v_bytes_xlsx.is_empty());
        assert_eq!(artifact.file_name, "akademik_analiz_1_yillik_rapor.xlsx");
        assert_eq!(artifact.sheet_names(), vec!["1.1_Unvan_Dagilimi"]);
        assert!(artifact.l_reports[0].sheets[0].if_chart);
    }

    #[test]
    fn test_focused_report_produces_three_fixed_sheets() {
        let cfg = derive_default_analysis_config();
        let artifact = run_report(&derive_df_roster(), EnumReportMode::Focused, &cfg).unwrap();

        assert!(!artifact.v_bytes_xlsx.is_empty());
        assert_eq!(artifact.file_name, "akademik_analiz_3_yillik_rapor.xlsx");
        assert_eq!(
            artifact.sheet_names(),
            vec![
                "3.1_Yayini_Olmayanlar",
                "3.2_WOS_Yayini_Olmayanlar",
                "3.3_SCOPUS_Yayini_Olmayanlar",
            ]
        );
    }

    #[test]
    fn test_repeated_runs_emit_identical_sheet_structure() {
        let cfg = derive_default_analysis_config();
        let df = derive_df_roster();
        let artifact_first = run_report(&df, EnumReportMode::Focused, &cfg).unwrap();
        let artifact_second = run_report(&df, EnumReportMode::Focused, &cfg).unwrap();

        assert_eq!(artifact_first.l_reports, artifact_second.l_reports);
        assert_eq!(artifact_first.file_name, artifact_second.file_name);
    }

    #[test]
    fn test_missing_column_aborts_without_workbook() {
        let cfg = derive_default_analysis_config();
        let df = derive_df_roster().drop("Ad Soyad").unwrap();

        let err = run_report(&df, EnumReportMode::Detailed, &cfg).unwrap_err();
        assert_eq!(
            err,
            ReportRunError::MissingColumns(vec!["Ad Soyad".to_string()])
        );
    }

    #[test]
    fn test_no_recognized_rows_abort_either_mode() {
        let cfg = derive_default_analysis_config();
        let mut df = derive_df_roster();
        df.replace(
            "Unvan",
            Series::new(
                "Unvan".into(),
                ["Arş. Gör.", "Okutman", "Arş. Gör.", "Okutman", "Arş. Gör."],
            ),
        )
        .unwrap();

        for mode in [EnumReportMode::Detailed, EnumReportMode::Focused] {
            let err = run_report(&df, mode, &cfg).unwrap_err();
            assert!(matches!(err, ReportRunError::NoRecognizedRecords { .. }));
        }
    }

    #[test]
    fn test_ipc_entry_point_round_trips_dataframe() {
        let cfg = derive_default_analysis_config();
        let mut df = derive_df_roster();
        let mut v_ipc = Vec::new();
        IpcWriter::new(&mut v_ipc).finish(&mut df).unwrap();

        let artifact =
            run_report_from_ipc_bytes(&v_ipc, EnumReportMode::Detailed, &cfg).unwrap();
        assert_eq!(artifact.sheet_names(), vec!["1.1_Unvan_Dagilimi"]);
    }
}
