//! Analysis constants and default configuration factories.
//!
//! Column names and title labels are the fixed Turkish roster headers the
//! upstream spreadsheets use; they travel inside [`SpecAnalysisConfig`] so a
//! future roster format can coexist without touching module state.

use crate::spec::{EnumReportMode, SpecAnalysisConfig, SpecZeroCountView};

/// Recognized academic title: full professor.
pub const TITLE_PROF: &str = "Prof. Dr.";
/// Recognized academic title: associate professor.
pub const TITLE_DOCENT: &str = "Doç. Dr.";
/// Recognized academic title: assistant professor.
pub const TITLE_DR_LECTURER: &str = "Dr. Öğr. Üyesi";

/// Category column holding the academic title.
pub const COLNAME_TITLE: &str = "Unvan";
/// Total publication count column.
pub const COLNAME_TOTAL_PUBLICATIONS: &str = "Toplam Yayın";
/// Full name column.
pub const COLNAME_FULL_NAME: &str = "Ad Soyad";

/// Derived column: row-wise sum of the four WoS quartile counts.
pub const COLNAME_WOS_Q_TOTAL: &str = "WoS Q Toplamı";
/// Derived column: row-wise sum of the four Scopus quartile counts.
pub const COLNAME_SCOPUS_Q_TOTAL: &str = "Scopus Q Toplamı";

/// Title distribution sheet name (detailed mode, view 1.1).
pub const SHEET_NAME_TITLE_DISTRIBUTION: &str = "1.1_Unvan_Dagilimi";
/// Frequency column header in the distribution table.
pub const COLNAME_FREQUENCY: &str = "Sıklık";
/// Percentage column header in the distribution table.
pub const COLNAME_PERCENT: &str = "Yüzde (%)";
/// Per-category staff total column header in zero-count tables.
pub const COLNAME_TOTAL_STAFF: &str = "TOPLAM UNVANDAKİ HOCA SAYISI";

/// Title distribution pie chart title.
pub const CHART_TITLE_TITLE_DISTRIBUTION: &str = "Öğretim Üyesi Unvan Dağılımı (Sıklık)";
/// Vertical axis title shared by the zero-count bar charts.
pub const CHART_AXIS_TITLE_STAFF_COUNT: &str = "Akademisyen Sayısı";

/// Output file name for the detailed (1-year) report.
pub const FILE_NAME_REPORT_DETAILED: &str = "akademik_analiz_1_yillik_rapor.xlsx";
/// Output file name for the focused (3-year) report.
pub const FILE_NAME_REPORT_FOCUSED: &str = "akademik_analiz_3_yillik_rapor.xlsx";

/// Build the default analysis configuration for the fixed roster format.
pub fn derive_default_analysis_config() -> SpecAnalysisConfig {
    SpecAnalysisConfig {
        l_titles_target: vec![
            TITLE_PROF.to_string(),
            TITLE_DOCENT.to_string(),
            TITLE_DR_LECTURER.to_string(),
        ],
        colname_title: COLNAME_TITLE.to_string(),
        colname_total: COLNAME_TOTAL_PUBLICATIONS.to_string(),
        colname_name: COLNAME_FULL_NAME.to_string(),
        l_colnames_wos_q: (1..=4)
            .map(|n_idx| format!("WoS Q{n_idx} Makale Sayısı"))
            .collect(),
        l_colnames_scopus_q: (1..=4)
            .map(|n_idx| format!("Scopus Q{n_idx} Yayın Sayısı"))
            .collect(),
        colname_wos_q_total: COLNAME_WOS_Q_TOTAL.to_string(),
        colname_scopus_q_total: COLNAME_SCOPUS_Q_TOTAL.to_string(),
    }
}

/// Build the fixed ordered view list of the focused (3-year) report mode.
pub fn derive_zero_count_views(cfg: &SpecAnalysisConfig) -> Vec<SpecZeroCountView> {
    vec![
        SpecZeroCountView {
            colname_metric: cfg.colname_total.clone(),
            name_metric: "Toplam Yayın".to_string(),
            sheet_name: "3.1_Yayini_Olmayanlar".to_string(),
            colname_zero_count: "YAYINI OLMAYAN HOCA SAYISI".to_string(),
        },
        SpecZeroCountView {
            colname_metric: cfg.colname_wos_q_total.clone(),
            name_metric: "WoS Q".to_string(),
            sheet_name: "3.2_WOS_Yayini_Olmayanlar".to_string(),
            colname_zero_count: "WOS Q YAYINI OLMAYAN HOCA SAYISI".to_string(),
        },
        SpecZeroCountView {
            colname_metric: cfg.colname_scopus_q_total.clone(),
            name_metric: "Scopus Q".to_string(),
            sheet_name: "3.3_SCOPUS_Yayini_Olmayanlar".to_string(),
            colname_zero_count: "SCOPUS Q YAYINI OLMAYAN HOCA SAYISI".to_string(),
        },
    ]
}

/// Bar chart title for one zero-count view.
pub fn derive_zero_count_chart_title(name_metric: &str) -> String {
    format!("{name_metric} Yayını Olmayanların Unvana Göre Dağılımı (3 Yıllık)")
}

/// Fixed output file name of a report mode.
pub fn derive_output_file_name(mode: EnumReportMode) -> &'static str {
    match mode {
        EnumReportMode::Detailed => FILE_NAME_REPORT_DETAILED,
        EnumReportMode::Focused => FILE_NAME_REPORT_FOCUSED,
    }
}
