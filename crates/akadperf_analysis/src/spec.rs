//! Analysis specification models, configuration, and run error types.

use std::fmt;

use akadperf_io_xlsx::SpecXlsxReport;

use crate::util::join_quoted_with_or;

////////////////////////////////////////////////////////////////////////////////
// #region ModeAndConfiguration

/// Report mode selecting the fixed set of analysis views to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumReportMode {
    /// One-year detailed analysis (title distribution).
    Detailed,
    /// Three-year focused analysis (zero-publication breakdowns).
    Focused,
}

/// Immutable analysis configuration: recognized titles, roster column names,
/// and derived-column names. Passed explicitly into every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAnalysisConfig {
    /// Recognized academic titles qualifying a row for analysis.
    pub l_titles_target: Vec<String>,
    /// Category (title) column name.
    pub colname_title: String,
    /// Total publication count column name.
    pub colname_total: String,
    /// Full name column name.
    pub colname_name: String,
    /// The four WoS quartile count columns, Q1 to Q4.
    pub l_colnames_wos_q: Vec<String>,
    /// The four Scopus quartile count columns, Q1 to Q4.
    pub l_colnames_scopus_q: Vec<String>,
    /// Derived WoS quartile sum column name.
    pub colname_wos_q_total: String,
    /// Derived Scopus quartile sum column name.
    pub colname_scopus_q_total: String,
}

impl SpecAnalysisConfig {
    /// Required input columns in declared order: category, total, name, then
    /// the WoS and Scopus quartile groups.
    pub fn derive_required_columns(&self) -> Vec<String> {
        let mut l_required = vec![
            self.colname_title.clone(),
            self.colname_total.clone(),
            self.colname_name.clone(),
        ];
        l_required.extend(self.l_colnames_wos_q.iter().cloned());
        l_required.extend(self.l_colnames_scopus_q.iter().cloned());
        l_required
    }
}

/// One focused-mode analysis view: a metric column and its sheet/labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecZeroCountView {
    /// Prepared-dataset column holding the metric tested against zero.
    pub colname_metric: String,
    /// Short metric name used in the chart title.
    pub name_metric: String,
    /// Target sheet name.
    pub sheet_name: String,
    /// Header of the zero-count result column.
    pub colname_zero_count: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunErrors

/// Failure surfaced by a report run. All variants are non-retryable; the
/// caller must supply corrected input before a new run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRunError {
    /// No row matched any recognized title.
    NoRecognizedRecords {
        /// Recognized titles, named in the user-facing message.
        l_titles: Vec<String>,
    },
    /// Required columns absent from the input, in declared order.
    MissingColumns(Vec<String>),
    /// A required numeric cell could not be interpreted as a whole number.
    InvalidNumericValue {
        /// Offending column name.
        colname: String,
        /// Zero-based row index within the filtered dataset.
        n_idx_row: usize,
    },
    /// Any other failure, carrying the underlying message.
    Unexpected(String),
}

impl fmt::Display for ReportRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecognizedRecords { l_titles } => write!(
                f,
                "Yüklenen dosyada {} unvanlarına sahip akademisyen bulunamadı. \
                 Lütfen dosyanızı kontrol edin.",
                join_quoted_with_or(l_titles)
            ),
            Self::MissingColumns(l_colnames) => write!(
                f,
                "HATA: Excel dosyanızda şu sütunlar eksik: {}. \
                 Lütfen dosya formatınızı kontrol edin.",
                l_colnames.join(", ")
            ),
            Self::InvalidNumericValue {
                colname,
                n_idx_row,
            } => write!(
                f,
                "HATA: '{colname}' sütununda sayısal olarak yorumlanamayan bir değer var \
                 (satır {}). Lütfen dosyanızı kontrol edin.",
                n_idx_row + 1
            ),
            Self::Unexpected(msg) => write!(f, "Beklenmedik bir hata oluştu: {msg}"),
        }
    }
}

impl std::error::Error for ReportRunError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunArtifact

/// Completed report run: serialized workbook plus per-sheet run reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportArtifact {
    /// Fixed download file name of the selected mode.
    pub file_name: String,
    /// Serialized XLSX byte stream, ready to serve.
    pub v_bytes_xlsx: Vec<u8>,
    /// Per-sheet write reports in emission order.
    pub l_reports: Vec<SpecXlsxReport>,
}

impl SpecReportArtifact {
    /// Sheet names in emission order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.l_reports
            .iter()
            .flat_map(|report| report.sheets.iter().map(|sheet| sheet.sheet_name.clone()))
            .collect()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
