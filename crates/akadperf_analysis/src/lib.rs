//! `akadperf_analysis` v1:
//! Academic publication performance analysis kernel.
//!
//! Takes a staff roster DataFrame and produces a multi-sheet XLSX report,
//! one chart-paired sheet per analysis view. The presentation shell owns
//! upload/download; this crate owns validation, preparation, aggregation,
//! and report assembly.
//! - `conf`    : constants and default configuration factories
//! - `spec`    : models/options/errors
//! - `check`   : schema validator
//! - `prepare` : derived-column computation
//! - `analyze` : aggregation engine
//! - `report`  : report orchestrator
pub mod analyze;
pub mod check;
pub mod conf;
pub mod prepare;
pub mod report;
pub mod spec;
mod util;

pub use analyze::{
    derive_distribution_chart_spec, derive_title_distribution, derive_zero_count_chart_spec,
    derive_zero_count_table,
};
pub use check::check_and_filter_dataset;
pub use conf::{
    FILE_NAME_REPORT_DETAILED, FILE_NAME_REPORT_FOCUSED, SHEET_NAME_TITLE_DISTRIBUTION,
    derive_default_analysis_config, derive_output_file_name, derive_zero_count_views,
};
pub use prepare::prepare_dataset;
pub use report::{run_report, run_report_from_ipc_bytes};
pub use spec::{
    EnumReportMode, ReportRunError, SpecAnalysisConfig, SpecReportArtifact, SpecZeroCountView,
};
