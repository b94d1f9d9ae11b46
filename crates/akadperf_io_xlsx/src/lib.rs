//! `akadperf_io_xlsx` v1:
//! Rust-side XLSX sheet/chart emitter kernel.
//!
//! Turns rendered aggregation tables into workbook sheets, each optionally
//! paired with a chart whose ranges reference the written cells.
//! - `conf`   : constants and default presets
//! - `spec`   : table/chart/format models
//! - `util`   : pure helper functions
//! - `writer` : workbook writer kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    CELL_CHART_ANCHOR_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, derive_default_autofit_policy, derive_default_xlsx_formats,
};
pub use spec::{
    EnumCellValue, EnumChartKind, SpecAutofitCellsPolicy, SpecCellFormat, SpecChartSpec,
    SpecSheetRef, SpecSheetTable, SpecXlsxFormats, SpecXlsxReport,
};
pub use util::{estimate_unicode_string_width, sanitize_sheet_name, validate_unique_columns};
pub use writer::XlsxWriter;
