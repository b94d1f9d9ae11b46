//! Shared XLSX table/chart/format specification models.

use crate::util::validate_unique_columns;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification applied at write time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

/// Named format presets consumed by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxFormats {
    /// Generic text cell format.
    pub text: SpecCellFormat,
    /// Integer number format.
    pub integer: SpecCellFormat,
    /// Decimal number format.
    pub decimal: SpecCellFormat,
    /// Header cell format.
    pub header: SpecCellFormat,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableSpecification

/// Normalized cell value in a rendered table.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

/// Rectangular table ready to be written as one sheet.
///
/// The first column is conventionally the group key; the header row is taken
/// from `l_colnames`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetTable {
    l_colnames: Vec<String>,
    l_rows: Vec<Vec<EnumCellValue>>,
}

impl SpecSheetTable {
    /// Build a table after validating rectangular shape and unique headers.
    pub fn new(
        l_colnames: Vec<String>,
        l_rows: Vec<Vec<EnumCellValue>>,
    ) -> Result<Self, String> {
        if l_colnames.is_empty() {
            return Err("Table must have >= 1 column.".to_string());
        }
        validate_unique_columns(&l_colnames)?;
        for (n_idx_row, row) in l_rows.iter().enumerate() {
            if row.len() != l_colnames.len() {
                return Err(format!(
                    "Row {n_idx_row} has {} cells; expected {}.",
                    row.len(),
                    l_colnames.len()
                ));
            }
        }
        Ok(Self {
            l_colnames,
            l_rows,
        })
    }

    /// Ordered column names (header row).
    pub fn colnames(&self) -> &[String] {
        &self.l_colnames
    }

    /// Body rows in write order.
    pub fn rows(&self) -> &[Vec<EnumCellValue>] {
        &self.l_rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.l_colnames.len()
    }

    /// Number of body rows (header excluded).
    pub fn height(&self) -> usize {
        self.l_rows.len()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ChartSpecification

/// Chart rendering type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumChartKind {
    /// Pie chart, single value series.
    Pie,
    /// Vertical bar chart, one series per value column.
    Column,
}

/// Chart descriptor expressed purely in table-local row/column coordinates.
///
/// The writer resolves these to absolute cell ranges of the sheet the table
/// was just written to, so the chart always reads what is visible on the
/// sheet rather than any in-memory value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecChartSpec {
    /// Chart type.
    pub kind: EnumChartKind,
    /// Chart title.
    pub title: String,
    /// Horizontal axis title (ignored for pie charts).
    pub title_axis_x: Option<String>,
    /// Vertical axis title (ignored for pie charts).
    pub title_axis_y: Option<String>,
    /// Table column index providing category labels.
    pub col_idx_categories: usize,
    /// Table column indices providing value series, one series each.
    pub l_cols_idx_values: Vec<usize>,
    /// Anchor cell (row, col), zero-based.
    pub cell_anchor: (usize, usize),
    /// Show data-value labels on the chart.
    pub if_show_values: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitPolicy

/// Column width autofit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Reference to one sheet emitted into the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetRef {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Body row count written.
    pub n_rows: usize,
    /// Column count written.
    pub n_cols: usize,
    /// Whether a chart was attached.
    pub if_chart: bool,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets produced by the write call.
    pub sheets: Vec<SpecSheetRef>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
