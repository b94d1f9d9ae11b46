//! XLSX writer kernel that turns rendered tables into workbook sheets with
//! attached charts.

use std::collections::BTreeSet;

use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartType, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
    XlsxError,
};

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{
    EnumCellValue, EnumChartKind, SpecAutofitCellsPolicy, SpecCellFormat, SpecChartSpec,
    SpecSheetRef, SpecSheetTable, SpecXlsxFormats, SpecXlsxReport,
};
use crate::util::{derive_numeric_column_flags, estimate_cell_width, sanitize_sheet_name};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::finish`] is called, which
/// hands the serialized XLSX bytes to the caller. The writer is single-use:
/// writing after `finish()` is an error.
pub struct XlsxWriter {
    workbook: Workbook,
    fmts: SpecXlsxFormats,
    policy_autofit: SpecAutofitCellsPolicy,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_finished: bool,
}

impl XlsxWriter {
    /// Create a writer bound to format presets and an autofit policy.
    pub fn new(fmts: SpecXlsxFormats, policy_autofit: SpecAutofitCellsPolicy) -> Self {
        Self {
            workbook: Workbook::new(),
            fmts,
            policy_autofit,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_finished: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Serialize the workbook and return the XLSX byte stream.
    pub fn finish(&mut self) -> Result<Vec<u8>, String> {
        if self.if_finished {
            return Err("Workbook already finished.".to_string());
        }
        let v_bytes = self
            .workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error_text)?;
        self.if_finished = true;
        Ok(v_bytes)
    }

    /// Write one table as a new sheet and optionally attach a chart.
    ///
    /// The header row comes from the table column names; body rows follow
    /// beneath. Chart data/category ranges are resolved against the cells
    /// just written, never against the in-memory table.
    pub fn write_report_sheet(
        &mut self,
        table: &SpecSheetTable,
        sheet_name: &str,
        chart: Option<&SpecChartSpec>,
    ) -> Result<(), String> {
        if self.if_finished {
            return Err("Cannot write after finish().".to_string());
        }
        if table.height() + 1 > N_NROWS_EXCEL_MAX {
            return Err(format!(
                "Table has {} rows; Excel sheets hold at most {} rows.",
                table.height() + 1,
                N_NROWS_EXCEL_MAX
            ));
        }
        if table.width() > N_NCOLS_EXCEL_MAX {
            return Err(format!(
                "Table has {} columns; Excel sheets hold at most {} columns.",
                table.width(),
                N_NCOLS_EXCEL_MAX
            ));
        }
        if let Some(chart_spec) = chart {
            validate_chart_spec(chart_spec, table)?;
        }

        let sheet_name_unique =
            self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));

        let l_flags_numeric = derive_numeric_column_flags(table);
        let l_fmt_data_by_col: Vec<Format> = l_flags_numeric
            .iter()
            .map(|(if_numeric, if_integer)| {
                let fmt_spec = if *if_integer {
                    &self.fmts.integer
                } else if *if_numeric {
                    &self.fmts.decimal
                } else {
                    &self.fmts.text
                };
                derive_rust_xlsx_format(fmt_spec)
            })
            .collect();
        let fmt_header = derive_rust_xlsx_format(&self.fmts.header);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;

        let mut l_width_by_col = vec![0usize; table.width()];

        for (n_idx_col, colname) in table.colnames().iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, colname, &fmt_header)
                .map_err(derive_xlsx_error_text)?;
            l_width_by_col[n_idx_col] = estimate_cell_width(
                &EnumCellValue::String(colname.clone()),
                false,
                false,
            );
        }

        for (n_idx_row, row) in table.rows().iter().enumerate() {
            for (n_idx_col, value) in row.iter().enumerate() {
                let (if_numeric, if_integer) = l_flags_numeric[n_idx_col];
                l_width_by_col[n_idx_col] = usize::max(
                    l_width_by_col[n_idx_col],
                    estimate_cell_width(value, if_integer, if_numeric && !if_integer),
                );
                write_cell_with_format(
                    worksheet,
                    n_idx_row + 1,
                    n_idx_col,
                    value,
                    &l_fmt_data_by_col[n_idx_col],
                )?;
            }
        }

        let n_min = usize::max(1, self.policy_autofit.width_cell_min);
        let n_max = usize::min(255, usize::max(n_min, self.policy_autofit.width_cell_max));
        for (n_idx_col, n_width_recorded) in l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(
                n_max,
                usize::max(n_min, n_width_recorded + self.policy_autofit.width_cell_padding),
            );
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
                .map_err(derive_xlsx_error_text)?;
        }

        if let Some(chart_spec) = chart {
            let chart_built = derive_chart(chart_spec, &sheet_name_unique, table.height())?;
            worksheet
                .insert_chart(
                    cast_row_num(chart_spec.cell_anchor.0)?,
                    cast_col_num(chart_spec.cell_anchor.1)?,
                    &chart_built,
                )
                .map_err(derive_xlsx_error_text)?;
        }

        let mut report = SpecXlsxReport::default();
        report.sheets.push(SpecSheetRef {
            sheet_name: sheet_name_unique,
            n_rows: table.height(),
            n_cols: table.width(),
            if_chart: chart.is_some(),
        });
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn validate_chart_spec(chart_spec: &SpecChartSpec, table: &SpecSheetTable) -> Result<(), String> {
    if table.height() == 0 {
        return Err("Chart requires at least one body row.".to_string());
    }
    if chart_spec.l_cols_idx_values.is_empty() {
        return Err("Chart requires at least one value column.".to_string());
    }
    if chart_spec.col_idx_categories >= table.width() {
        return Err(format!(
            "Chart category column {} out of range ({} columns).",
            chart_spec.col_idx_categories,
            table.width()
        ));
    }
    for col_idx in &chart_spec.l_cols_idx_values {
        if *col_idx >= table.width() {
            return Err(format!(
                "Chart value column {} out of range ({} columns).",
                col_idx,
                table.width()
            ));
        }
    }
    Ok(())
}

/// Build a chart whose ranges reference the just-written sheet cells.
fn derive_chart(
    chart_spec: &SpecChartSpec,
    sheet_name: &str,
    n_rows_body: usize,
) -> Result<Chart, String> {
    let mut chart = Chart::new(match chart_spec.kind {
        EnumChartKind::Pie => ChartType::Pie,
        EnumChartKind::Column => ChartType::Column,
    });
    chart.title().set_name(&chart_spec.title);
    if !matches!(chart_spec.kind, EnumChartKind::Pie) {
        if let Some(title_axis) = &chart_spec.title_axis_x {
            chart.x_axis().set_name(title_axis);
        }
        if let Some(title_axis) = &chart_spec.title_axis_y {
            chart.y_axis().set_name(title_axis);
        }
    }

    // Body rows occupy sheet rows 1..=n (row 0 is the header).
    let n_row_first = 1u32;
    let n_row_last = cast_row_num(n_rows_body)?;
    let col_categories = cast_col_num(chart_spec.col_idx_categories)?;

    for col_idx_values in &chart_spec.l_cols_idx_values {
        let col_values = cast_col_num(*col_idx_values)?;
        let series = chart.add_series();
        series
            .set_values((sheet_name, n_row_first, col_values, n_row_last, col_values))
            .set_categories((
                sheet_name,
                n_row_first,
                col_categories,
                n_row_last,
                col_categories,
            ))
            .set_name((sheet_name, 0, col_values));
        if chart_spec.if_show_values {
            series.set_data_label(ChartDataLabel::new().show_value());
        }
    }

    Ok(chart)
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{
        CELL_CHART_ANCHOR_DEFAULT, derive_default_autofit_policy, derive_default_xlsx_formats,
    };

    fn derive_test_table() -> SpecSheetTable {
        SpecSheetTable::new(
            vec![
                "Unvan".to_string(),
                "Sıklık".to_string(),
                "Yüzde (%)".to_string(),
            ],
            vec![
                vec![
                    EnumCellValue::String("Prof. Dr.".to_string()),
                    EnumCellValue::Number(4.0),
                    EnumCellValue::Number(57.0),
                ],
                vec![
                    EnumCellValue::String("Doç. Dr.".to_string()),
                    EnumCellValue::Number(3.0),
                    EnumCellValue::Number(43.0),
                ],
            ],
        )
        .unwrap()
    }

    fn derive_test_chart_spec() -> SpecChartSpec {
        SpecChartSpec {
            kind: EnumChartKind::Pie,
            title: "Dağılım".to_string(),
            title_axis_x: None,
            title_axis_y: None,
            col_idx_categories: 0,
            l_cols_idx_values: vec![1],
            cell_anchor: CELL_CHART_ANCHOR_DEFAULT,
            if_show_values: true,
        }
    }

    fn derive_test_writer() -> XlsxWriter {
        XlsxWriter::new(derive_default_xlsx_formats(), derive_default_autofit_policy())
    }

    #[test]
    fn test_write_report_sheet_with_chart_produces_bytes() {
        let mut writer = derive_test_writer();
        writer
            .write_report_sheet(&derive_test_table(), "1.1_Test", Some(&derive_test_chart_spec()))
            .unwrap();

        let report = writer.report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].sheets[0].sheet_name, "1.1_Test");
        assert_eq!(report[0].sheets[0].n_rows, 2);
        assert!(report[0].sheets[0].if_chart);

        let v_bytes = writer.finish().unwrap();
        assert!(!v_bytes.is_empty());
    }

    #[test]
    fn test_duplicate_sheet_names_are_deduplicated() {
        let mut writer = derive_test_writer();
        writer
            .write_report_sheet(&derive_test_table(), "Rapor", None)
            .unwrap();
        writer
            .write_report_sheet(&derive_test_table(), "Rapor", None)
            .unwrap();

        let report = writer.report();
        assert_eq!(report[0].sheets[0].sheet_name, "Rapor");
        assert_eq!(report[1].sheets[0].sheet_name, "Rapor__2");
    }

    #[test]
    fn test_write_after_finish_is_rejected() {
        let mut writer = derive_test_writer();
        writer
            .write_report_sheet(&derive_test_table(), "Rapor", None)
            .unwrap();
        writer.finish().unwrap();

        let result = writer.write_report_sheet(&derive_test_table(), "Rapor2", None);
        assert!(result.is_err());
        assert!(writer.finish().is_err());
    }

    #[test]
    fn test_chart_on_empty_table_is_rejected() {
        let table_empty = SpecSheetTable::new(
            vec!["Unvan".to_string(), "Sıklık".to_string()],
            vec![],
        )
        .unwrap();

        let mut writer = derive_test_writer();
        let mut chart_spec = derive_test_chart_spec();
        chart_spec.l_cols_idx_values = vec![1];
        let result = writer.write_report_sheet(&table_empty, "Bos", Some(&chart_spec));
        assert!(result.is_err());
    }

    #[test]
    fn test_chart_column_out_of_range_is_rejected() {
        let mut writer = derive_test_writer();
        let mut chart_spec = derive_test_chart_spec();
        chart_spec.l_cols_idx_values = vec![9];
        let result = writer.write_report_sheet(&derive_test_table(), "Rapor", Some(&chart_spec));
        assert!(result.is_err());
    }
}
