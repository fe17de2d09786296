// ==========================================
// ReorderPro - CSV 导出器
// ==========================================
// 输出列: 原始表头与单元格原文（按原顺序）+ 派生列
// 派生列随模式变化:
// - PerSkuPallet: ... boxes_to_order, order_by_date
// - GlobalBudget: ... allocated_pallets, boxes_to_order, order_by_date
// - SignalOnly:   ... order_by_date（无订货量）
// 红线: 输出可被导入器重新解析（含分隔符的字段加引号）
// ==========================================

use crate::domain::inventory::{RawTable, ReorderRecord, ReorderReport};
use crate::domain::types::AllocationMode;
use crate::exporter::{ExportError, ExportResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// 默认输出文件名
pub const DEFAULT_OUTPUT_FILE: &str = "reorder_sugerido.csv";

/// 日期列格式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 派生列名（按模式）
pub fn derived_columns(mode: AllocationMode) -> Vec<&'static str> {
    let mut columns = vec![
        "daily_sales_rate",
        "reorder_point",
        "should_reorder",
        "days_until_breach",
        "urgency_multiplier",
        "weight",
    ];
    match mode {
        AllocationMode::GlobalBudget => columns.extend(["allocated_pallets", "boxes_to_order"]),
        AllocationMode::PerSkuPallet => columns.push("boxes_to_order"),
        AllocationMode::SignalOnly => {}
    }
    columns.push("order_by_date");
    columns
}

// ==========================================
// CsvExporter
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// 写出到任意 Writer
    pub fn write<W: Write>(
        &self,
        source: &RawTable,
        report: &ReorderReport,
        writer: W,
    ) -> ExportResult<()> {
        if source.len() != report.len() {
            return Err(ExportError::RowCountMismatch {
                report_rows: report.len(),
                source_rows: source.len(),
            });
        }

        let mut wtr = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = source.headers.iter().map(String::as_str).collect();
        header.extend(derived_columns(report.mode));
        wtr.write_record(&header)?;

        for (raw, record) in source.rows.iter().zip(&report.records) {
            let mut fields = raw.cells.clone();
            fields.extend(self.derived_cells(record, report.mode));
            wtr.write_record(&fields)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// 导出为字符串
    pub fn to_string(&self, source: &RawTable, report: &ReorderReport) -> ExportResult<String> {
        let mut buf = Vec::new();
        self.write(source, report, &mut buf)?;
        // csv 写出的字段均来自 String,必然是合法 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// 导出到文件
    #[instrument(skip_all, fields(rows = report.len()))]
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        source: &RawTable,
        report: &ReorderReport,
    ) -> ExportResult<()> {
        let file = File::create(path.as_ref())?;
        self.write(source, report, file)?;
        info!(path = %path.as_ref().display(), "补货结果已写出");
        Ok(())
    }

    fn derived_cells(&self, record: &ReorderRecord, mode: AllocationMode) -> Vec<String> {
        let m = &record.metrics;
        let mut cells = vec![
            m.daily_sales_rate.to_string(),
            m.reorder_point.to_string(),
            m.should_reorder.to_string(),
            m.days_until_breach
                .map(|d| d.to_string())
                .unwrap_or_default(),
            m.urgency_multiplier.to_string(),
            m.weight.to_string(),
        ];

        let boxes = record
            .boxes_to_order
            .map(|b| b.to_string())
            .unwrap_or_default();
        match mode {
            AllocationMode::GlobalBudget => {
                cells.push(
                    record
                        .allocated_pallets
                        .map(|p| p.to_string())
                        .unwrap_or_default(),
                );
                cells.push(boxes);
            }
            AllocationMode::PerSkuPallet => cells.push(boxes),
            AllocationMode::SignalOnly => {}
        }

        cells.push(m.order_by_date.format(DATE_FORMAT).to_string());
        cells
    }
}
