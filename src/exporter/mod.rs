// ==========================================
// ReorderPro - 导出层
// ==========================================
// 职责: 补货报告写出（CSV / JSON）与输入模板
// ==========================================

pub mod csv_exporter;
pub mod json_exporter;
pub mod template;

pub use csv_exporter::{derived_columns, CsvExporter, DEFAULT_OUTPUT_FILE};
pub use json_exporter::JsonExporter;
pub use template::{template_csv, write_template};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("报告与原始表行数不一致: 报告 {report_rows} 行, 原始表 {source_rows} 行")]
    RowCountMismatch {
        report_rows: usize,
        source_rows: usize,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;
