// ==========================================
// ReorderPro - JSON 导出器
// ==========================================
// 输出: ReorderReport 整体序列化（含模式、参考日期与逐行记录）
// ==========================================

use crate::domain::inventory::ReorderReport;
use crate::exporter::ExportResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, report: &ReorderReport, writer: W) -> ExportResult<()> {
        serde_json::to_writer_pretty(writer, report)?;
        Ok(())
    }

    pub fn to_string(&self, report: &ReorderReport) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P, report: &ReorderReport) -> ExportResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write(report, &mut writer)?;
        writer.flush()?;
        info!(path = %path.as_ref().display(), rows = report.len(), "JSON 结果已写出");
        Ok(())
    }
}
