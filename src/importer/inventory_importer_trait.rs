// ==========================================
// ReorderPro - 库存导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 行校验
// ==========================================

use crate::domain::inventory::{InventoryRow, RawInventoryRecord, RawRow, RawTable};
use crate::domain::types::SafetySchema;
use crate::importer::error::ImportResult;
use crate::importer::schema_map::ColumnIndex;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表（保留表头顺序与单元格原文）
    ///
    /// # 返回
    /// - Ok(RawTable): 已跳过全空白行
    /// - Err: 文件不存在、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行映射为 RawInventoryRecord
    ///
    /// 数值列只做解析,不做默认值填充: 空白 → Missing, 非数值 → Invalid
    fn map_to_raw_record(&self, row: &RawRow, index: &ColumnIndex) -> RawInventoryRecord;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 行校验接口（阶段 2）
// 实现者: RowValidator
pub trait RowValidator: Send + Sync {
    /// 校验单行并转换为 InventoryRow
    ///
    /// # 返回
    /// - Err(PrimaryKeyMissing): sku 为空
    /// - Err(InvalidNumericValue): 必需数值列缺失或无法解析
    /// - Err(ValueRangeError): 数值符号错误
    fn validate_row(
        &self,
        record: &RawInventoryRecord,
        schema: SafetySchema,
    ) -> ImportResult<InventoryRow>;

    /// 读取全局最小托盘数（首行值广播到整表）
    ///
    /// 仅在表内存在 min_pallets_global 列时调用; 空表返回 None
    fn resolve_min_pallets(&self, records: &[RawInventoryRecord]) -> ImportResult<Option<u32>>;
}
