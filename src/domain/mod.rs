// ==========================================
// ReorderPro - 领域模型层
// ==========================================
// 职责: 定义实体与类型
// 红线: 不含解析逻辑,不含引擎逻辑
// ==========================================

pub mod inventory;
pub mod types;

// 重导出核心类型
pub use inventory::{
    InventoryRow, RawInventoryRecord, RawRow, RawTable, ReorderMetrics, ReorderRecord,
    ReorderReport, ReorderSummary, ValidatedTable,
};
pub use types::{AllocationMode, CellValue, SafetyMargin, SafetySchema};
