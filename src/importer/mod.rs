// ==========================================
// ReorderPro - 导入层
// ==========================================
// 职责: 外部表格 → 校验后的库存表
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod inventory_importer;
pub mod inventory_importer_trait;
pub mod row_validator;
pub mod schema_map;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use inventory_importer::InventoryImporter;
pub use row_validator::RowValidator as RowValidatorImpl;
pub use schema_map::{CanonicalField, ColumnIndex};

// 重导出 Trait 接口
pub use inventory_importer_trait::{FieldMapper, FileParser, RowValidator};
