// ==========================================
// ReorderPro - 库存数据导入器
// ==========================================
// 流程: 解析 → 表头映射 → 口径判定 → 字段映射 → 行校验
// 输出: ValidatedTable（与原始表按下标对齐）
// 红线: 任一行失败则整表失败
// ==========================================

use crate::domain::inventory::{RawTable, ValidatedTable};
use crate::domain::types::SafetySchema;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{CsvParser, UniversalFileParser};
use crate::importer::inventory_importer_trait::{FieldMapper, FileParser, RowValidator};
use crate::importer::schema_map::{CanonicalField, ColumnIndex};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// InventoryImporter - 库存导入器
// ==========================================
pub struct InventoryImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    row_validator: Box<dyn RowValidator>,

    // 强制口径（None = 按列判定）
    forced_schema: Option<SafetySchema>,
}

impl InventoryImporter {
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        row_validator: Box<dyn RowValidator>,
        forced_schema: Option<SafetySchema>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            row_validator,
            forced_schema,
        }
    }

    /// 默认组件: 通用文件解析 + 标准映射 + 指定默认托盘规格
    pub fn with_defaults(default_pallet_size_boxes: f64, forced_schema: Option<SafetySchema>) -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(crate::importer::field_mapper::FieldMapper),
            Box::new(crate::importer::row_validator::RowValidator::new(
                default_pallet_size_boxes,
            )),
            forced_schema,
        )
    }

    /// 从文件导入
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ValidatedTable> {
        let raw = self.file_parser.parse_to_raw_table(file_path.as_ref())?;
        info!(rows = raw.len(), "文件解析完成");
        self.import_table(raw)
    }

    /// 从 CSV 文本导入
    pub fn import_csv_str(&self, content: &str) -> ImportResult<ValidatedTable> {
        let raw = CsvParser.parse_str(content)?;
        self.import_table(raw)
    }

    /// 校验已解析的原始表
    pub fn import_table(&self, raw: RawTable) -> ImportResult<ValidatedTable> {
        // === 步骤 1: 表头映射 + 口径判定 ===
        let index = ColumnIndex::from_headers(&raw.headers);
        let schema = index.resolve_schema(self.forced_schema)?;
        debug!(schema = %schema, "口径判定完成");

        // === 步骤 2: 字段映射 ===
        let records: Vec<_> = raw
            .rows
            .iter()
            .map(|row| self.field_mapper.map_to_raw_record(row, &index))
            .collect();

        // === 步骤 3: 行校验 ===
        let rows = records
            .iter()
            .map(|record| self.row_validator.validate_row(record, schema))
            .collect::<ImportResult<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert(row.sku.as_str()) {
                // 允许重复,分配修正时按首个最大权重行处理
                warn!(row_number = row.row_number, sku = %row.sku, "SKU 重复");
            }
        }

        // === 步骤 4: 全局最小托盘数 ===
        let min_pallets_global = if index.contains(CanonicalField::MinPalletsGlobal) {
            self.row_validator.resolve_min_pallets(&records)?
        } else {
            None
        };

        info!(
            rows = rows.len(),
            schema = %schema,
            min_pallets_global = ?min_pallets_global,
            "数据校验完成"
        );

        Ok(ValidatedTable {
            schema,
            source: raw,
            rows,
            min_pallets_global,
        })
    }
}

impl Default for InventoryImporter {
    fn default() -> Self {
        Self::with_defaults(crate::DEFAULT_PALLET_SIZE_BOXES, None)
    }
}
