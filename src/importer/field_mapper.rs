// ==========================================
// ReorderPro - 字段映射器实现
// ==========================================
// 职责: 原始行 → RawInventoryRecord（按 ColumnIndex 取列 + 数值解析）
// 红线: 无法解析的单元格标记为 Invalid,不静默置 0
// ==========================================

use crate::domain::inventory::{RawInventoryRecord, RawRow};
use crate::domain::types::CellValue;
use crate::importer::inventory_importer_trait::FieldMapper as FieldMapperTrait;
use crate::importer::schema_map::{CanonicalField, ColumnIndex};

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_record(&self, row: &RawRow, index: &ColumnIndex) -> RawInventoryRecord {
        RawInventoryRecord {
            sku: self.get_string(row, index, CanonicalField::Sku),

            on_hand_boxes: self.get_number(row, index, CanonicalField::OnHandBoxes),
            period_sales_boxes: self.get_number(row, index, CanonicalField::PeriodSalesBoxes),
            period_days: self.get_number(row, index, CanonicalField::PeriodDays),
            lead_time_days: self.get_number(row, index, CanonicalField::LeadTimeDays),
            safety_factor: self.get_number(row, index, CanonicalField::SafetyFactor),
            safety_days: self.get_number(row, index, CanonicalField::SafetyDays),
            pallet_size_boxes: self.get_number(row, index, CanonicalField::PalletSizeBoxes),
            min_pallets_global: self.get_number(row, index, CanonicalField::MinPalletsGlobal),

            row_number: row.row_number,
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白视为 None）
    fn get_string(&self, row: &RawRow, index: &ColumnIndex, field: CanonicalField) -> Option<String> {
        let position = index.position(field)?;
        let trimmed = row.cell(position).trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// 提取数值字段（列不存在 → Missing）
    fn get_number(&self, row: &RawRow, index: &ColumnIndex, field: CanonicalField) -> CellValue {
        match index.position(field) {
            Some(position) => CellValue::parse(row.cell(position)),
            None => CellValue::Missing,
        }
    }
}
