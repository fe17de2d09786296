// ==========================================
// ReorderPro - 行校验器实现
// ==========================================
// 职责: 必需数值列非空 + 符号校验 + 全局托盘数解析
// 红线: 缺失/无效数值直接失败,不使用默认值参与计算
// ==========================================

use crate::domain::inventory::{InventoryRow, RawInventoryRecord};
use crate::domain::types::{CellValue, SafetyMargin, SafetySchema};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::RowValidator as RowValidatorTrait;
use crate::importer::schema_map::CanonicalField;

pub struct RowValidator {
    default_pallet_size_boxes: f64, // 无托盘列时的每托盘箱数
}

impl RowValidator {
    pub fn new(default_pallet_size_boxes: f64) -> Self {
        Self {
            default_pallet_size_boxes,
        }
    }

    fn require_number(
        &self,
        value: &CellValue,
        field: CanonicalField,
        row: usize,
    ) -> ImportResult<f64> {
        match value {
            CellValue::Number(v) => Ok(*v),
            CellValue::Missing => Err(ImportError::InvalidNumericValue {
                row,
                field: field.name().to_string(),
                value: String::new(),
            }),
            CellValue::Invalid(raw) => Err(ImportError::InvalidNumericValue {
                row,
                field: field.name().to_string(),
                value: raw.clone(),
            }),
        }
    }

    fn require_non_negative(
        &self,
        value: &CellValue,
        field: CanonicalField,
        row: usize,
    ) -> ImportResult<f64> {
        let v = self.require_number(value, field, row)?;
        if v < 0.0 {
            return Err(ImportError::ValueRangeError {
                row,
                field: field.name().to_string(),
                value: v,
                constraint: ">= 0".to_string(),
            });
        }
        Ok(v)
    }

    /// 托盘规格: 空白取默认值,非空必须 > 0
    fn pallet_size(&self, value: &CellValue, row: usize) -> ImportResult<f64> {
        if value.is_missing() {
            return Ok(self.default_pallet_size_boxes);
        }
        let v = self.require_number(value, CanonicalField::PalletSizeBoxes, row)?;
        if v <= 0.0 {
            return Err(ImportError::ValueRangeError {
                row,
                field: CanonicalField::PalletSizeBoxes.name().to_string(),
                value: v,
                constraint: "> 0".to_string(),
            });
        }
        Ok(v)
    }
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PALLET_SIZE_BOXES)
    }
}

impl RowValidatorTrait for RowValidator {
    fn validate_row(
        &self,
        record: &RawInventoryRecord,
        schema: SafetySchema,
    ) -> ImportResult<InventoryRow> {
        let row = record.row_number;

        let sku = record
            .sku
            .clone()
            .ok_or(ImportError::PrimaryKeyMissing(row))?;

        let on_hand_boxes =
            self.require_non_negative(&record.on_hand_boxes, CanonicalField::OnHandBoxes, row)?;
        let period_sales_boxes = self.require_non_negative(
            &record.period_sales_boxes,
            CanonicalField::PeriodSalesBoxes,
            row,
        )?;
        // 符号由引擎判定（InvalidPeriod）
        let period_days =
            self.require_number(&record.period_days, CanonicalField::PeriodDays, row)?;
        let lead_time_days =
            self.require_non_negative(&record.lead_time_days, CanonicalField::LeadTimeDays, row)?;

        let safety = match schema {
            SafetySchema::Multiplicative => SafetyMargin::Factor(self.require_non_negative(
                &record.safety_factor,
                CanonicalField::SafetyFactor,
                row,
            )?),
            SafetySchema::AdditiveDays => SafetyMargin::Days(self.require_non_negative(
                &record.safety_days,
                CanonicalField::SafetyDays,
                row,
            )?),
        };

        let pallet_size_boxes = self.pallet_size(&record.pallet_size_boxes, row)?;

        Ok(InventoryRow {
            sku,
            on_hand_boxes,
            period_sales_boxes,
            period_days,
            lead_time_days,
            safety,
            pallet_size_boxes,
            row_number: row,
        })
    }

    fn resolve_min_pallets(&self, records: &[RawInventoryRecord]) -> ImportResult<Option<u32>> {
        let first = match records.first() {
            Some(r) => r,
            None => return Ok(None),
        };

        let field = CanonicalField::MinPalletsGlobal;
        let value = self.require_number(&first.min_pallets_global, field, first.row_number)?;

        if value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(ImportError::InvalidNumericValue {
                row: first.row_number,
                field: field.name().to_string(),
                value: value.to_string(),
            });
        }
        if value < 1.0 {
            return Err(ImportError::ValueRangeError {
                row: first.row_number,
                field: field.name().to_string(),
                value,
                constraint: ">= 1".to_string(),
            });
        }

        Ok(Some(value as u32))
    }
}
