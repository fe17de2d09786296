// ==========================================
// ReorderPro - 库存领域模型
// ==========================================
// 原始表 → 中间记录 → 校验后行 → 补货记录 → 报告
// 生命周期: 单次运行内,不落库
// ==========================================

use crate::domain::types::{AllocationMode, CellValue, SafetyMargin, SafetySchema};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawTable - 原始表
// ==========================================
// 用途: 文件解析产物,保留原始表头顺序与单元格原文（输出时原样回写）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub row_number: usize, // 物理数据行号（表头下一行为 1）
    pub cells: Vec<String>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 追加一行（缺列补空; 超宽校验由解析器负责）
    ///
    /// row_number 为文件中的物理数据行号,跳过的空白行也计数
    pub fn push_row(&mut self, row_number: usize, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(RawRow { row_number, cells });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RawRow {
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

// ==========================================
// RawInventoryRecord - 映射中间结构体
// ==========================================
// 用途: 字段映射产物（列别名已归一,数值未校验）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryRecord {
    pub sku: Option<String>,
    pub on_hand_boxes: CellValue,
    pub period_sales_boxes: CellValue,
    pub period_days: CellValue,
    pub lead_time_days: CellValue,
    pub safety_factor: CellValue,
    pub safety_days: CellValue,
    pub pallet_size_boxes: CellValue,
    pub min_pallets_global: CellValue,

    pub row_number: usize,
}

// ==========================================
// InventoryRow - 校验后的库存行
// ==========================================
// 红线: 数值字段全部非空、符号正确; period_days 由引擎校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub sku: String,
    pub on_hand_boxes: f64,      // 现有库存（箱）
    pub period_sales_boxes: f64, // 观察期总销量（箱）
    pub period_days: f64,        // 观察期天数
    pub lead_time_days: f64,     // 交货期（天）
    pub safety: SafetyMargin,    // 安全余量（系数或天数）
    pub pallet_size_boxes: f64,  // 每托盘箱数

    pub row_number: usize,
}

// ==========================================
// ValidatedTable - 校验后的整表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTable {
    pub schema: SafetySchema,
    pub source: RawTable,        // 原始表（与 rows 按下标对齐）
    pub rows: Vec<InventoryRow>,
    pub min_pallets_global: Option<u32>, // 表内 Minimo_paletas（首行值）
}

impl ValidatedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// ReorderMetrics - 单行派生指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderMetrics {
    pub daily_sales_rate: f64,
    pub reorder_point: f64, // 已取整
    pub should_reorder: bool,
    pub days_until_breach: Option<f64>, // 日销量为 0 时无定义
    pub urgency_multiplier: f64,
    pub weight: f64,
    pub order_by_date: NaiveDate,
}

// ==========================================
// ReorderRecord - 输出记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecord {
    pub row: InventoryRow,
    pub metrics: ReorderMetrics,
    pub allocated_pallets: Option<i64>, // 仅 GlobalBudget 模式
    pub boxes_to_order: Option<f64>,    // SignalOnly 模式为空
}

// ==========================================
// ReorderReport - 单次运行结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderReport {
    pub schema: SafetySchema,
    pub mode: AllocationMode,
    pub today: NaiveDate,
    pub min_pallets_global: Option<u32>,
    pub records: Vec<ReorderRecord>,
}

impl ReorderReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 需要补货的行数
    pub fn reorder_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.metrics.should_reorder)
            .count()
    }

    /// 已分配托盘总数（仅 GlobalBudget 模式）
    pub fn total_allocated_pallets(&self) -> Option<i64> {
        match self.mode {
            AllocationMode::GlobalBudget => {
                Some(self.records.iter().filter_map(|r| r.allocated_pallets).sum())
            }
            _ => None,
        }
    }

    /// 订货箱总数（SignalOnly 模式无订货量）
    pub fn total_boxes_to_order(&self) -> Option<f64> {
        match self.mode {
            AllocationMode::SignalOnly => None,
            // 从 +0 起累加,空表不得得到 -0
            _ => Some(
                self.records
                    .iter()
                    .filter_map(|r| r.boxes_to_order)
                    .fold(0.0, |acc, b| acc + b),
            ),
        }
    }

    pub fn summary(&self) -> ReorderSummary {
        ReorderSummary {
            rows: self.len(),
            reorder_rows: self.reorder_count(),
            schema: self.schema,
            mode: self.mode,
            allocated_pallets: self
                .total_allocated_pallets()
                .zip(self.min_pallets_global),
            boxes_to_order: self.total_boxes_to_order(),
        }
    }
}

// ==========================================
// ReorderSummary - 运行汇总
// ==========================================
// 用途: CLI 汇总输出; 未执行的阶段对应字段为 None
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderSummary {
    pub rows: usize,
    pub reorder_rows: usize,
    pub schema: SafetySchema,
    pub mode: AllocationMode,
    pub allocated_pallets: Option<(i64, u32)>, // (已分配, 预算)
    pub boxes_to_order: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_table_push_row_pads_short_rows() {
        let mut table = RawTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(1, vec!["1".to_string()]);
        table.push_row(3, vec!["1".to_string(), "2".to_string()]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].cells, vec!["1".to_string(), String::new()]);
        assert_eq!(table.rows[1].cells.len(), 2);
        assert_eq!(table.rows[1].row_number, 3);
        assert_eq!(table.rows[0].cell(5), "");
    }

    fn report(mode: AllocationMode) -> ReorderReport {
        ReorderReport {
            schema: SafetySchema::Multiplicative,
            mode,
            today: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            min_pallets_global: Some(5),
            records: Vec::new(),
        }
    }

    #[test]
    fn test_empty_report_totals_are_positive_zero() {
        let boxes = report(AllocationMode::PerSkuPallet)
            .total_boxes_to_order()
            .unwrap();
        assert!(boxes.is_sign_positive());
        assert_eq!(boxes.to_string(), "0");
    }

    #[test]
    fn test_signal_only_summary_has_no_order_totals() {
        let summary = report(AllocationMode::SignalOnly).summary();
        assert_eq!(summary.allocated_pallets, None);
        assert_eq!(summary.boxes_to_order, None);

        let summary = report(AllocationMode::GlobalBudget).summary();
        assert_eq!(summary.allocated_pallets, Some((0, 5)));
    }
}
