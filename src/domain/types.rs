// ==========================================
// ReorderPro - 领域类型定义
// ==========================================
// 安全库存口径 / 分配模式 / 单元格值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 安全库存口径 (Safety Schema)
// ==========================================
// 红线: 两种公式互斥,按列存在与否选定,不做混合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetySchema {
    Multiplicative, // 乘法系数: rate × lead_time × factor
    AdditiveDays,   // 追加天数: rate × (lead_time + safety_days)
}

impl SafetySchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetySchema::Multiplicative => "multiplicative",
            SafetySchema::AdditiveDays => "additive_days",
        }
    }
}

impl fmt::Display for SafetySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SafetySchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiplicative" | "factor" => Ok(SafetySchema::Multiplicative),
            "additive_days" | "additive-days" | "days" => Ok(SafetySchema::AdditiveDays),
            other => Err(format!("未知安全库存口径: {}", other)),
        }
    }
}

// ==========================================
// 安全余量 (Safety Margin)
// ==========================================
// 单行取值,口径由整表的 SafetySchema 决定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SafetyMargin {
    Factor(f64), // 乘法系数（如 1.3）
    Days(f64),   // 追加安全天数
}

// ==========================================
// 分配模式 (Allocation Mode)
// ==========================================
// PerSkuPallet 与 GlobalBudget 互斥; SignalOnly 仅在分配阶段失败时出现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationMode {
    PerSkuPallet, // 按 SKU 托盘规格向上取整
    GlobalBudget, // 全局托盘预算按紧急加权需求分配
    SignalOnly,   // 只输出补货信号
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMode::PerSkuPallet => write!(f, "PER_SKU_PALLET"),
            AllocationMode::GlobalBudget => write!(f, "GLOBAL_BUDGET"),
            AllocationMode::SignalOnly => write!(f, "SIGNAL_ONLY"),
        }
    }
}

// ==========================================
// 数值单元格 (Cell Value)
// ==========================================
// 无法解析的单元格保留原文,不落成 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Missing,
    Invalid(String),
}

impl CellValue {
    /// 解析单元格文本（空白 → Missing, 非有限数 → Invalid）
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Invalid(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}
