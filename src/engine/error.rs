// ==========================================
// ReorderPro - 引擎错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 观察期天数 <= 0,日销量无定义
    #[error("观察期无效 (行 {row}, sku {sku}): period_days = {period_days}")]
    InvalidPeriod {
        row: usize,
        sku: String,
        period_days: f64,
    },

    /// 总权重为 0 或空表,无法按比例分配
    #[error("分配基数为空: rows = {rows}, total_weight = {total_weight}")]
    EmptyAllocationBase { rows: usize, total_weight: f64 },

    /// 单行残差修正后出现负数托盘
    #[error("残差修正导致负分配 (行 {row}, sku {sku}): allocated = {allocated}")]
    NegativeAllocation {
        row: usize,
        sku: String,
        allocated: i64,
    },

    #[error("托盘预算无效: {0}（需 >= 1）")]
    InvalidBudget(i64),
}

pub type EngineResult<T> = Result<T, EngineError>;
