// ==========================================
// ReorderPro - 全局托盘分配器
// ==========================================
// 职责: 按紧急加权需求把固定托盘预算分配到各 SKU
// 输入: 各行权重 + min_pallets_global
// 输出: 每行整数托盘数,合计严格等于预算
// ==========================================
// 规则:
// 1) share = weight / total_weight × budget
// 2) 逐行四舍六入五成双
// 3) residual = budget - Σ rounded
// 4) residual 整体加到权重最大的行（并列取首行）
// 红线: 单行整体修正,不做最大余数法分摊
// 红线: 修正后出现负数 → 报错,不截断
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// 分配候选行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationCandidate<'a> {
    pub sku: &'a str,
    pub row_number: usize,
    pub weight: f64,
}

/// 分配结果（保留中间量便于解释）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletAllocation {
    pub budget: u32,
    pub total_weight: f64,
    pub shares: Vec<f64>,
    pub rounded: Vec<i64>,
    pub residual: i64,
    pub corrected_index: Option<usize>, // residual ≠ 0 时被修正的行下标
    pub allocated: Vec<i64>,
}

impl PalletAllocation {
    pub fn total_allocated(&self) -> i64 {
        self.allocated.iter().sum()
    }
}

// ==========================================
// PalletAllocator - 托盘分配器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct PalletAllocator;

impl PalletAllocator {
    pub fn new() -> Self {
        Self
    }

    /// 分配托盘预算
    ///
    /// # 返回
    /// - Err(InvalidBudget): budget = 0
    /// - Err(EmptyAllocationBase): 空表或总权重为 0
    /// - Err(NegativeAllocation): 负残差使最大权重行小于 0
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub fn allocate(
        &self,
        candidates: &[AllocationCandidate<'_>],
        budget: u32,
    ) -> EngineResult<PalletAllocation> {
        if budget == 0 {
            return Err(EngineError::InvalidBudget(0));
        }

        let total_weight: f64 = candidates.iter().map(|c| c.weight).sum();
        if candidates.is_empty() || total_weight <= 0.0 || !total_weight.is_finite() {
            return Err(EngineError::EmptyAllocationBase {
                rows: candidates.len(),
                total_weight,
            });
        }

        let budget_f = f64::from(budget);
        let shares: Vec<f64> = candidates
            .iter()
            .map(|c| c.weight / total_weight * budget_f)
            .collect();
        let rounded: Vec<i64> = shares
            .iter()
            .map(|s| s.round_ties_even() as i64)
            .collect();

        let residual = i64::from(budget) - rounded.iter().sum::<i64>();
        let mut allocated = rounded.clone();
        let mut corrected_index = None;

        if residual != 0 {
            let idx = self.argmax_weight(candidates);
            allocated[idx] += residual;
            corrected_index = Some(idx);
            debug!(
                residual = residual,
                sku = candidates[idx].sku,
                "残差修正到最大权重行"
            );

            if allocated[idx] < 0 {
                warn!(
                    sku = candidates[idx].sku,
                    allocated = allocated[idx],
                    "残差修正后出现负分配"
                );
                return Err(EngineError::NegativeAllocation {
                    row: candidates[idx].row_number,
                    sku: candidates[idx].sku.to_string(),
                    allocated: allocated[idx],
                });
            }
        }

        Ok(PalletAllocation {
            budget,
            total_weight,
            shares,
            rounded,
            residual,
            corrected_index,
            allocated,
        })
    }

    /// 最大权重行下标（并列取首个）
    fn argmax_weight(&self, candidates: &[AllocationCandidate<'_>]) -> usize {
        let mut best = 0;
        for (idx, c) in candidates.iter().enumerate().skip(1) {
            if c.weight > candidates[best].weight {
                best = idx;
            }
        }
        best
    }
}
