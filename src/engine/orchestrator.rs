// ==========================================
// ReorderPro - 引擎编排器
// ==========================================
// 用途: 协调单行指标计算与托盘分配两条流水线
// 流程:
// 1) 逐行计算补货信号（无行间状态）
// 2) 解析托盘预算（表内列 > 调用参数 > 配置默认）
// 3) 有预算 → 全局分配; 无预算 → 按 SKU 托盘取整
// 红线: 输出行数与顺序严格等于输入
// ==========================================

use crate::config::EngineConfig;
use crate::domain::inventory::{ReorderMetrics, ReorderRecord, ReorderReport, ValidatedTable};
use crate::domain::types::AllocationMode;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::pallet_allocator::{AllocationCandidate, PalletAllocator};
use crate::engine::row_metrics::RowMetricsCalculator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

// ==========================================
// RunParams - 单次运行参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// 参考日期（注入以保证结果可复现）
    pub today: NaiveDate,

    /// 调用方提供的托盘预算（表内列存在时被覆盖）
    pub min_pallets: Option<u32>,
}

impl RunParams {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            min_pallets: None,
        }
    }

    pub fn with_min_pallets(mut self, min_pallets: Option<u32>) -> Self {
        self.min_pallets = min_pallets;
        self
    }
}

// ==========================================
// RunOutcome - 运行结果
// ==========================================
// fallback 为 Some 时报告为 SignalOnly（分配阶段失败原因）
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub report: ReorderReport,
    pub fallback: Option<EngineError>,
}

impl RunOutcome {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

// ==========================================
// ReorderEngine - 补货引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReorderEngine {
    config: EngineConfig,
    calculator: RowMetricsCalculator,
    allocator: PalletAllocator,
}

impl ReorderEngine {
    /// 创建引擎实例
    ///
    /// # 参数
    /// - config: 引擎配置（托盘规格与预算默认值）
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            calculator: RowMetricsCalculator::new(),
            allocator: PalletAllocator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 解析托盘预算
    ///
    /// 优先级: 表内 min_pallets 列（首行）> 调用参数 > 配置默认
    pub fn resolve_budget(&self, table: &ValidatedTable, params: &RunParams) -> Option<u32> {
        table
            .min_pallets_global
            .or(params.min_pallets)
            .or(self.config.default_min_pallets)
    }

    /// 运行完整流水线
    ///
    /// # 返回
    /// - Err(InvalidPeriod): 任一行观察期无效
    /// - Err(EmptyAllocationBase): 全局模式下总权重为 0（可改用 compute_signals）
    /// - Err(NegativeAllocation): 残差修正产生负数
    #[instrument(skip(self, table), fields(rows = table.len(), schema = %table.schema))]
    pub fn run(&self, table: &ValidatedTable, params: &RunParams) -> EngineResult<ReorderReport> {
        info!("开始补货计算");

        // ===== Step 1: 单行指标 =====
        let metrics = self.calculator.compute_batch(&table.rows, params.today)?;
        debug!(
            reorder_rows = metrics.iter().filter(|m| m.should_reorder).count(),
            "Step 1 完成: 单行指标"
        );

        // ===== Step 2: 预算与模式 =====
        let budget = self.resolve_budget(table, params);
        let mode = match budget {
            Some(_) => AllocationMode::GlobalBudget,
            None => AllocationMode::PerSkuPallet,
        };
        debug!(mode = %mode, budget = ?budget, "Step 2 完成: 模式判定");

        // ===== Step 3: 订货量 =====
        let records = match budget {
            Some(budget) => self.allocate_global(table, metrics, budget)?,
            None => self.round_per_sku(table, metrics),
        };

        let report = ReorderReport {
            schema: table.schema,
            mode,
            today: params.today,
            min_pallets_global: budget,
            records,
        };

        info!(
            rows = report.len(),
            reorder_rows = report.reorder_count(),
            mode = %report.mode,
            "补货计算完成"
        );
        Ok(report)
    }

    /// 运行流水线,分配基数为空时降级为仅输出补货信号
    ///
    /// 其他引擎错误照常返回
    pub fn run_or_signals(
        &self,
        table: &ValidatedTable,
        params: &RunParams,
    ) -> EngineResult<RunOutcome> {
        match self.run(table, params) {
            Ok(report) => Ok(RunOutcome {
                report,
                fallback: None,
            }),
            Err(e @ EngineError::EmptyAllocationBase { .. }) => {
                warn!(error = %e, "分配阶段失败,改为仅输出补货信号");
                Ok(RunOutcome {
                    report: self.compute_signals(table, params.today)?,
                    fallback: Some(e),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// 仅计算补货信号（不产生订货量）
    ///
    /// 用于分配阶段失败时仍向调用方报告单行指标
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn compute_signals(
        &self,
        table: &ValidatedTable,
        today: NaiveDate,
    ) -> EngineResult<ReorderReport> {
        let metrics = self.calculator.compute_batch(&table.rows, today)?;
        let records = table
            .rows
            .iter()
            .zip(metrics)
            .map(|(row, metrics)| ReorderRecord {
                row: row.clone(),
                metrics,
                allocated_pallets: None,
                boxes_to_order: None,
            })
            .collect();

        Ok(ReorderReport {
            schema: table.schema,
            mode: AllocationMode::SignalOnly,
            today,
            min_pallets_global: table.min_pallets_global,
            records,
        })
    }

    // ==========================================
    // 订货量策略（两种模式互斥）
    // ==========================================

    /// 按 SKU 托盘规格取整
    fn round_per_sku(
        &self,
        table: &ValidatedTable,
        metrics: Vec<ReorderMetrics>,
    ) -> Vec<ReorderRecord> {
        table
            .rows
            .iter()
            .zip(metrics)
            .map(|(row, metrics)| {
                let boxes = self.calculator.boxes_to_order(
                    metrics.reorder_point,
                    row.on_hand_boxes,
                    row.pallet_size_boxes,
                );
                ReorderRecord {
                    row: row.clone(),
                    metrics,
                    allocated_pallets: None,
                    boxes_to_order: Some(boxes),
                }
            })
            .collect()
    }

    /// 全局托盘预算分配
    fn allocate_global(
        &self,
        table: &ValidatedTable,
        metrics: Vec<ReorderMetrics>,
        budget: u32,
    ) -> EngineResult<Vec<ReorderRecord>> {
        let candidates: Vec<AllocationCandidate<'_>> = table
            .rows
            .iter()
            .zip(&metrics)
            .map(|(row, m)| AllocationCandidate {
                sku: &row.sku,
                row_number: row.row_number,
                weight: m.weight,
            })
            .collect();

        let allocation = self.allocator.allocate(&candidates, budget)?;
        debug!(
            total_weight = allocation.total_weight,
            residual = allocation.residual,
            "托盘分配完成"
        );

        let pallet_size = self.config.global_pallet_size_boxes;
        Ok(table
            .rows
            .iter()
            .zip(metrics)
            .zip(allocation.allocated)
            .map(|((row, metrics), pallets)| ReorderRecord {
                row: row.clone(),
                metrics,
                allocated_pallets: Some(pallets),
                boxes_to_order: Some(pallets as f64 * pallet_size),
            })
            .collect())
    }
}
