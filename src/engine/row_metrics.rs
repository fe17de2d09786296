// ==========================================
// ReorderPro - 单行指标计算器
// ==========================================
// 职责: 日销量 / 补货点 / 补货标志 / 断货天数 / 紧急系数 / 权重
//       / 按托盘取整的订货箱数 / 最晚下单日
// 输入: InventoryRow + today
// 输出: ReorderMetrics
// 红线: 纯函数,行间无共享状态; NaN/Inf 不得流入下游
// ==========================================

use crate::domain::inventory::{InventoryRow, ReorderMetrics};
use crate::domain::types::SafetyMargin;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Days, NaiveDate};
use tracing::instrument;

/// 预计在交货期内跌破补货点时的权重抬升系数
pub const URGENCY_BOOST: f64 = 1.3;

/// 未触发紧急条件时的系数
pub const URGENCY_BASE: f64 = 1.0;

// ==========================================
// RowMetricsCalculator - 单行指标计算器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct RowMetricsCalculator;

impl RowMetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 批量计算（逐行独立,首个失败行即返回）
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub fn compute_batch(
        &self,
        rows: &[InventoryRow],
        today: NaiveDate,
    ) -> EngineResult<Vec<ReorderMetrics>> {
        rows.iter().map(|row| self.compute(row, today)).collect()
    }

    /// 单行计算
    pub fn compute(&self, row: &InventoryRow, today: NaiveDate) -> EngineResult<ReorderMetrics> {
        let daily_sales_rate = self.daily_sales_rate(row)?;
        let reorder_point = self.reorder_point(daily_sales_rate, row);
        let should_reorder = row.on_hand_boxes <= reorder_point;
        let days_until_breach =
            self.days_until_breach(row.on_hand_boxes, reorder_point, daily_sales_rate);
        let urgency_multiplier = self.urgency_multiplier(days_until_breach, row.lead_time_days);
        let weight = daily_sales_rate * urgency_multiplier;
        let order_by_date = self.order_by_date(today, days_until_breach);

        Ok(ReorderMetrics {
            daily_sales_rate,
            reorder_point,
            should_reorder,
            days_until_breach,
            urgency_multiplier,
            weight,
            order_by_date,
        })
    }

    // ==========================================
    // 分步公式
    // ==========================================

    /// 日销量 = 观察期销量 / 观察期天数
    pub fn daily_sales_rate(&self, row: &InventoryRow) -> EngineResult<f64> {
        if row.period_days <= 0.0 {
            return Err(EngineError::InvalidPeriod {
                row: row.row_number,
                sku: row.sku.clone(),
                period_days: row.period_days,
            });
        }
        Ok(row.period_sales_boxes / row.period_days)
    }

    /// 补货点（四舍六入五成双）
    ///
    /// - Factor: rate × lead_time × factor
    /// - Days:   rate × (lead_time + safety_days)
    ///
    /// 结果下限为 +0（不输出 -0）
    pub fn reorder_point(&self, daily_sales_rate: f64, row: &InventoryRow) -> f64 {
        let raw = match row.safety {
            SafetyMargin::Factor(factor) => daily_sales_rate * row.lead_time_days * factor,
            SafetyMargin::Days(days) => daily_sales_rate * (row.lead_time_days + days),
        };
        let rounded = raw.round_ties_even();
        if rounded > 0.0 {
            rounded
        } else {
            0.0
        }
    }

    /// 距跌破补货点的天数（日销量为 0 时无定义）
    pub fn days_until_breach(
        &self,
        on_hand_boxes: f64,
        reorder_point: f64,
        daily_sales_rate: f64,
    ) -> Option<f64> {
        if daily_sales_rate > 0.0 {
            Some((on_hand_boxes - reorder_point) / daily_sales_rate)
        } else {
            None
        }
    }

    /// 紧急系数: 交货期内跌破 → 1.3, 否则 1.0
    ///
    /// 无日销量时不抬升（权重本身为 0）
    pub fn urgency_multiplier(&self, days_until_breach: Option<f64>, lead_time_days: f64) -> f64 {
        match days_until_breach {
            Some(days) if days <= lead_time_days => URGENCY_BOOST,
            _ => URGENCY_BASE,
        }
    }

    /// 按托盘规格向上取整的订货箱数
    pub fn boxes_to_order(
        &self,
        reorder_point: f64,
        on_hand_boxes: f64,
        pallet_size_boxes: f64,
    ) -> f64 {
        let shortfall = (reorder_point - on_hand_boxes).max(0.0);
        if shortfall == 0.0 {
            return 0.0;
        }
        (shortfall / pallet_size_boxes).ceil() * pallet_size_boxes
    }

    /// 最晚下单日 = today + floor(max(days, 0))
    ///
    /// 无日销量 → today; 超出日历范围时取 NaiveDate::MAX
    pub fn order_by_date(&self, today: NaiveDate, days_until_breach: Option<f64>) -> NaiveDate {
        let days = match days_until_breach {
            Some(d) => d.max(0.0).floor(),
            None => return today,
        };
        if days >= u64::MAX as f64 {
            return NaiveDate::MAX;
        }
        today
            .checked_add_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn base_row() -> InventoryRow {
        InventoryRow {
            sku: "4387".to_string(),
            on_hand_boxes: 892.0,
            period_sales_boxes: 2189.0,
            period_days: 210.0,
            lead_time_days: 60.0,
            safety: SafetyMargin::Factor(1.3),
            pallet_size_boxes: 225.0,
            row_number: 1,
        }
    }

    #[test]
    fn test_scenario_a_sample_row() {
        let calc = RowMetricsCalculator::new();
        let m = calc.compute(&base_row(), today()).unwrap();

        assert!((m.daily_sales_rate - 10.4238).abs() < 1e-4);
        // 2189 / 210 × 60 × 1.3 = 813.057...
        assert_eq!(m.reorder_point, 813.0);
        assert!(!m.should_reorder);

        // (892 - 813) / 10.4238 ≈ 7.58 天 <= 60 → 抬升
        let days = m.days_until_breach.unwrap();
        assert!((days - 7.5788).abs() < 1e-3);
        assert_eq!(m.urgency_multiplier, URGENCY_BOOST);
        assert!((m.weight - m.daily_sales_rate * 1.3).abs() < 1e-12);
        assert_eq!(m.order_by_date, NaiveDate::from_ymd_opt(2026, 1, 22).unwrap());
    }

    #[test]
    fn test_scenario_d_zero_period() {
        let mut row = base_row();
        row.period_days = 0.0;

        let result = RowMetricsCalculator::new().compute(&row, today());
        assert!(matches!(
            result,
            Err(EngineError::InvalidPeriod { row: 1, .. })
        ));
    }

    #[test]
    fn test_negative_period_is_invalid() {
        let mut row = base_row();
        row.period_days = -7.0;
        assert!(RowMetricsCalculator::new().daily_sales_rate(&row).is_err());
    }

    #[test]
    fn test_scenario_e_round_up_to_pallet() {
        let calc = RowMetricsCalculator::new();
        // 缺口 130 箱 → 1 托 = 225 箱
        assert_eq!(calc.boxes_to_order(1130.0, 1000.0, 225.0), 225.0);
        // 缺口恰好 2 托
        assert_eq!(calc.boxes_to_order(450.0, 0.0, 225.0), 450.0);
        // 无缺口
        assert_eq!(calc.boxes_to_order(800.0, 892.0, 225.0), 0.0);
        assert_eq!(calc.boxes_to_order(892.0, 892.0, 225.0), 0.0);
    }

    #[test]
    fn test_additive_days_formula() {
        let mut row = base_row();
        row.period_sales_boxes = 300.0;
        row.period_days = 30.0;
        row.lead_time_days = 5.0;
        row.safety = SafetyMargin::Days(2.0);
        row.on_hand_boxes = 70.0;

        let m = RowMetricsCalculator::new().compute(&row, today()).unwrap();
        // 10 × (5 + 2) = 70
        assert_eq!(m.reorder_point, 70.0);
        // 等于补货点时也要补货
        assert!(m.should_reorder);
        assert_eq!(m.days_until_breach, Some(0.0));
        assert_eq!(m.order_by_date, today());
    }

    #[test]
    fn test_reorder_point_ties_to_even() {
        let mut row = base_row();
        // rate = 1, lead = 2.5, factor = 1 → 2.5 → 2
        row.period_sales_boxes = 10.0;
        row.period_days = 10.0;
        row.lead_time_days = 2.5;
        row.safety = SafetyMargin::Factor(1.0);
        let calc = RowMetricsCalculator::new();
        assert_eq!(calc.reorder_point(1.0, &row), 2.0);

        row.lead_time_days = 3.5;
        assert_eq!(calc.reorder_point(1.0, &row), 4.0);
    }

    #[test]
    fn test_reorder_point_never_negative_zero() {
        let mut row = base_row();
        row.lead_time_days = 1.0;
        row.safety = SafetyMargin::Factor(-1.0);
        let calc = RowMetricsCalculator::new();

        // 0.1 × 1 × -1 = -0.1 → round → -0 → 归一为 +0
        let rp = calc.reorder_point(0.1, &row);
        assert_eq!(rp, 0.0);
        assert!(rp.is_sign_positive());
        assert_eq!(rp.to_string(), "0");

        row.safety = SafetyMargin::Factor(-30.0);
        assert!(calc.reorder_point(0.1, &row).is_sign_positive());
    }

    #[test]
    fn test_zero_sales_rate() {
        let mut row = base_row();
        row.period_sales_boxes = 0.0;

        let m = RowMetricsCalculator::new().compute(&row, today()).unwrap();
        assert_eq!(m.daily_sales_rate, 0.0);
        assert_eq!(m.reorder_point, 0.0);
        assert!(!m.should_reorder);
        assert_eq!(m.days_until_breach, None);
        assert_eq!(m.urgency_multiplier, URGENCY_BASE);
        assert_eq!(m.weight, 0.0);
        assert_eq!(m.order_by_date, today());
    }

    #[test]
    fn test_overdue_row_orders_today() {
        let mut row = base_row();
        row.on_hand_boxes = 100.0;

        let m = RowMetricsCalculator::new().compute(&row, today()).unwrap();
        assert!(m.should_reorder);
        assert!(m.days_until_breach.unwrap() < 0.0);
        assert_eq!(m.urgency_multiplier, URGENCY_BOOST);
        assert_eq!(m.order_by_date, today());
    }

    #[test]
    fn test_far_breach_not_urgent() {
        let mut row = base_row();
        row.on_hand_boxes = 5000.0;

        let m = RowMetricsCalculator::new().compute(&row, today()).unwrap();
        // (5000 - 813) / 10.42 ≈ 401 天 > 60
        assert_eq!(m.urgency_multiplier, URGENCY_BASE);
        assert_eq!(m.weight, m.daily_sales_rate);
    }

    #[test]
    fn test_order_by_date_saturates() {
        let calc = RowMetricsCalculator::new();
        assert_eq!(calc.order_by_date(today(), Some(1e18)), NaiveDate::MAX);
    }
}
