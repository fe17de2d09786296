// ==========================================
// ReorderPro - 引擎层
// ==========================================
// 单行指标计算 → 托盘分配 → 编排
// ==========================================

pub mod error;
pub mod orchestrator;
pub mod pallet_allocator;
pub mod row_metrics;

pub use error::{EngineError, EngineResult};
pub use orchestrator::{ReorderEngine, RunOutcome, RunParams};
pub use pallet_allocator::{AllocationCandidate, PalletAllocation, PalletAllocator};
pub use row_metrics::{RowMetricsCalculator, URGENCY_BASE, URGENCY_BOOST};
