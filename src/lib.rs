// ==========================================
// ReorderPro - 核心库
// ==========================================
// 用途: 按历史销量、交货期与安全余量估算各 SKU 补货点,
//       并按托盘规格或全局托盘预算给出订货量
// 定位: 单表、同步、无状态的纯计算流水线
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 文件解析与列映射
pub mod importer;

// 引擎层 - 补货点与托盘分配
pub mod engine;

// 导出层 - 结果表与模板
pub mod exporter;

// 配置层
pub mod config;

// 统一错误
pub mod error;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConfigError, EngineConfig};
pub use domain::{
    AllocationMode, InventoryRow, ReorderMetrics, ReorderRecord, ReorderReport, ReorderSummary,
    SafetyMargin, SafetySchema, ValidatedTable,
};
pub use engine::{
    EngineError, PalletAllocator, ReorderEngine, RowMetricsCalculator, RunOutcome, RunParams,
};
pub use error::{ReorderError, ReorderResult};
pub use exporter::{CsvExporter, ExportError, JsonExporter};
pub use importer::{ImportError, InventoryImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ReorderPro";

// 缺省每托盘箱数
pub const DEFAULT_PALLET_SIZE_BOXES: f64 = 225.0;
