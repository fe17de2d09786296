// ==========================================
// ReorderPro - 配置层
// ==========================================
// 职责: 引擎参数与默认值
// ==========================================

pub mod engine_config;

pub use engine_config::{ConfigError, EngineConfig, CONFIG_ENV_VAR};
