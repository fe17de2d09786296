// ==========================================
// ReorderPro - 统一错误类型
// ==========================================
// 各层错误汇总,调用方可按层匹配
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReorderError {
    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("计算失败: {0}")]
    Engine(#[from] EngineError),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

pub type ReorderResult<T> = Result<T, ReorderError>;
