// ==========================================
// ReorderPro - 引擎配置
// ==========================================
// 存储: JSON 文件（可选）,缺省字段取默认值
// 优先级: --config > REORDER_PRO_CONFIG > 内置默认
// ==========================================

use crate::domain::types::SafetySchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "REORDER_PRO_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 表内无托盘规格列时的每托盘箱数
    pub default_pallet_size_boxes: f64,

    /// 全局预算模式下的每托盘箱数
    pub global_pallet_size_boxes: f64,

    /// 表内与调用方都未提供时的托盘预算（None = 按 SKU 托盘模式）
    pub default_min_pallets: Option<u32>,

    /// 强制安全库存口径（None = 按列判定）
    pub schema: Option<SafetySchema>,

    /// CLI 提示语言
    pub locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_pallet_size_boxes: crate::DEFAULT_PALLET_SIZE_BOXES,
            global_pallet_size_boxes: crate::DEFAULT_PALLET_SIZE_BOXES,
            default_min_pallets: None,
            schema: None,
            locale: "en".to_string(),
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        config.validate()?;
        info!(path = %path_str, "配置加载完成");
        Ok(config)
    }

    /// 解析配置来源
    ///
    /// # 参数
    /// - explicit: 命令行指定的路径
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);

        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load(path),
            None => {
                debug!("未指定配置文件,使用默认配置");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("default_pallet_size_boxes", self.default_pallet_size_boxes),
            ("global_pallet_size_boxes", self.global_pallet_size_boxes),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("需 > 0, 实际 {}", value),
                });
            }
        }

        if self.default_min_pallets == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "default_min_pallets".to_string(),
                message: "需 >= 1".to_string(),
            });
        }

        Ok(())
    }
}
