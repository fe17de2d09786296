// ==========================================
// ReorderPro - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 整表失败,不做部分处理
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("文件无表头")]
    EmptyTable,

    #[error("行字段数超出表头 (行 {row}): 表头 {expected} 列, 实际 {found} 列")]
    ExtraFields {
        row: usize,
        expected: usize,
        found: usize,
    },

    // ===== 表结构错误 =====
    #[error("表结构不匹配 (口径 {schema}): 缺少列 {}", .missing.join(", "))]
    SchemaMismatch {
        schema: String,
        missing: Vec<String>,
    },

    #[error("表结构歧义: 同时存在 {}，无法确定安全库存口径", .columns.join(" 与 "))]
    AmbiguousSchema { columns: Vec<String> },

    // ===== 数据质量错误 =====
    #[error("主键缺失 (行 {0}): sku 为空")]
    PrimaryKeyMissing(usize),

    #[error("数值无效 (行 {row}, 字段 {field}): {value:?}")]
    InvalidNumericValue {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 需 {constraint}")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
        constraint: String,
    },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
