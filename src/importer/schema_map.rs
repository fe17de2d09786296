// ==========================================
// ReorderPro - 列名映射表
// ==========================================
// 职责: 多语言表头 → 标准字段（声明式别名表）+ 安全库存口径判定
// 红线: 口径只按列是否存在判定,不按数值猜测
// ==========================================

use crate::domain::types::SafetySchema;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// CanonicalField - 标准字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Sku,
    OnHandBoxes,
    PeriodSalesBoxes,
    PeriodDays,
    LeadTimeDays,
    SafetyFactor,
    SafetyDays,
    PalletSizeBoxes,
    MinPalletsGlobal,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::Sku,
        CanonicalField::OnHandBoxes,
        CanonicalField::PeriodSalesBoxes,
        CanonicalField::PeriodDays,
        CanonicalField::LeadTimeDays,
        CanonicalField::SafetyFactor,
        CanonicalField::SafetyDays,
        CanonicalField::PalletSizeBoxes,
        CanonicalField::MinPalletsGlobal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::Sku => "sku",
            CanonicalField::OnHandBoxes => "on_hand_boxes",
            CanonicalField::PeriodSalesBoxes => "period_sales_boxes",
            CanonicalField::PeriodDays => "period_days",
            CanonicalField::LeadTimeDays => "lead_time_days",
            CanonicalField::SafetyFactor => "safety_factor",
            CanonicalField::SafetyDays => "safety_days",
            CanonicalField::PalletSizeBoxes => "pallet_size_boxes",
            CanonicalField::MinPalletsGlobal => "min_pallets_global",
        }
    }

    /// 可接受的表头别名（第一个为西语标准列名）
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Sku => &[
                "Producto",
                "Codigo",
                "Código",
                "SKU or Item Code",
                "SKU",
                "Item Code",
                "Item",
                "sku",
            ],
            CanonicalField::OnHandBoxes => &[
                "Inventario_actual_cajas",
                "Inventario actual (cajas)",
                "Current Inventory (boxes)",
                "Current Inventory Boxes",
                "On Hand Boxes",
                "on_hand_boxes",
            ],
            CanonicalField::PeriodSalesBoxes => &[
                "Ventas_totales_ultimos_meses",
                "Ventas totales (cajas)",
                "Total Sales Last Months",
                "Total Sales (boxes)",
                "Period Sales Boxes",
                "period_sales_boxes",
            ],
            CanonicalField::PeriodDays => &[
                "Periodo_dias",
                "Periodo (dias)",
                "Period (days)",
                "Period Days",
                "period_days",
            ],
            CanonicalField::LeadTimeDays => &[
                "Lead_time_dias",
                "Lead time (dias)",
                "Lead Time (days)",
                "Lead Time Days",
                "lead_time_days",
            ],
            CanonicalField::SafetyFactor => &[
                "Factor_seguridad",
                "Factor de seguridad",
                "Safety Factor",
                "safety_factor",
            ],
            CanonicalField::SafetyDays => &[
                "Dias_seguridad",
                "Dias de seguridad",
                "Safety Days",
                "Safety Stock (days)",
                "safety_days",
            ],
            CanonicalField::PalletSizeBoxes => &[
                "Cajas_por_paleta",
                "Cajas por paleta",
                "Boxes per Pallet",
                "Pallet Size (boxes)",
                "pallet_size_boxes",
            ],
            CanonicalField::MinPalletsGlobal => &[
                "Minimo_paletas",
                "Minimo de paletas",
                "Minimum Pallets",
                "Min Pallets",
                "min_pallets_global",
            ],
        }
    }

    /// 表头是否命中本字段（忽略首尾空白与大小写）
    pub fn matches(&self, header: &str) -> bool {
        let normalized = normalize_header(header);
        self.aliases()
            .iter()
            .any(|alias| normalize_header(alias) == normalized)
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// 各口径的必需列
pub fn required_fields(schema: SafetySchema) -> &'static [CanonicalField] {
    match schema {
        SafetySchema::Multiplicative => &[
            CanonicalField::Sku,
            CanonicalField::OnHandBoxes,
            CanonicalField::PeriodSalesBoxes,
            CanonicalField::PeriodDays,
            CanonicalField::LeadTimeDays,
            CanonicalField::SafetyFactor,
        ],
        SafetySchema::AdditiveDays => &[
            CanonicalField::Sku,
            CanonicalField::OnHandBoxes,
            CanonicalField::PeriodSalesBoxes,
            CanonicalField::PeriodDays,
            CanonicalField::LeadTimeDays,
            CanonicalField::SafetyDays,
        ],
    }
}

// ==========================================
// ColumnIndex - 标准字段 → 列下标
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnIndex {
    positions: HashMap<CanonicalField, usize>,
}

impl ColumnIndex {
    /// 从表头构建索引（同一字段多列命中时取最左列）
    pub fn from_headers(headers: &[String]) -> Self {
        let mut positions = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(field) = CanonicalField::ALL.iter().find(|f| f.matches(header)) {
                positions.entry(*field).or_insert(idx);
            }
        }
        debug!(mapped = positions.len(), total = headers.len(), "表头映射完成");
        Self { positions }
    }

    pub fn position(&self, field: CanonicalField) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.positions.contains_key(&field)
    }

    /// 判定安全库存口径
    ///
    /// # 规则
    /// - forced 非空 → 使用指定口径,但该口径的必需列必须齐全
    /// - 只有 safety_factor → Multiplicative
    /// - 只有 safety_days → AdditiveDays
    /// - 两者都有 → AmbiguousSchema（不混用公式）
    /// - 两者都没有 → SchemaMismatch
    pub fn resolve_schema(&self, forced: Option<SafetySchema>) -> ImportResult<SafetySchema> {
        let has_factor = self.contains(CanonicalField::SafetyFactor);
        let has_days = self.contains(CanonicalField::SafetyDays);

        let schema = match (forced, has_factor, has_days) {
            (Some(schema), _, _) => schema,
            (None, true, false) => SafetySchema::Multiplicative,
            (None, false, true) => SafetySchema::AdditiveDays,
            (None, true, true) => {
                return Err(ImportError::AmbiguousSchema {
                    columns: vec![
                        CanonicalField::SafetyFactor.name().to_string(),
                        CanonicalField::SafetyDays.name().to_string(),
                    ],
                })
            }
            (None, false, false) => {
                // 默认按原始模板口径报缺列
                SafetySchema::Multiplicative
            }
        };

        self.check_required(schema)?;
        Ok(schema)
    }

    /// 校验必需列齐全,缺失时一次性列出全部缺列
    pub fn check_required(&self, schema: SafetySchema) -> ImportResult<()> {
        let missing: Vec<String> = required_fields(schema)
            .iter()
            .filter(|f| !self.contains(**f))
            .map(|f| f.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::SchemaMismatch {
                schema: schema.to_string(),
                missing,
            });
        }

        // 追加天数口径下不允许再出现系数列
        if schema == SafetySchema::AdditiveDays && self.contains(CanonicalField::SafetyFactor) {
            return Err(ImportError::AmbiguousSchema {
                columns: vec![
                    CanonicalField::SafetyFactor.name().to_string(),
                    CanonicalField::SafetyDays.name().to_string(),
                ],
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn spanish_headers() -> Vec<String> {
        headers(&[
            "Producto",
            "Inventario_actual_cajas",
            "Ventas_totales_ultimos_meses",
            "Periodo_dias",
            "Lead_time_dias",
            "Factor_seguridad",
            "Minimo_paletas",
        ])
    }

    #[test]
    fn test_spanish_canonical_headers() {
        let index = ColumnIndex::from_headers(&spanish_headers());
        assert_eq!(index.position(CanonicalField::Sku), Some(0));
        assert_eq!(index.position(CanonicalField::SafetyFactor), Some(5));
        assert_eq!(index.position(CanonicalField::MinPalletsGlobal), Some(6));
        assert_eq!(
            index.resolve_schema(None).unwrap(),
            SafetySchema::Multiplicative
        );
    }

    #[test]
    fn test_english_headers_case_insensitive() {
        let index = ColumnIndex::from_headers(&headers(&[
            "sku or item code",
            " Current Inventory (boxes) ",
            "Total Sales (boxes)",
            "Period (days)",
            "Lead Time (days)",
            "Safety Days",
        ]));
        assert_eq!(index.position(CanonicalField::Sku), Some(0));
        assert_eq!(index.position(CanonicalField::OnHandBoxes), Some(1));
        assert_eq!(
            index.resolve_schema(None).unwrap(),
            SafetySchema::AdditiveDays
        );
    }

    #[test]
    fn test_missing_columns_are_all_named() {
        let index = ColumnIndex::from_headers(&headers(&["Producto", "Inventario_actual_cajas"]));
        match index.resolve_schema(None) {
            Err(ImportError::SchemaMismatch { missing, .. }) => {
                assert_eq!(
                    missing,
                    vec![
                        "period_sales_boxes",
                        "period_days",
                        "lead_time_days",
                        "safety_factor"
                    ]
                );
            }
            other => panic!("期望 SchemaMismatch, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_both_safety_columns_is_ambiguous() {
        let mut names = spanish_headers();
        names.push("Dias_seguridad".to_string());
        let index = ColumnIndex::from_headers(&names);
        assert!(matches!(
            index.resolve_schema(None),
            Err(ImportError::AmbiguousSchema { .. })
        ));
    }

    #[test]
    fn test_forced_additive_rejects_factor_table() {
        let index = ColumnIndex::from_headers(&spanish_headers());
        match index.resolve_schema(Some(SafetySchema::AdditiveDays)) {
            Err(ImportError::SchemaMismatch { missing, .. }) => {
                assert_eq!(missing, vec!["safety_days"]);
            }
            other => panic!("期望 SchemaMismatch, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_alias_keeps_leftmost_column() {
        let index = ColumnIndex::from_headers(&headers(&["SKU", "Producto"]));
        assert_eq!(index.position(CanonicalField::Sku), Some(0));
    }
}
