// ==========================================
// InventoryImporter 集成测试
// ==========================================
// 测试目标: 文件 → 列映射 → 口径判定 → 行校验 的完整流程
// ==========================================


use reorder_pro::importer::{ImportError, InventoryImporter};
use reorder_pro::logging;
use reorder_pro::{SafetyMargin, SafetySchema};
use std::io::Write;
use test_helpers::{sample_table, InventoryCsvBuilder};

#[test]
fn test_import_sample_file() {
    logging::init_test();
    let file = sample_table().write_temp();

    let table = InventoryImporter::default().import_file(file.path()).unwrap();

    assert_eq!(table.schema, SafetySchema::Multiplicative);
    assert_eq!(table.len(), 2);
    assert_eq!(table.min_pallets_global, Some(10));
    assert_eq!(table.rows[1].sku, "4417");
    assert_eq!(table.rows[1].on_hand_boxes, 1174.0);
    assert_eq!(table.rows[1].safety, SafetyMargin::Factor(1.3));
    // 无托盘列 → 默认 225
    assert_eq!(table.rows[0].pallet_size_boxes, 225.0);
    // 原始表保留
    assert_eq!(table.source.headers[0], "Producto");
    assert_eq!(table.source.rows[0].cells[0], "4387");
}

#[test]
fn test_import_english_headers() {
    let csv = InventoryCsvBuilder::with_header(
        "SKU or Item Code,Current Inventory (boxes),Total Sales Last Months,Period (days),Lead Time (days),Safety Stock (days),Boxes per Pallet",
    )
    .row(&["X-1", "40", "300", "30", "5", "2", "50"])
    .build();

    let table = InventoryImporter::default().import_csv_str(&csv).unwrap();
    assert_eq!(table.schema, SafetySchema::AdditiveDays);
    assert_eq!(table.rows[0].sku, "X-1");
    assert_eq!(table.rows[0].safety, SafetyMargin::Days(2.0));
    assert_eq!(table.rows[0].pallet_size_boxes, 50.0);
    assert_eq!(table.min_pallets_global, None);
}

#[test]
fn test_missing_columns_are_all_named() {
    let csv = InventoryCsvBuilder::with_header("Producto,Inventario_actual_cajas,Factor_seguridad")
        .row(&["A", "1", "1.3"])
        .build();

    match InventoryImporter::default().import_csv_str(&csv) {
        Err(ImportError::SchemaMismatch { schema, missing }) => {
            assert_eq!(schema, "multiplicative");
            assert_eq!(
                missing,
                vec!["period_sales_boxes", "period_days", "lead_time_days"]
            );
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_both_safety_columns_is_ambiguous() {
    let csv = InventoryCsvBuilder::factor()
        .extra_column("Dias_seguridad")
        .row(&["A", "1", "30", "30", "5", "1.3", "2"])
        .build();

    assert!(matches!(
        InventoryImporter::default().import_csv_str(&csv),
        Err(ImportError::AmbiguousSchema { .. })
    ));
}

#[test]
fn test_forced_schema_requires_its_columns() {
    let csv = sample_table().build();
    let importer = InventoryImporter::with_defaults(225.0, Some(SafetySchema::AdditiveDays));

    match importer.import_csv_str(&csv) {
        Err(ImportError::SchemaMismatch { missing, .. }) => {
            assert_eq!(missing, vec!["safety_days"]);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_unparseable_cell_fails_whole_table() {
    let csv = InventoryCsvBuilder::factor()
        .row(&["A", "10", "300", "30", "5", "1.3"])
        .row(&["B", "diez", "300", "30", "5", "1.3"])
        .build();

    match InventoryImporter::default().import_csv_str(&csv) {
        Err(ImportError::InvalidNumericValue { row, field, value }) => {
            assert_eq!(row, 2);
            assert_eq!(field, "on_hand_boxes");
            assert_eq!(value, "diez");
        }
        other => panic!("expected InvalidNumericValue, got {:?}", other),
    }
}

#[test]
fn test_blank_required_cell_is_not_zero() {
    let csv = InventoryCsvBuilder::factor()
        .row(&["A", "10", "", "30", "5", "1.3"])
        .build();

    assert!(matches!(
        InventoryImporter::default().import_csv_str(&csv),
        Err(ImportError::InvalidNumericValue { row: 1, .. })
    ));
}

#[test]
fn test_min_pallets_first_row_wins() {
    let csv = InventoryCsvBuilder::factor()
        .extra_column("Minimo_paletas")
        .row(&["A", "10", "300", "30", "5", "1.3", "12"])
        .row(&["B", "10", "300", "30", "5", "1.3", "99"])
        .build();

    let table = InventoryImporter::default().import_csv_str(&csv).unwrap();
    assert_eq!(table.min_pallets_global, Some(12));
}

#[test]
fn test_min_pallets_must_be_positive_integer() {
    for bad in ["0", "2.5"] {
        let csv = InventoryCsvBuilder::factor()
            .extra_column("Minimo_paletas")
            .row(&["A", "10", "300", "30", "5", "1.3", bad])
            .build();
        assert!(
            InventoryImporter::default().import_csv_str(&csv).is_err(),
            "min_pallets {} should be rejected",
            bad
        );
    }
}

#[test]
fn test_blank_rows_are_skipped() {
    let csv = format!(
        "{}\n,,,,,\n",
        InventoryCsvBuilder::factor()
            .row(&["A", "10", "300", "30", "5", "1.3"])
            .build()
            .trim_end()
    );

    let table = InventoryImporter::default().import_csv_str(&csv).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_error_row_counts_skipped_blank_rows() {
    let csv = InventoryCsvBuilder::factor()
        .row(&["A", "10", "300", "30", "5", "1.3"])
        .row(&["", "", "", "", "", ""])
        .row(&["B", "diez", "300", "30", "5", "1.3"])
        .build();

    // 空白行被跳过,但报错仍指向文件中的第 3 个数据行
    assert!(matches!(
        InventoryImporter::default().import_csv_str(&csv),
        Err(ImportError::InvalidNumericValue { row: 3, .. })
    ));
}

#[test]
fn test_row_wider_than_header_is_rejected() {
    let csv = InventoryCsvBuilder::factor()
        .row(&["A", "10", "300", "30", "5", "1.3"])
        .row(&["B", "10", "300", "30", "5", "1.3", "225"])
        .build();

    match InventoryImporter::default().import_csv_str(&csv) {
        Err(ImportError::ExtraFields { row, expected, found }) => {
            assert_eq!(row, 2);
            assert_eq!(expected, 6);
            assert_eq!(found, 7);
        }
        other => panic!("expected ExtraFields, got {:?}", other),
    }
}

#[test]
fn test_unsupported_extension() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "{}", sample_table().build()).unwrap();

    assert!(matches!(
        InventoryImporter::default().import_file(file.path()),
        Err(ImportError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        InventoryImporter::default().import_file("/nonexistent/inventario.csv"),
        Err(ImportError::FileNotFound(_))
    ));
}
