// ==========================================
// ReorderPro - 输入模板
// ==========================================
// 西语规范表头 + 两行样例（乘法安全系数口径,含全局托盘预算）
// ==========================================

use crate::exporter::ExportResult;
use std::path::Path;
use tracing::info;

const TEMPLATE_HEADER: &str = "Producto,Inventario_actual_cajas,Ventas_totales_ultimos_meses,Periodo_dias,Lead_time_dias,Factor_seguridad,Minimo_paletas";

const TEMPLATE_ROWS: [&str; 2] = ["4387,892,2189,210,60,1.3,10", "4417,1174,1810,210,60,1.3,10"];

/// 模板 CSV 文本
pub fn template_csv() -> String {
    let mut out = String::from(TEMPLATE_HEADER);
    out.push('\n');
    for row in TEMPLATE_ROWS {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// 写出模板文件
pub fn write_template<P: AsRef<Path>>(path: P) -> ExportResult<()> {
    std::fs::write(path.as_ref(), template_csv())?;
    info!(path = %path.as_ref().display(), "模板已写出");
    Ok(())
}
