// ==========================================
// ReorderPro - 命令行入口
// ==========================================
// 子命令:
// - run:      导入 → 计算 → 写出结果
// - template: 写出输入模板
// - preview:  显示识别口径与前几行数据
// 退出码: 0 成功 / 1 失败 / 2 分配基数为空（仅写出补货信号）
// ==========================================

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use reorder_pro::exporter::{self, CsvExporter, JsonExporter, DEFAULT_OUTPUT_FILE};
use reorder_pro::i18n::{self, t, t_with_args};
use reorder_pro::{
    logging, AllocationMode, EngineConfig, InventoryImporter, ReorderEngine, ReorderReport,
    RunParams, SafetySchema,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

/// Reorder point and pallet allocation for inventory tables
#[derive(Parser)]
#[command(name = "reorder-pro")]
#[command(about = "reorder-pro - Reorder points and pallet allocation from sales history", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (JSON); falls back to REORDER_PRO_CONFIG
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute reorder signals and order quantities
    #[command(name = "run")]
    Run {
        /// Input table (.csv, .xlsx, .xls, .ods)
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Global pallet budget (overridden by a Minimo_paletas column)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        min_pallets: Option<u32>,

        /// Reference date (YYYY-MM-DD), defaults to the local date
        #[arg(long, value_name = "DATE", value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Force the safety schema instead of detecting it from columns
        #[arg(long, value_name = "SCHEMA")]
        schema: Option<SafetySchema>,

        /// Write the report as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Write the example input table
    #[command(name = "template")]
    Template {
        /// Output file
        #[arg(short, long, default_value = "plantilla_reorder.csv")]
        output: PathBuf,
    },

    /// Show the detected schema and the first rows of a table
    #[command(name = "preview")]
    Preview {
        /// Input table
        input: PathBuf,

        /// Number of rows to show
        #[arg(long, default_value = "5")]
        rows: usize,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{}: {}", s, e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_verbosity(cli.verbose);

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}: {:#}", t("common.error"), e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    let config = EngineConfig::resolve(cli.config.as_deref()).context("加载配置失败")?;
    i18n::set_locale(&config.locale);

    info!("{} v{}", reorder_pro::APP_NAME, reorder_pro::VERSION);

    match cli.command {
        Commands::Run {
            input,
            output,
            min_pallets,
            today,
            schema,
            json,
        } => {
            let params = RunParams::new(today.unwrap_or_else(|| Local::now().date_naive()))
                .with_min_pallets(min_pallets);
            run(config, &input, &output, params, schema, json)
        }
        Commands::Template { output } => {
            exporter::write_template(&output)
                .with_context(|| format!("写出模板失败: {}", output.display()))?;
            println!(
                "{}",
                t_with_args("template.written", &[("path", &output.display().to_string())])
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Preview { input, rows } => {
            preview(config, &input, rows)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ==========================================
// run 子命令
// ==========================================
fn run(
    config: EngineConfig,
    input: &Path,
    output: &Path,
    params: RunParams,
    schema: Option<SafetySchema>,
    json: bool,
) -> Result<ExitCode> {
    let importer =
        InventoryImporter::with_defaults(config.default_pallet_size_boxes, schema.or(config.schema));
    let table = importer
        .import_file(input)
        .with_context(|| format!("导入失败: {}", input.display()))?;

    let engine = ReorderEngine::new(config);
    let outcome = engine.run_or_signals(&table, &params)?;
    let code = match &outcome.fallback {
        Some(reason) => {
            eprintln!(
                "{}",
                t_with_args("run.signals_only", &[("reason", &reason.to_string())])
            );
            ExitCode::from(2)
        }
        None => ExitCode::SUCCESS,
    };
    let report = outcome.report;

    if json {
        JsonExporter::new().write_file(output, &report)?;
    } else {
        CsvExporter::new().write_file(output, &table.source, &report)?;
    }

    print_summary(&report);
    println!(
        "{}",
        t_with_args("run.written", &[("path", &output.display().to_string())])
    );
    Ok(code)
}

fn print_summary(report: &ReorderReport) {
    let summary = report.summary();
    println!("{}", t("summary.title"));
    println!(
        "  {}",
        t_with_args("summary.rows", &[("count", &summary.rows.to_string())])
    );
    println!(
        "  {}",
        t_with_args(
            "summary.reorder_rows",
            &[("count", &summary.reorder_rows.to_string())]
        )
    );
    println!(
        "  {}",
        t_with_args("summary.schema", &[("schema", summary.schema.as_str())])
    );
    println!(
        "  {}",
        t_with_args("summary.mode", &[("mode", &summary.mode.to_string())])
    );
    // SignalOnly 无订货量,不输出以下两行
    if let Some((count, budget)) = summary.allocated_pallets {
        println!(
            "  {}",
            t_with_args(
                "summary.pallets",
                &[("count", &count.to_string()), ("budget", &budget.to_string())]
            )
        );
    }
    if let Some(boxes) = summary.boxes_to_order {
        println!(
            "  {}",
            t_with_args("summary.boxes", &[("count", &boxes.to_string())])
        );
    }
}

// ==========================================
// preview 子命令
// ==========================================
fn preview(config: EngineConfig, input: &Path, rows: usize) -> Result<()> {
    let importer = InventoryImporter::with_defaults(config.default_pallet_size_boxes, config.schema);
    let table = importer
        .import_file(input)
        .with_context(|| format!("导入失败: {}", input.display()))?;

    println!("{}", t("preview.title"));
    println!(
        "  {}",
        t_with_args("preview.schema", &[("schema", table.schema.as_str())])
    );
    println!(
        "  {}",
        t_with_args("preview.rows", &[("count", &table.len().to_string())])
    );
    match table.min_pallets_global {
        Some(budget) => println!(
            "  {}",
            t_with_args("preview.budget", &[("budget", &budget.to_string())])
        ),
        None => println!("  {}", t("preview.no_budget")),
    }

    let engine = ReorderEngine::new(config);
    let mode = match engine.resolve_budget(&table, &RunParams::new(Local::now().date_naive())) {
        Some(_) => AllocationMode::GlobalBudget,
        None => AllocationMode::PerSkuPallet,
    };
    println!(
        "  {}",
        t_with_args("summary.mode", &[("mode", &mode.to_string())])
    );

    println!();
    println!("{}", table.source.headers.join(" | "));
    for raw in table.source.rows.iter().take(rows) {
        println!("{}", raw.cells.join(" | "));
    }
    Ok(())
}
