// ==========================================
// 飞行排班消冲系统 - 命令行入口
// ==========================================
// 用法:
//   sortie-deconflict <schedule.txt> [--config path] [--csv out.csv] [--json out.json] [--log-json]
//
// schedule.txt: 排班文档抽取出的 UTF-8 文本, 页之间以分页符 (\f) 分隔
// ==========================================

use anyhow::{bail, Context};
use sortie_deconflict::config::ConfigManager;
use sortie_deconflict::importer::TextFilePageSource;
use sortie_deconflict::pipeline::{DeconflictionPipeline, PipelineError};
use sortie_deconflict::report::{export_assignment_csv, export_json};
use sortie_deconflict::{logging, APP_NAME, VERSION};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Default)]
struct CliArgs {
    schedule: PathBuf,
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    log_json: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();
    let mut schedule = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().context("--config 缺少路径")?.into()),
            "--csv" => parsed.csv = Some(args.next().context("--csv 缺少路径")?.into()),
            "--json" => parsed.json = Some(args.next().context("--json 缺少路径")?.into()),
            "--log-json" => parsed.log_json = true,
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => schedule = Some(PathBuf::from(other)),
        }
    }

    parsed.schedule = schedule.context(
        "用法: sortie-deconflict <schedule.txt> [--config path] [--csv out.csv] [--json out.json]",
    )?;
    Ok(parsed)
}

fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = Arc::new(manager.load().context("资源配置加载失败")?);
    let prefix = config.squadron_prefix.clone();

    let pipeline = DeconflictionPipeline::new(config)?;
    let source = TextFilePageSource::new(&args.schedule);

    let report = match pipeline.run_provider(&source) {
        Ok(report) => report,
        Err(PipelineError::NoFlightsFound) => {
            eprintln!("未在 {} 中识别到任何航班", args.schedule.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("排班处理失败"),
    };

    print!("{}", report.summary);
    for conflict in &report.outcome.conflicts {
        println!("[{}] {}", conflict.kind, conflict.message);
    }

    if let Some(path) = &args.csv {
        export_assignment_csv(&report.outcome, &prefix, path)
            .with_context(|| format!("CSV 导出失败: {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        export_json(&report.outcome, &report.summary, path)
            .with_context(|| format!("JSON 导出失败: {}", path.display()))?;
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(2);
        }
    };

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", APP_NAME, VERSION);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
