// ==========================================
// 燃料月报汇总 - 命令行入口
// ==========================================
// 用法:
//   fuel-report [--config FILE] [--lang zh-CN|en] run assay|weighing|all
//   fuel-report preview assay|weighing
//   fuel-report init [--write-config FILE]
// ==========================================

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fuel_report::i18n::{set_locale, t_with_args};
use fuel_report::{
    preview_report, ChannelSink, ConfigManager, ReportConfig, ReportError, ReportJobRunner,
    ReportKind,
};
use std::path::PathBuf;
use std::sync::Arc;

/// 燃料月报汇总 - 化验/称重月报数据处理
#[derive(Parser, Debug)]
#[command(name = "fuel-report", version, about)]
struct Cli {
    /// 配置文件（JSON）
    #[arg(long, env = "FUEL_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// 界面语言
    #[arg(long, default_value = "zh-CN", value_parser = ["zh-CN", "en"])]
    lang: String,

    /// 默认日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 执行汇总任务
    Run {
        #[arg(value_enum)]
        target: RunTarget,
    },
    /// 以 JSON 输出已生成工作簿的预览
    Preview {
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// 创建输入目录，可选写出默认配置
    Init {
        #[arg(long)]
        write_config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RunTarget {
    Assay,
    Weighing,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Assay,
    Weighing,
}

impl From<KindArg> for ReportKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Assay => ReportKind::Assay,
            KindArg::Weighing => ReportKind::Weighing,
        }
    }
}

impl RunTarget {
    fn kinds(self) -> Vec<ReportKind> {
        match self {
            RunTarget::Assay => vec![ReportKind::Assay],
            RunTarget::Weighing => vec![ReportKind::Weighing],
            RunTarget::All => ReportKind::ALL.to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    fuel_report::logging::init_with_default(&cli.log_level);
    set_locale(&cli.lang);

    tracing::info!("{} v{}", fuel_report::APP_NAME, fuel_report::VERSION);

    let config = ConfigManager::load(cli.config.as_deref())?.into_config();

    match cli.command {
        Command::Run { target } => run(&config, target).await,
        Command::Preview { kind } => preview(&config, kind.into()),
        Command::Init { write_config } => init(&config, write_config),
    }
}

async fn run(config: &ReportConfig, target: RunTarget) -> Result<()> {
    let runner = ReportJobRunner::new();
    let mut failures = 0usize;

    for kind in target.kinds() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let job = match runner.spawn(kind, config.clone(), Arc::new(ChannelSink(tx))) {
            Ok(job) => job,
            Err(ReportError::JobAlreadyRunning(kind)) => {
                let report = fuel_report::i18n::t(&format!("report.{}", kind.as_str()));
                eprintln!("{}", t_with_args("cli.job_busy", &[("report", &report)]));
                failures += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        // 发送端随任务结束而释放，接收循环随之退出
        while let Some(event) = rx.recv().await {
            println!("{}", event.message());
        }

        match job.wait().await {
            Ok(summary) => {
                println!(
                    "{}",
                    t_with_args(
                        "cli.summary",
                        &[
                            ("processed", &summary.processed.len().to_string()),
                            ("skipped", &summary.skipped.len().to_string()),
                            ("rows", &summary.rows.to_string()),
                        ],
                    )
                );
            }
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "汇总任务失败");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} 个任务失败", failures));
    }
    Ok(())
}

fn preview(config: &ReportConfig, kind: ReportKind) -> Result<()> {
    match preview_report(kind, config) {
        Ok(sheets) => {
            println!("{}", serde_json::to_string_pretty(&sheets)?);
            Ok(())
        }
        Err(ReportError::WorkbookNotFound(path)) => {
            eprintln!("{}", t_with_args("cli.preview_missing", &[("path", &path)]));
            Err(anyhow!(ReportError::WorkbookNotFound(path)))
        }
        Err(e) => Err(e.into()),
    }
}

fn init(config: &ReportConfig, write_config: Option<PathBuf>) -> Result<()> {
    config.ensure_input_dirs()?;
    for kind in ReportKind::ALL {
        let dir = config.settings(kind).input_dir.display().to_string();
        println!("{}", t_with_args("cli.init_done", &[("dir", &dir)]));
    }
    if let Some(path) = write_config {
        ConfigManager::write_defaults(&path)?;
    }
    Ok(())
}
