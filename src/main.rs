use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use lingopair::config::Config;
use lingopair::i18n::LocaleNames;
use lingopair::orchestrator::Orchestrator;

#[derive(Parser)]
#[command(name = "lingopair", about = "端侧语言检测与翻译", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 交互式翻译会话（默认）
    Repl,
    /// 检测文本语言，按置信度输出候选
    Detect {
        text: String,
    },
    /// 翻译一段文本
    Translate {
        text: String,

        /// 源语言（省略则先检测）
        #[arg(long)]
        from: Option<String>,

        /// 目标语言（覆盖配置文件中的 target_locale）
        #[arg(long)]
        to: Option<String>,
    },
    /// 列出所有可显示的语言
    Languages,
    /// 交互式配置向导
    Setup,
    /// 初始化配置文件
    Init,
    /// 显示当前配置
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl().await?,
        Commands::Detect { text } => run_detect(&text).await?,
        Commands::Translate { text, from, to } => run_translate(&text, from, to).await?,
        Commands::Languages => run_languages()?,
        Commands::Setup => lingopair::config::run_setup()?,
        Commands::Init => run_init()?,
        Commands::Config => run_config()?,
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    Config::load_or_init().wrap_err("加载配置失败")
}

async fn run_repl() -> Result<()> {
    let config = load_config()?;
    let names = LocaleNames::new(config.display_locale());
    let provider = lingopair::providers::create_provider(&config.provider);
    let orchestrator = Orchestrator::new(provider, names, &config.default.target_locale);

    lingopair::channels::cli::run_repl(&orchestrator).await
}

async fn run_detect(text: &str) -> Result<()> {
    let config = load_config()?;
    let names = LocaleNames::new(config.display_locale());
    let provider = lingopair::providers::create_provider(&config.provider);

    lingopair::channels::cli::run_detect(&*provider, &names, text).await
}

async fn run_translate(text: &str, from: Option<String>, to: Option<String>) -> Result<()> {
    let config = load_config()?;
    let names = LocaleNames::new(config.display_locale());
    let provider = lingopair::providers::create_provider(&config.provider);
    let target = to.unwrap_or_else(|| config.default.target_locale.clone());

    lingopair::channels::cli::run_translate(provider, &names, text, from.as_deref(), &target).await
}

fn run_languages() -> Result<()> {
    let config = load_config()?;
    lingopair::channels::cli::print_languages(&LocaleNames::new(config.display_locale()));
    Ok(())
}

fn run_init() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        println!("配置文件已存在: {}", config_path.display());
        println!("如需重新初始化，请先删除该文件。");
    } else {
        let _ = Config::load_or_init()?;
        println!("已创建配置文件: {}", config_path.display());
        println!("请编辑该文件配置端侧检测/翻译命令，或运行 `lingopair setup`。");
    }

    Ok(())
}

fn run_config() -> Result<()> {
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        println!("配置文件不存在。运行 `lingopair init` 创建。");
        return Ok(());
    }

    let content = std::fs::read_to_string(&config_path).wrap_err("读取配置文件失败")?;
    println!("配置文件: {}\n", config_path.display());
    println!("{}", content);

    Ok(())
}

/// 获取日志目录: ~/.lingopair/logs/
fn log_dir() -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| color_eyre::eyre::eyre!("无法获取 home 目录"))?;
    Ok(base_dirs.home_dir().join(".lingopair").join("logs"))
}

/// 初始化 tracing: stderr 只输出 warn+，日志文件输出 debug+
fn init_tracing() -> Result<()> {
    let log_dir = log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("创建日志目录失败: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "lingopair.log");
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lingopair=debug")),
        );

    // stderr 只输出 warn+，不干扰 REPL 交互
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
