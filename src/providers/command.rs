use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre::{bail, eyre, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::ProviderConfig;

use super::traits::{Availability, CapabilityProvider, DetectionResult, LanguageDetector, Translator};

/// 通过本地可执行程序访问端侧模型的能力提供方
///
/// 协议：
/// - 检测命令：stdin 为原文，stdout 为 `[{"detectedLanguage": "en", "confidence": 0.9}, ...]`
/// - 翻译命令：stdin 为原文，stdout 为译文，原样作为译文（包括末尾换行）
/// - 可用性命令：stdout 为 unavailable / downloadable / downloading / available
///
/// 命令模板里的 `{source}` / `{target}` 在拆分参数之后再替换，
/// 文本内容不会被当作 shell 语法解释。
pub struct CommandProvider {
    detect_command: Option<String>,
    translate_command: Option<String>,
    availability_command: Option<String>,
    timeout: Duration,
}

impl CommandProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            detect_command: non_empty(config.detect_command.as_deref()),
            translate_command: non_empty(config.translate_command.as_deref()),
            availability_command: non_empty(config.availability_command.as_deref()),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    async fn query_availability(&self, source: &str, target: &str) -> Result<Availability> {
        let Some(template) = &self.availability_command else {
            return Ok(Availability::Available);
        };
        let argv = build_argv(template, source, target)?;
        let stdout = run_command(&argv, "", self.timeout).await?;
        Availability::parse(&stdout)
            .ok_or_else(|| eyre!("无法识别的可用性结果: {:?}", stdout.trim()))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[async_trait]
impl CapabilityProvider for CommandProvider {
    fn exposes_detector(&self) -> bool {
        self.detect_command.is_some()
    }

    fn exposes_translator(&self) -> bool {
        self.translate_command.is_some()
    }

    async fn detector_availability(&self) -> Result<Availability> {
        if !self.exposes_detector() {
            return Ok(Availability::Unavailable);
        }
        self.query_availability("", "").await
    }

    async fn translator_availability(&self, source: &str, target: &str) -> Result<Availability> {
        if !self.exposes_translator() {
            return Ok(Availability::Unavailable);
        }
        self.query_availability(source, target).await
    }

    async fn create_detector(&self) -> Result<Box<dyn LanguageDetector>> {
        let Some(template) = &self.detect_command else {
            bail!("未配置语言检测命令");
        };
        Ok(Box::new(CommandDetector {
            argv: build_argv(template, "", "")?,
            timeout: self.timeout,
        }))
    }

    async fn create_translator(&self, source: &str, target: &str) -> Result<Box<dyn Translator>> {
        let Some(template) = &self.translate_command else {
            bail!("未配置翻译命令");
        };
        Ok(Box::new(CommandTranslator {
            argv: build_argv(template, source, target)?,
            timeout: self.timeout,
        }))
    }
}

struct CommandDetector {
    argv: Vec<String>,
    timeout: Duration,
}

#[async_trait]
impl LanguageDetector for CommandDetector {
    async fn detect(&self, text: &str) -> Result<Vec<DetectionResult>> {
        let stdout = run_command(&self.argv, text, self.timeout).await?;
        serde_json::from_str(stdout.trim()).wrap_err("解析检测结果 JSON 失败")
    }
}

struct CommandTranslator {
    argv: Vec<String>,
    timeout: Duration,
}

#[async_trait]
impl Translator for CommandTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        run_command(&self.argv, text, self.timeout).await
    }
}

/// 拆分命令模板（处理引号），再替换语言占位符
fn build_argv(template: &str, source: &str, target: &str) -> Result<Vec<String>> {
    let argv: Vec<String> = shell_words::split(template)
        .map_err(|e| eyre!("命令解析失败: {}。请检查引号是否匹配。", e))?
        .into_iter()
        .map(|arg| arg.replace("{source}", source).replace("{target}", target))
        .collect();
    if argv.is_empty() {
        bail!("命令为空");
    }
    Ok(argv)
}

/// 执行命令：stdin 写入 input，返回 stdout；非零退出码或超时视为失败
async fn run_command(argv: &[String], input: &str, timeout: Duration) -> Result<String> {
    let (program, args) = argv.split_first().ok_or_else(|| eyre!("命令为空"))?;
    debug!("执行能力命令: {:?}", argv);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .wrap_err_with(|| format!("启动命令失败: {}", program))?;

    // 单独任务写 stdin，避免子进程输出填满管道时互相等待
    let mut stdin = child.stdin.take().ok_or_else(|| eyre!("无法打开子进程 stdin"))?;
    let input = input.to_string();
    let writer = tokio::spawn(async move {
        let result = stdin.write_all(input.as_bytes()).await;
        drop(stdin);
        result
    });

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| eyre!("命令执行超时 ({}s): {}", timeout.as_secs(), program))?
        .wrap_err_with(|| format!("等待命令结束失败: {}", program))?;

    if let Ok(Err(e)) = writer.await {
        // 子进程可能不读 stdin 就退出（如可用性查询），只记录
        debug!("写入子进程 stdin 失败: {}", e);
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "命令退出码 {}: {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        );
    }

    String::from_utf8(output.stdout).wrap_err("命令输出不是合法 UTF-8")
}
