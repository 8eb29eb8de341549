use std::sync::Arc;

use color_eyre::eyre::{bail, eyre, Context, Result};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::{debug, info};

use crate::i18n::LocaleNames;
use crate::orchestrator::{Action, Orchestrator, Phase, SessionState, Trigger};
use crate::providers::{Availability, CapabilityProvider};
use crate::session;

/// REPL 里的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    /// 普通文本：替换输入并按 Enter（触发检测）
    Input(String),
    Detect,
    Translate,
    Source(Option<String>),
    Target(Option<String>),
    Status,
    Languages,
    Help,
    Exit,
    Unknown(String),
}

/// 只用去掉首尾空白的内容识别命令和空行；普通文本原样保留
fn parse_line(line: &str) -> Option<ReplCommand> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }
    if matches!(input, "exit" | "quit") {
        return Some(ReplCommand::Exit);
    }
    let Some(cmd) = input.strip_prefix('/') else {
        return Some(ReplCommand::Input(line.to_string()));
    };

    let mut parts = cmd.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let command = match name {
        "detect" | "d" => ReplCommand::Detect,
        "translate" | "t" => ReplCommand::Translate,
        "source" | "from" => ReplCommand::Source(arg),
        "target" | "to" => ReplCommand::Target(arg),
        "status" | "s" => ReplCommand::Status,
        "languages" | "langs" => ReplCommand::Languages,
        "help" | "h" => ReplCommand::Help,
        other => ReplCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// 运行交互式翻译会话
pub async fn run_repl(orchestrator: &Orchestrator) -> Result<()> {
    println!("lingopair (type /help for commands, exit to quit)");
    println!();

    if !orchestrator.start().await {
        print_notices(orchestrator);
        println!("Configure detect_command and translate_command with `lingopair setup`.");
        return Ok(());
    }

    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("lingopair".to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        let sig = line_editor.read_line(&prompt);
        match sig {
            Ok(Signal::Success(line)) => {
                let Some(command) = parse_line(&line) else {
                    continue;
                };
                if command == ReplCommand::Exit {
                    println!("Bye!");
                    break;
                }
                handle_command(orchestrator, command).await;
                print_notices(orchestrator);
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nBye!");
                break;
            }
            Err(e) => {
                eprintln!("input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

async fn handle_command(orchestrator: &Orchestrator, command: ReplCommand) {
    match command {
        ReplCommand::Input(text) => {
            orchestrator.set_input(text);
            // 行编辑器提交整行，不存在输入法组字中的 Enter
            let trigger = orchestrator.enter_key(Action::Detect, false).await;
            after_detect(orchestrator, trigger);
        }
        ReplCommand::Detect => {
            let trigger = orchestrator.detect().await;
            after_detect(orchestrator, trigger);
        }
        ReplCommand::Translate => {
            let trigger = orchestrator.translate().await;
            match trigger {
                Trigger::Completed => print_output(&orchestrator.snapshot().output_text),
                Trigger::Ignored => {
                    println!("{}", explain_translate_disabled(&orchestrator.snapshot(), orchestrator.names()));
                }
                Trigger::Failed(_) => {}
                Trigger::Discarded => debug!("翻译结果已过期"),
            }
        }
        ReplCommand::Source(None) => {
            let snapshot = orchestrator.snapshot();
            if snapshot.candidate_sources.is_empty() {
                println!("No detected languages yet. Type some text first.");
            } else {
                println!("Detected languages:");
                print_options(&snapshot.candidate_sources, snapshot.selected_source.as_deref(), orchestrator.names());
            }
        }
        ReplCommand::Source(Some(id)) => match orchestrator.select_source(&id).await {
            Ok(()) => print_pair(orchestrator),
            Err(e) => println!("✗ {}", e),
        },
        ReplCommand::Target(None) => {
            let snapshot = orchestrator.snapshot();
            println!(
                "Target: {}. Use /languages to list every code.",
                label(&snapshot.selected_target, orchestrator.names())
            );
        }
        ReplCommand::Target(Some(id)) => match orchestrator.select_target(&id).await {
            Ok(()) => print_pair(orchestrator),
            Err(e) => println!("✗ {}", e),
        },
        ReplCommand::Status => {
            println!("{}", render_status(&orchestrator.snapshot(), orchestrator.phase(), orchestrator.names()));
        }
        ReplCommand::Languages => print_languages(orchestrator.names()),
        ReplCommand::Help => print_help(),
        ReplCommand::Exit => {}
        ReplCommand::Unknown(name) => {
            println!("Unknown command: /{}. Type /help for the list.", name);
        }
    }
}

fn after_detect(orchestrator: &Orchestrator, trigger: Trigger) {
    match trigger {
        Trigger::Completed => {
            let snapshot = orchestrator.snapshot();
            if snapshot.candidate_sources.is_empty() {
                println!("No language could be identified.");
                return;
            }
            println!("Detected:");
            print_options(&snapshot.candidate_sources, snapshot.selected_source.as_deref(), orchestrator.names());
            print_pair(orchestrator);
        }
        Trigger::Ignored => println!("Detection is not available right now."),
        Trigger::Discarded => debug!("检测结果已过期"),
        Trigger::Failed(_) => {}
    }
}

/// 译文原样输出，只在没有换行结尾时补一个
fn print_output(text: &str) {
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
}

fn print_notices(orchestrator: &Orchestrator) {
    if let Some(notice) = orchestrator.take_notice() {
        println!("✗ {}", notice);
    }
}

fn print_pair(orchestrator: &Orchestrator) {
    let snapshot = orchestrator.snapshot();
    let Some(source) = snapshot.selected_source.as_deref() else {
        return;
    };
    let names = orchestrator.names();
    let verdict = crate::orchestrator::pair_availability(&snapshot)
        .map(Availability::as_str)
        .unwrap_or("unknown");
    println!(
        "{} → {} ({})",
        label(source, names),
        label(&snapshot.selected_target, names),
        verdict
    );
}

fn print_options(ids: &[String], selected: Option<&str>, names: &LocaleNames) {
    for id in ids {
        let marker = if Some(id.as_str()) == selected { "*" } else { " " };
        println!("  {} {}", marker, label(id, names));
    }
}

/// "英語 (en)"；没有名称时只显示标识
fn label(id: &str, names: &LocaleNames) -> String {
    match names.display_name(id) {
        Ok(name) if name != id => format!("{} ({})", name, id),
        _ => id.to_string(),
    }
}

/// 翻译动作被忽略时给出原因
fn explain_translate_disabled(state: &SessionState, names: &LocaleNames) -> String {
    let Some(source) = state.selected_source.as_deref() else {
        return "Nothing to translate yet. Type some text to detect its language first.".to_string();
    };
    if state.detecting || state.translating {
        return "Busy, try again when the current run finishes.".to_string();
    }
    if source == state.selected_target {
        return "Source and target languages are the same. Pick another /target.".to_string();
    }
    match crate::orchestrator::pair_availability(state) {
        Some(Availability::Unavailable) => format!(
            "Translation from {} to {} is not supported on this device.",
            label(source, names),
            label(&state.selected_target, names)
        ),
        _ => "Availability of this language pair is still unknown.".to_string(),
    }
}

fn render_status(state: &SessionState, phase: Phase, names: &LocaleNames) -> String {
    let candidates: Vec<String> = state.candidate_sources.iter().map(|id| label(id, names)).collect();
    let source = state
        .selected_source
        .as_deref()
        .map(|id| label(id, names))
        .unwrap_or_else(|| "-".to_string());
    let availability = crate::orchestrator::pair_availability(state)
        .map(Availability::as_str)
        .unwrap_or("unknown");

    let mut out = String::new();
    out.push_str(&format!("phase:      {:?}\n", phase));
    out.push_str(&format!("input:      {:?}\n", state.input_text));
    out.push_str(&format!("detected:   {}\n", candidates.join(", ")));
    out.push_str(&format!("source:     {}\n", source));
    out.push_str(&format!("target:     {}\n", label(&state.selected_target, names)));
    out.push_str(&format!("pair:       {}\n", availability));
    out.push_str(&format!("output:     {:?}", state.output_text));
    out
}

/// 列出所有可显示的语言
pub fn print_languages(names: &LocaleNames) {
    for id in names.catalog() {
        println!("  {:<4} {}", id, names.display_name(id).unwrap_or_default());
    }
}

/// 单次检测：打印按置信度排序的候选
pub async fn run_detect(provider: &dyn CapabilityProvider, names: &LocaleNames, text: &str) -> Result<()> {
    ensure_supported(provider).await?;
    let candidates = session::detect_languages(provider, names, text).await?;
    if candidates.is_empty() {
        println!("No language could be identified.");
        return Ok(());
    }
    for id in &candidates {
        println!("{}", label(id, names));
    }
    Ok(())
}

/// 单次翻译：未指定源语言时先检测，取置信度最高的候选
pub async fn run_translate(
    provider: Arc<dyn CapabilityProvider>,
    names: &LocaleNames,
    text: &str,
    from: Option<&str>,
    to: &str,
) -> Result<()> {
    ensure_supported(&*provider).await?;

    if !names.is_displayable(to)? {
        bail!("未知的目标语言: {}", to);
    }
    let source = match from {
        Some(id) => {
            if !names.is_displayable(id)? {
                bail!("未知的源语言: {}", id);
            }
            id.to_string()
        }
        None => session::detect_languages(&*provider, names, text)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| eyre!("无法识别输入文本的语言，请用 --from 指定"))?,
    };
    info!("单次翻译 {} → {}", source, to);

    if source == to {
        bail!("源语言与目标语言相同: {}", label(&source, names));
    }
    let availability = session::pair_availability(&*provider, &source, to)
        .await
        .wrap_err("查询语言对可用性失败")?;
    if !availability.is_usable() {
        bail!(
            "translation from {} to {} is not supported",
            label(&source, names),
            label(to, names)
        );
    }

    let translated = session::translate(&*provider, text, &source, to).await?;
    print_output(&translated);
    Ok(())
}

async fn ensure_supported(provider: &dyn CapabilityProvider) -> Result<()> {
    if !session::is_capability_supported(provider).await {
        bail!("on-device language detection and translation are not available on this host. Run `lingopair setup`.");
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <text>                 Replace the input and detect its language");
    println!("  /detect, /d            Detect the language of the current input again");
    println!("  /translate, /t         Translate the input with the selected pair");
    println!("  /source [id]           List detected languages, or pick one as source");
    println!("  /target [id]           Show the target, or change it");
    println!("  /status, /s            Show the session state");
    println!("  /languages             List every language code");
    println!("  /help, /h              Show this help");
    println!("  exit, quit             Quit");
}
