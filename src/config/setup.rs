use std::path::Path;

use color_eyre::eyre::{eyre, Context, Result};
use dialoguer::{Input, Select};

use super::schema::{Config, DEFAULT_CONFIG_TOML};
use crate::i18n::{DisplayLocale, LocaleNames};

/// 显示语言选项
const DISPLAY_LOCALES: &[(&str, &str)] = &[("ja", "日本語 (ja)"), ("en", "English (en)")];

/// 向导收集到的设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupAnswers {
    pub display_locale: String,
    pub target_locale: String,
    pub detect_command: String,
    pub translate_command: String,
    pub availability_command: String,
}

/// 运行交互式配置向导
pub fn run_setup() -> Result<()> {
    println!("lingopair setup\n");

    let current = Config::load_or_init().unwrap_or_default();

    // 1. 显示语言
    let labels: Vec<&str> = DISPLAY_LOCALES.iter().map(|(_, label)| *label).collect();
    let current_idx = DISPLAY_LOCALES
        .iter()
        .position(|(code, _)| *code == current.display_locale().code())
        .unwrap_or(0);
    let locale_idx = Select::new()
        .with_prompt("Language names shown in")
        .items(&labels)
        .default(current_idx)
        .interact()
        .wrap_err("选择显示语言失败")?;
    let display_locale = DISPLAY_LOCALES[locale_idx].0.to_string();
    println!();

    // 2. 默认目标语言（必须是可显示的 code）
    let names = LocaleNames::new(DisplayLocale::from_str(&display_locale));
    let target_locale: String = Input::new()
        .with_prompt("Default target language")
        .default(current.default.target_locale.clone())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            match names.is_displayable(input.trim()) {
                Ok(true) => Ok(()),
                _ => Err(format!("unknown language code: {}", input)),
            }
        })
        .interact_text()
        .wrap_err("输入目标语言失败")?;
    println!();

    // 3. 端侧能力命令（留空 = 未暴露该能力）
    let detect_command = prompt_command(
        "Detection command (stdin text → JSON results)",
        current.provider.detect_command.as_deref(),
    )?;
    let translate_command = prompt_command(
        "Translation command ({source}/{target} placeholders)",
        current.provider.translate_command.as_deref(),
    )?;
    let availability_command = prompt_command(
        "Availability command (optional)",
        current.provider.availability_command.as_deref(),
    )?;

    let answers = SetupAnswers {
        display_locale,
        target_locale: target_locale.trim().to_string(),
        detect_command,
        translate_command,
        availability_command,
    };

    let config_path = Config::config_path()?;
    save_answers(&config_path, &answers)?;

    println!("✅ Saved to {}", config_path.display());
    Ok(())
}

fn prompt_command(prompt: &str, current: Option<&str>) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(current.unwrap_or_default().to_string())
        .allow_empty(true)
        .interact_text()
        .wrap_err("输入命令失败")?;
    println!();
    Ok(value.trim().to_string())
}

/// 把向导结果写入 config.toml（保留文件里其他键和注释）
pub fn save_answers(config_path: &Path, answers: &SetupAnswers) -> Result<()> {
    let content = if config_path.exists() {
        std::fs::read_to_string(config_path).wrap_err("读取配置文件失败")?
    } else {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err("创建配置目录失败")?;
        }
        DEFAULT_CONFIG_TOML.to_string()
    };
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| eyre!("解析配置文件失败: {}", e))?;

    if doc.get("default").is_none() {
        doc["default"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    if doc.get("provider").is_none() {
        doc["provider"] = toml_edit::Item::Table(toml_edit::Table::new());
    }

    doc["default"]["display_locale"] = toml_edit::value(&answers.display_locale);
    doc["default"]["target_locale"] = toml_edit::value(&answers.target_locale);

    for (key, value) in [
        ("detect_command", &answers.detect_command),
        ("translate_command", &answers.translate_command),
        ("availability_command", &answers.availability_command),
    ] {
        if value.is_empty() {
            if let Some(table) = doc["provider"].as_table_mut() {
                table.remove(key);
            }
        } else {
            doc["provider"][key] = toml_edit::value(value);
        }
    }

    std::fs::write(config_path, doc.to_string()).wrap_err("写入配置文件失败")?;
    Ok(())
}
