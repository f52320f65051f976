//! # extract 命令实现
//!
//! 对单个页面执行一次"立即提取"。
//!
//! ## 功能
//! - 读取页面（文件/标准输入/URL）
//! - 定位表头、规范化记录
//! - 以所选格式打印到标准输出
//! - 依次投递到剪贴板、远端收集服务、文件；每个通道单独报告
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `parsers/`, `delivery/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::extract::{ExtractArgs, PrintFormat};
use crate::delivery::{self, clipboard, render, DeliveryPlan, RemoteSink, SystemClipboard};
use crate::error::Result;
use crate::models::Record;
use crate::parsers::{self, PageSelectors};
use crate::utils::{output, progress};

use std::time::Duration;

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    let html = super::load_page(&args.input, args.timeout)?;

    let selectors = PageSelectors::from(&args.selectors);
    let extraction = parsers::extract_records(&html, &selectors)?;

    output::print_info(&format!(
        "Request '{}': {} record(s) from {} layout",
        extraction.request_id,
        extraction.records.len(),
        extraction.vocabulary
    ));

    print_records(&extraction.records, args.format)?;

    // 投递失败只报告，不影响提取结果
    let mut clipboard = if args.no_clipboard {
        None
    } else {
        let hold = Duration::from_secs(args.clipboard_hold);
        if let Some(notice) = clipboard::hold_notice(hold) {
            if hold.is_zero() {
                output::print_warning(&notice);
            } else {
                output::print_info(&notice);
            }
        }
        Some(SystemClipboard::open(hold))
    };

    let plan = DeliveryPlan {
        clipboard: clipboard
            .as_mut()
            .map(|cb| cb as &mut dyn delivery::ClipboardSink),
        remote: args
            .post
            .then(|| RemoteSink::new(args.endpoint.clone(), Duration::from_secs(args.timeout))),
        file: args.output.clone(),
    };

    let spinner = args.post.then(|| progress::create_spinner("Delivering records"));
    let outcomes = delivery::deliver(&extraction.records, plan);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let mut failed = 0;
    for (_, outcome) in &outcomes {
        match outcome {
            Ok(delivered) => output::print_success(&delivered.to_string()),
            Err(e) => {
                failed += 1;
                output::print_warning(&e.to_string());
            }
        }
    }

    if failed == 0 {
        output::print_done(&format!("Extracted {} record(s)", extraction.records.len()));
    } else {
        output::print_done(&format!(
            "Extracted {} record(s); {} of {} deliveries failed",
            extraction.records.len(),
            failed,
            outcomes.len()
        ));
    }

    Ok(())
}

/// 按格式打印记录到标准输出
fn print_records(records: &[Record], format: PrintFormat) -> Result<()> {
    match format {
        PrintFormat::Table => println!("{}", render::terminal_table(records)),
        PrintFormat::Tsv => println!("{}", render::flatten(records)),
        PrintFormat::Html => println!("{}", render::tabularize(records)),
        PrintFormat::Json => println!("{}", render::to_json(records)?),
        PrintFormat::Csv => render::write_csv(records, std::io::stdout().lock())?,
        PrintFormat::None => {}
    }
    Ok(())
}
