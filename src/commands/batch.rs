//! # batch 命令实现
//!
//! 批量提取保存下来的页面，合并写入一个 CSV 文件。
//!
//! ## 功能
//! - 收集匹配的页面文件
//! - 并行提取
//! - 无有效数据的页面计为跳过，其它提取错误计为失败
//! - 输出带 `source` 列的合并 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/`, `parsers/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::error::{BxcopyError, Result};
use crate::models::Record;
use crate::parsers::{self, PageSelectors};
use crate::utils::output;

use std::io::{IsTerminal, Write};
use std::path::Path;

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch extraction");

    if !args.input.exists() {
        return Err(BxcopyError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(BxcopyError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    let runner = BatchRunner::new(args.jobs).show_progress(std::io::stderr().is_terminal());
    output::print_info(&format!(
        "Found {} page(s), using {} job(s)",
        files.len(),
        runner.jobs()
    ));

    let selectors = PageSelectors::from(&args.selectors);
    let result = runner.run(files, |path| extract_file(path, &selectors));

    for (path, reason) in &result.skipped {
        output::print_skip(&format!("{}: {}", path.display(), reason));
    }
    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path.display(), err));
    }

    let rows = write_merged_csv(&result, &args.output)?;

    output::print_done(&format!(
        "{} record(s) from {} of {} page(s) written to '{}' ({} skipped, {} failed)",
        rows,
        result.items.len(),
        result.total(),
        args.output.display(),
        result.skipped.len(),
        result.failures.len()
    ));

    Ok(())
}

/// 提取单个页面文件
fn extract_file(path: &Path, selectors: &PageSelectors) -> ProcessResult<Vec<Record>> {
    let outcome = super::read_page_file(path).and_then(|html| parsers::extract_records(&html, selectors));

    match outcome {
        Ok(extraction) => ProcessResult::Success(extraction.records),
        Err(BxcopyError::NoValidData) => ProcessResult::Skipped(BxcopyError::NoValidData.to_string()),
        Err(e) => ProcessResult::Failed(e.to_string()),
    }
}

/// 写出合并 CSV，返回记录行数
fn write_merged_csv(result: &BatchResult<Vec<Record>>, output_path: &Path) -> Result<usize> {
    let file = std::fs::File::create(output_path).map_err(|e| BxcopyError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    write_merged(result, file)
}

fn write_merged<W: Write>(result: &BatchResult<Vec<Record>>, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["source"];
    header.extend(Record::COLUMNS);
    wtr.write_record(&header)?;

    let mut rows = 0;
    for (path, records) in &result.items {
        let source = path.display().to_string();
        for record in records {
            let mut line = vec![source.clone()];
            line.extend(record.values());
            wtr.write_record(&line)?;
            rows += 1;
        }
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(rows)
}
