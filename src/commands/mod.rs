//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `delivery/`, `batch/`, `utils/`
//! - 子模块: extract, inspect, batch

pub mod batch;
pub mod extract;
pub mod inspect;

use crate::cli::Commands;
use crate::error::{BxcopyError, Result};
use crate::parsers::charset;
use crate::utils::progress;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Extract(args) => extract::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Batch(args) => batch::execute(args),
    }
}

/// 读取页面 HTML：`-` 为标准输入，http(s) 地址通过网络获取，其它视为文件路径
pub(crate) fn load_page(input: &str, timeout_secs: u64) -> Result<String> {
    if input == "-" {
        return read_page_stdin();
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        return fetch_page(input, timeout_secs);
    }

    read_page_file(Path::new(input))
}

fn read_page_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    require_piped_stdin(stdin.is_terminal())?;

    let mut bytes = Vec::new();
    stdin
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|e| BxcopyError::FileReadError {
            path: "<stdin>".to_string(),
            source: e,
        })?;
    Ok(charset::decode_html(&bytes, None))
}

/// 标准输入是终端时不等待键盘输入
fn require_piped_stdin(is_terminal: bool) -> Result<()> {
    if is_terminal {
        return Err(BxcopyError::InvalidArgument(
            "no page given; pass a file path or URL, or pipe the page HTML into stdin".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn read_page_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(BxcopyError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| BxcopyError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(charset::decode_html(&bytes, None))
}

fn fetch_page(url: &str, timeout_secs: u64) -> Result<String> {
    let fetch_err = |reason: String| BxcopyError::FetchError {
        url: url.to_string(),
        reason,
    };

    let spinner = progress::create_spinner(&format!("Fetching {}", url));

    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let result = client
        .get(url)
        .send()
        .map_err(|e| fetch_err(e.to_string()))
        .and_then(|response| {
            let status = response.status();
            if !status.is_success() {
                return Err(fetch_err(format!("HTTP {}", status)));
            }
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().map_err(|e| fetch_err(e.to_string()))?;
            Ok(charset::decode_html(&bytes, content_type.as_deref()))
        });

    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeaderVocabulary;
    use crate::parsers::{self, PageSelectors};
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    fn gbk(text: &str) -> Vec<u8> {
        let (bytes, _, _) = encoding_rs::GBK.encode(text);
        bytes.into_owned()
    }

    /// GBK 编码的费用明细页面
    fn gbk_page(meta: &str) -> Vec<u8> {
        let mut page = format!("<html><head>{}</head><body>", meta).into_bytes();
        page.extend(gbk(concat!(
            r#"<span id="requestmarkSpan">报销-001</span>"#,
            r#"<table id="oTable0">"#,
            "<tr><td>序号</td><td>摘要</td><td>费用类型</td><td>明细费用类型</td><td>借方科目</td><td>金额</td></tr>",
            "<tr><td>1</td><td>出租车</td><td>交通费</td><td>市内交通</td><td>6602.008</td><td>￥100.00</td></tr>",
            "</table></body></html>",
        )));
        page
    }

    #[test]
    fn test_load_page_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<table id=\"oTable0\"></table>").unwrap();
        let html = load_page(path.to_str().unwrap(), 5).unwrap();
        assert!(html.contains("oTable0"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_page("/nonexistent/bxcopy/page.html", 5).unwrap_err();
        assert!(matches!(err, BxcopyError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, b"<p>\xff</p>").unwrap();
        let html = read_page_file(&path).unwrap();
        assert!(html.contains('\u{FFFD}'));
    }

    #[test]
    fn test_gbk_page_file_extracts_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, gbk_page(r#"<meta charset="gbk">"#)).unwrap();

        let html = read_page_file(&path).unwrap();
        let extraction = parsers::extract_records(&html, &PageSelectors::default()).unwrap();
        assert_eq!(extraction.request_id, "报销-001");
        assert_eq!(extraction.vocabulary, HeaderVocabulary::Primary);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].summary, "出租车");
        assert_eq!(extraction.records[0].amount, 100.0);
    }

    #[test]
    fn test_gbk_page_over_http_uses_content_type() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let body = gbk_page("");
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = std::io::Read::read(&mut stream, &mut request).unwrap();
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=GBK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
        });

        let html = load_page(&format!("http://{}/page.html", addr), 5).unwrap();
        server.join().unwrap();

        let extraction = parsers::extract_records(&html, &PageSelectors::default()).unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].expense_type, "交通费");
    }

    #[test]
    fn test_terminal_stdin_is_rejected() {
        let err = require_piped_stdin(true).unwrap_err();
        assert!(matches!(err, BxcopyError::InvalidArgument(_)));
        assert!(require_piped_stdin(false).is_ok());
    }
}
