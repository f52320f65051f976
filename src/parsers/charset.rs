//! # 页面编码识别
//!
//! 把页面原始字节解码为字符串。编码按以下顺序确定：
//! 1. BOM
//! 2. HTTP `Content-Type` 中的 `charset`
//! 3. 文档开头 `<meta charset>` / `<meta http-equiv="Content-Type">` 声明
//! 4. 默认 UTF-8
//!
//! 办公系统导出的页面常见 GBK / GB18030 编码。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 使用
//! - 使用 `encoding_rs` 解码，`regex` 扫描 meta 声明

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use std::sync::OnceLock;

/// meta 声明只在文档开头查找
const META_SCAN_LIMIT: usize = 4096;

fn meta_charset_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
            .expect("invalid meta charset regex")
    })
}

/// 解码页面字节
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(bytes, content_type);
    // decode 会自行识别并去掉 BOM
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// 确定页面编码
pub fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(bytes))
        .unwrap_or(UTF_8)
}

/// `text/html; charset=GBK` → GBK
fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches(&['"', '\''][..]).as_bytes()))
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SCAN_LIMIT)];
    let label = meta_charset_re().captures(head)?.get(1)?.as_bytes();
    let encoding = Encoding::for_label(label)?;

    // 字节已按 ASCII 兼容方式读出了 meta，UTF-16 声明不可能成立
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        Some(UTF_8)
    } else {
        Some(encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbk(text: &str) -> Vec<u8> {
        let (bytes, _, unmappable) = encoding_rs::GBK.encode(text);
        assert!(!unmappable);
        bytes.into_owned()
    }

    #[test]
    fn test_defaults_to_utf8() {
        assert_eq!(detect_encoding("<p>序号</p>".as_bytes(), None), UTF_8);
        assert_eq!(decode_html("<p>序号</p>".as_bytes(), None), "<p>序号</p>");
    }

    #[test]
    fn test_meta_charset() {
        let mut page = b"<html><head><meta charset=\"gbk\"></head><body>".to_vec();
        page.extend(gbk("费用明细"));
        assert_eq!(detect_encoding(&page, None), encoding_rs::GBK);
        assert!(decode_html(&page, None).ends_with("<body>费用明细"));
    }

    #[test]
    fn test_meta_http_equiv() {
        let mut page =
            b"<HEAD><META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=GB2312\"></HEAD>".to_vec();
        page.extend(gbk("摘要"));
        // GB2312 标签按 GBK 处理
        assert_eq!(detect_encoding(&page, None), encoding_rs::GBK);
        assert!(decode_html(&page, None).ends_with("摘要"));
    }

    #[test]
    fn test_content_type_overrides_meta() {
        let mut page = b"<meta charset=\"utf-8\">".to_vec();
        page.extend(gbk("金额"));
        let html = decode_html(&page, Some("text/html; charset=\"GBK\""));
        assert!(html.ends_with("金额"));
    }

    #[test]
    fn test_content_type_without_charset_falls_back_to_meta() {
        let mut page = b"<meta charset=gb18030>".to_vec();
        page.extend(gbk("借方科目"));
        assert_eq!(detect_encoding(&page, Some("text/html")), encoding_rs::GB18030);
        assert!(decode_html(&page, Some("text/html")).ends_with("借方科目"));
    }

    #[test]
    fn test_bom_wins() {
        let mut page = vec![0xEF, 0xBB, 0xBF];
        page.extend(b"<meta charset=\"gbk\">\xe5\xba\x8f\xe5\x8f\xb7");
        assert_eq!(detect_encoding(&page, Some("text/html; charset=gbk")), UTF_8);
        assert_eq!(decode_html(&page, None), "<meta charset=\"gbk\">序号");
    }

    #[test]
    fn test_unknown_label_is_utf8() {
        let page = b"<meta charset=\"x-no-such-charset\"><p>ok</p>";
        assert_eq!(detect_encoding(page, None), UTF_8);
    }

    #[test]
    fn test_meta_utf16_declaration_is_utf8() {
        let page = "<meta charset=\"utf-16\"><p>序号</p>".as_bytes();
        assert_eq!(detect_encoding(page, None), UTF_8);
    }
}
