//! # 剪贴板写入
//!
//! 优先写入 HTML + 纯文本两种表示；失败时退回只写纯文本。
//!
//! Linux (X11) 下剪贴板内容由写入进程持有，进程退出后即无人应答粘贴请求。
//! 因此写入后会继续持有一段时间，直到被其它程序（剪贴板管理器或新的复制）接管。
//!
//! ## 依赖关系
//! - 被 `delivery/mod.rs` 使用
//! - 使用 `arboard` 访问系统剪贴板

use crate::error::{BxcopyError, Channel, Result};

use std::time::{Duration, Instant};

/// 实际写入的剪贴板形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// HTML 与纯文本
    Rich,
    /// 仅纯文本
    PlainText,
}

/// 剪贴板后端
pub trait ClipboardSink {
    /// 同时写入 HTML 与纯文本
    fn write_rich(&mut self, html: &str, plain: &str) -> std::result::Result<(), String>;

    /// 只写纯文本
    fn write_plain(&mut self, plain: &str) -> std::result::Result<(), String>;
}

/// 系统剪贴板
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    open_error: Option<String>,
    hold: Duration,
}

impl SystemClipboard {
    /// 打开系统剪贴板；打开失败推迟到写入时报告
    ///
    /// `hold` 为写入后最长持有时间（仅 Linux 生效，0 表示不等待）
    pub fn open(hold: Duration) -> Self {
        match arboard::Clipboard::new() {
            Ok(cb) => SystemClipboard {
                inner: Some(cb),
                open_error: None,
                hold,
            },
            Err(e) => SystemClipboard {
                inner: None,
                open_error: Some(e.to_string()),
                hold,
            },
        }
    }

    fn handle(&mut self) -> std::result::Result<&mut arboard::Clipboard, String> {
        match self.inner.as_mut() {
            Some(cb) => Ok(cb),
            None => Err(self
                .open_error
                .clone()
                .unwrap_or_else(|| "clipboard unavailable".to_string())),
        }
    }

    fn setter(&mut self) -> std::result::Result<arboard::Set<'_>, String> {
        let deadline = hold_deadline(self.hold, Instant::now());
        let set = self.handle()?.set();

        #[cfg(target_os = "linux")]
        let set = {
            use arboard::SetExtLinux;
            match deadline {
                Some(deadline) => set.wait_until(deadline),
                None => set,
            }
        };
        #[cfg(not(target_os = "linux"))]
        let _ = deadline;

        Ok(set)
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_rich(&mut self, html: &str, plain: &str) -> std::result::Result<(), String> {
        self.setter()?
            .html(html, Some(plain))
            .map_err(|e| e.to_string())
    }

    fn write_plain(&mut self, plain: &str) -> std::result::Result<(), String> {
        self.setter()?.text(plain).map_err(|e| e.to_string())
    }
}

/// 持有截止时间；`hold` 为 0 时不等待
fn hold_deadline(hold: Duration, now: Instant) -> Option<Instant> {
    (!hold.is_zero()).then(|| now + hold)
}

/// 写入前给用户的提示：内容能保留多久
pub fn hold_notice(hold: Duration) -> Option<String> {
    if !cfg!(target_os = "linux") {
        return None;
    }

    if hold.is_zero() {
        Some("Clipboard content is lost when bxcopy exits unless a clipboard manager is running".to_string())
    } else {
        Some(format!(
            "Keeping clipboard content for up to {}s; paste now, or it is released early once another program takes the clipboard",
            hold.as_secs()
        ))
    }
}

/// 写入剪贴板，返回实际使用的形式
pub fn copy_to<S: ClipboardSink + ?Sized>(sink: &mut S, html: &str, plain: &str) -> Result<CopyMode> {
    if sink.write_rich(html, plain).is_ok() {
        return Ok(CopyMode::Rich);
    }

    sink.write_plain(plain)
        .map(|_| CopyMode::PlainText)
        .map_err(|e| BxcopyError::delivery(Channel::Clipboard, e))
}
