//! 邮件通知
//!
//! 核心只依赖 [`EmailSender`]，真实投递由外部实现提供。投递失败
//! 只记录日志，不影响调用方的操作结果。

use std::sync::Arc;

use tracing::info;

use crate::config::EmailConfig;
use crate::errors::{Result, TrackerError};

pub trait EmailSender: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// 只把邮件写入日志
pub struct LogEmailSender {
    from: String,
}

impl LogEmailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

impl EmailSender for LogEmailSender {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(from = %self.from, to = %to, subject = %subject, "Email: {}", body);
        Ok(())
    }
}

/// 关闭发信，所有投递都返回错误
pub struct DisabledEmailSender;

impl EmailSender for DisabledEmailSender {
    fn send(&self, to: &str, _subject: &str, _body: &str) -> Result<()> {
        Err(TrackerError::email_delivery(format!(
            "Email delivery is disabled, message to {to} dropped"
        )))
    }
}

pub fn create_email_sender(config: &EmailConfig) -> Result<Arc<dyn EmailSender>> {
    match config.backend.to_ascii_lowercase().as_str() {
        "log" => Ok(Arc::new(LogEmailSender::new(config.from.clone()))),
        "disabled" => Ok(Arc::new(DisabledEmailSender)),
        other => Err(TrackerError::config(format!(
            "Unknown email backend '{other}', expected log or disabled"
        ))),
    }
}

/// 渲染验证码邮件正文
pub fn render_verification_body(template: &str, code: &str) -> String {
    template.replace("{CODE}", code)
}
