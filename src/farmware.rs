use anyhow::Result;
use log::{error, info, warn};
use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::FarmwareEnv;

/// Prefix attached to every message sent to the host log.
pub const LOG_PREFIX: &str = "[circle-track]";

/// Severity tag understood by the host message endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
        }
    }
}

/// Destination for operator-facing messages, chosen once at startup so the
/// capture pipeline stays free of environment sensing.
pub trait MessageLog {
    fn log(&self, message: &str, kind: MessageKind) -> Result<()>;
}

/// Local fallback used when running outside the farmware host.
pub struct ConsoleLog;

impl MessageLog for ConsoleLog {
    fn log(&self, message: &str, kind: MessageKind) -> Result<()> {
        match kind {
            MessageKind::Info => info!("{message}"),
            MessageKind::Warning => warn!("{message}"),
            MessageKind::Error => error!("{message}"),
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CeleryScript {
    kind: &'static str,
    args: MessageArgs,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MessageArgs {
    message: String,
    message_type: &'static str,
}

/// The `send_message` celery script body for a log line.
pub fn celery_payload(message: &str, kind: MessageKind) -> CeleryScript {
    CeleryScript {
        kind: "send_message",
        args: MessageArgs {
            message: format!("{LOG_PREFIX} {message}"),
            message_type: kind.as_str(),
        },
    }
}

/// Sends messages to the farming host API. Fire and forget: one POST, no
/// retry, no response validation, no timeout. Transport errors propagate.
pub struct FarmwareLog {
    client: Client,
    url: String,
    token: String,
}

impl FarmwareLog {
    pub fn new(env: FarmwareEnv) -> Self {
        Self {
            client: Client::new(),
            url: env.url,
            token: env.token,
        }
    }
}

impl MessageLog for FarmwareLog {
    fn log(&self, message: &str, kind: MessageKind) -> Result<()> {
        self.client
            .post(format!("{}celery_script", self.url))
            .header("Authorization", format!("bearer {}", self.token))
            .json(&celery_payload(message, kind))
            .send()?;
        Ok(())
    }
}

/// Picks the remote logger when the farmware environment is present, the
/// console logger otherwise.
pub fn from_env(farmware: Option<FarmwareEnv>) -> Box<dyn MessageLog> {
    match farmware {
        Some(env) => Box::new(FarmwareLog::new(env)),
        None => Box::new(ConsoleLog),
    }
}
