use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// 每種狀況各有一則獨立的提示訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    LoadSucceeded,
    LoadFailed,
    ParseFailed,
    LoginSucceeded,
    LoginFailed,
    LogoutSucceeded,
}

impl NotificationEvent {
    pub fn level(&self) -> NotificationLevel {
        match self {
            NotificationEvent::LoadSucceeded
            | NotificationEvent::LoginSucceeded
            | NotificationEvent::LogoutSucceeded => NotificationLevel::Success,
            NotificationEvent::LoadFailed
            | NotificationEvent::ParseFailed
            | NotificationEvent::LoginFailed => NotificationLevel::Error,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            NotificationEvent::LoadSucceeded => "Data loaded successfully!",
            NotificationEvent::LoadFailed => "Error loading CSV file",
            NotificationEvent::ParseFailed => "Error parsing CSV file",
            NotificationEvent::LoginSucceeded => "Successfully logged in!",
            NotificationEvent::LoginFailed => "Invalid credentials. Use demo/demo to login",
            NotificationEvent::LogoutSucceeded => "Successfully logged out!",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub event: NotificationEvent,
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn new(event: NotificationEvent) -> Self {
        Self {
            event,
            level: event.level(),
            message: event.default_message().to_string(),
            at: Utc::now(),
        }
    }

    pub fn with_detail(event: NotificationEvent, detail: impl std::fmt::Display) -> Self {
        let mut notification = Self::new(event);
        notification.message = format!("{}: {}", notification.message, detail);
        notification
    }
}
