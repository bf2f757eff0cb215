use crate::domain::notification::{Notification, NotificationLevel};
use crate::domain::ports::Notifier;
use std::sync::{Arc, Mutex};

/// 經由 tracing 記錄，並可選擇同時輸出到終端機
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier {
    echo: bool,
}

impl TracingNotifier {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(event = ?notification.event, "✅ {}", notification.message);
                if self.echo {
                    eprintln!("✅ {}", notification.message);
                }
            }
            NotificationLevel::Error => {
                tracing::error!(event = ?notification.event, "❌ {}", notification.message);
                if self.echo {
                    eprintln!("❌ {}", notification.message);
                }
            }
        }
    }
}

/// 依觸發順序保存所有提示，供測試與 JSON 輸出使用
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    pub fn take(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|mut received| std::mem::take(&mut *received))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!("Notification: {:?}", notification.event);
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationEvent;

    #[test]
    fn test_memory_notifier_keeps_order_across_clones() {
        let notifier = MemoryNotifier::new();
        let clone = notifier.clone();

        notifier.notify(Notification::new(NotificationEvent::LoginSucceeded));
        clone.notify(Notification::new(NotificationEvent::LoadSucceeded));

        let events: Vec<_> = notifier.take().into_iter().map(|n| n.event).collect();
        assert_eq!(
            events,
            vec![NotificationEvent::LoginSucceeded, NotificationEvent::LoadSucceeded]
        );
        assert!(clone.notifications().is_empty());
    }
}
