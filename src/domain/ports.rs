use crate::domain::notification::Notification;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 靜態 CSV 資源的來源 (HTTP 或本機檔案)
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// 一次取回完整內容，不串流
    async fn fetch(&self) -> Result<Vec<u8>>;

    fn describe(&self) -> String;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
