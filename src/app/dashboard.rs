use crate::core::loader::CsvLoader;
use crate::core::session::Session;
use crate::core::view::derive_view;
use crate::core::window::{Virtualizer, WindowConfig};
use crate::core::{Column, CsvSource, DomainRecord, Notifier, SortState};
use crate::domain::notification::{Notification, NotificationEvent};
use crate::utils::error::{ErrorCategory, Result};
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Loading data...";
pub const EMPTY_MESSAGE: &str =
    "No data available. Please ensure Sheet1.csv is in the public folder.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(ErrorCategory),
}

#[derive(Debug, Clone, Serialize)]
pub struct VisibleRow<'a> {
    /// 在目前檢視中的位置
    pub index: usize,
    pub start: f64,
    pub record: &'a DomainRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub search_term: &'a str,
    pub sort: Option<SortState>,
    pub scroll_offset: f64,
    pub total_rows: usize,
    pub matching_rows: usize,
    pub rows: Vec<VisibleRow<'a>>,
}

/// 受保護的儀表板；原始記錄不變，每次讀取都以 derive_view 重新推導
pub struct Dashboard<N: Notifier> {
    records: Vec<DomainRecord>,
    load_state: LoadState,
    search_term: String,
    sort_state: Option<SortState>,
    scroll_offset: f64,
    virtualizer: Virtualizer,
    notifier: N,
}

impl<N: Notifier> Dashboard<N> {
    pub fn mount(session: &Session, window: WindowConfig, notifier: N) -> Result<Self> {
        session.require_authenticated("mount dashboard")?;
        Ok(Self {
            records: Vec::new(),
            load_state: LoadState::Loading,
            search_term: String::new(),
            sort_state: None,
            scroll_offset: 0.0,
            virtualizer: Virtualizer::new(window),
            notifier,
        })
    }

    /// 每個儀表板只載入一次；再次呼叫直接回傳目前狀態
    pub async fn load<S: CsvSource>(&mut self, loader: &CsvLoader<S>) -> LoadState {
        if self.load_state != LoadState::Loading {
            tracing::debug!("Load already finished ({:?}), skipping", self.load_state);
            return self.load_state;
        }

        match loader.load().await {
            Ok(records) => {
                self.records = records;
                self.load_state = LoadState::Ready;
                self.notifier
                    .notify(Notification::new(NotificationEvent::LoadSucceeded));
            }
            Err(e) => {
                let category = e.category();
                let event = match category {
                    ErrorCategory::Parse => NotificationEvent::ParseFailed,
                    _ => NotificationEvent::LoadFailed,
                };
                self.records.clear();
                self.load_state = LoadState::Failed(category);
                self.notifier.notify(Notification::with_detail(event, &e));
            }
        }
        self.load_state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn records(&self) -> &[DomainRecord] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort_state
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.scroll_offset = 0.0;
    }

    /// 點擊欄位標頭：切換排序並捲回頂端
    pub fn click_header(&mut self, column: Column) -> SortState {
        let next = SortState::toggle(self.sort_state, column);
        tracing::debug!("Sorting by {} {:?}", next.column, next.direction);
        self.sort_state = Some(next);
        self.scroll_offset = 0.0;
        next
    }

    pub fn clear_sort(&mut self) {
        self.sort_state = None;
        self.scroll_offset = 0.0;
    }

    pub fn scroll_to(&mut self, offset: f64) -> f64 {
        let count = self.rows().len();
        self.scroll_offset = self.virtualizer.clamp_offset(count, offset);
        self.scroll_offset
    }

    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_to(self.scroll_offset + delta)
    }

    /// 一整個視窗高度
    pub fn page(&mut self, pages: f64) -> f64 {
        self.scroll_by(self.virtualizer.config().viewport_height * pages)
    }

    pub fn rows(&self) -> Vec<&DomainRecord> {
        derive_view(&self.records, &self.search_term, self.sort_state)
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        let rows = self.rows();
        self.virtualizer
            .items(rows.len(), self.scroll_offset)
            .into_iter()
            .map(|item| VisibleRow {
                index: item.index,
                start: item.start,
                record: rows[item.index],
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            search_term: &self.search_term,
            sort: self.sort_state,
            scroll_offset: self.scroll_offset,
            total_rows: self.records.len(),
            matching_rows: self.rows().len(),
            rows: self.visible_rows(),
        }
    }

    /// 載入中或沒有資料時顯示的訊息
    pub fn status_message(&self) -> Option<&'static str> {
        if self.is_loading() {
            Some(LOADING_MESSAGE)
        } else if self.records.is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }
}
