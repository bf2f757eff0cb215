use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const DEFAULT_ROW_HEIGHT: f64 = 35.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;
pub const DEFAULT_OVERSCAN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// 預估列高 (px)
    pub row_height: f64,
    pub viewport_height: f64,
    /// 視窗上下各多渲染幾列
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VirtualItem {
    pub index: usize,
    /// 此列頂端相對於表格頂端的位移
    pub start: f64,
    pub size: f64,
}

/// 依列數與捲動位置計算可見範圍，每次呼叫都重新計算
#[derive(Debug, Clone, Copy)]
pub struct Virtualizer {
    config: WindowConfig,
}

impl Virtualizer {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    fn row_height(&self) -> f64 {
        if self.config.row_height.is_finite() && self.config.row_height > 0.0 {
            self.config.row_height
        } else {
            DEFAULT_ROW_HEIGHT
        }
    }

    fn viewport_height(&self) -> f64 {
        if self.config.viewport_height.is_finite() && self.config.viewport_height > 0.0 {
            self.config.viewport_height
        } else {
            0.0
        }
    }

    pub fn total_height(&self, count: usize) -> f64 {
        count as f64 * self.row_height()
    }

    pub fn max_scroll_offset(&self, count: usize) -> f64 {
        (self.total_height(count) - self.viewport_height()).max(0.0)
    }

    pub fn clamp_offset(&self, count: usize, scroll_offset: f64) -> f64 {
        if !scroll_offset.is_finite() {
            return 0.0;
        }
        scroll_offset.clamp(0.0, self.max_scroll_offset(count))
    }

    /// 可見列加上 overscan 的索引範圍，永遠落在 `0..count` 之內
    pub fn range(&self, count: usize, scroll_offset: f64) -> Range<usize> {
        if count == 0 {
            return 0..0;
        }

        let h = self.row_height();
        let offset = self.clamp_offset(count, scroll_offset);
        let first_visible = ((offset / h).floor() as usize).min(count - 1);
        let end_visible = (((offset + self.viewport_height()) / h).ceil() as usize)
            .max(first_visible + 1)
            .min(count);

        let start = first_visible.saturating_sub(self.config.overscan);
        let end = end_visible.saturating_add(self.config.overscan).min(count);
        start..end
    }

    pub fn items(&self, count: usize, scroll_offset: f64) -> Vec<VirtualItem> {
        let h = self.row_height();
        self.range(count, scroll_offset)
            .map(|index| VirtualItem {
                index,
                start: index as f64 * h,
                size: h,
            })
            .collect()
    }
}

impl Default for Virtualizer {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}
