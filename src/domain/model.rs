use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 一筆網域資料，欄位名稱對應 CSV 標頭
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Niche 1")]
    pub niche_1: String,
    #[serde(rename = "Niche 2")]
    pub niche_2: String,
    #[serde(rename = "Traffic")]
    pub traffic: String,
    #[serde(rename = "DR")]
    pub domain_rating: Option<f64>,
    #[serde(rename = "DA")]
    pub domain_authority: Option<f64>,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Spam Score")]
    pub spam_score: String,
}

/// 排序時使用的原始欄位值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

impl DomainRecord {
    pub fn cell(&self, column: Column) -> CellValue<'_> {
        match column {
            Column::Domain => CellValue::Text(&self.domain),
            Column::Niche1 => CellValue::Text(&self.niche_1),
            Column::Niche2 => CellValue::Text(&self.niche_2),
            Column::Traffic => CellValue::Text(&self.traffic),
            Column::DomainRating => CellValue::Number(self.domain_rating),
            Column::DomainAuthority => CellValue::Number(self.domain_authority),
            Column::Language => CellValue::Text(&self.language),
            Column::Price => CellValue::Text(&self.price),
            Column::SpamScore => CellValue::Text(&self.spam_score),
        }
    }

    /// 顯示用文字，缺值的數字欄位顯示為空字串
    pub fn display(&self, column: Column) -> String {
        match self.cell(column) {
            CellValue::Text(text) => text.to_string(),
            CellValue::Number(Some(n)) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", n as i64)
            }
            CellValue::Number(Some(n)) => n.to_string(),
            CellValue::Number(None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Domain,
    Niche1,
    Niche2,
    Traffic,
    DomainRating,
    DomainAuthority,
    Language,
    Price,
    SpamScore,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Domain,
        Column::Niche1,
        Column::Niche2,
        Column::Traffic,
        Column::DomainRating,
        Column::DomainAuthority,
        Column::Language,
        Column::Price,
        Column::SpamScore,
    ];

    /// CSV 標頭文字
    pub fn header(&self) -> &'static str {
        match self {
            Column::Domain => "Domain",
            Column::Niche1 => "Niche 1",
            Column::Niche2 => "Niche 2",
            Column::Traffic => "Traffic",
            Column::DomainRating => "DR",
            Column::DomainAuthority => "DA",
            Column::Language => "Language",
            Column::Price => "Price",
            Column::SpamScore => "Spam Score",
        }
    }

    /// 表格標題（網域欄位顯示為 "Domain Name"）
    pub fn title(&self) -> &'static str {
        match self {
            Column::Domain => "Domain Name",
            other => other.header(),
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            Column::Domain => "domain",
            Column::Niche1 => "niche_1",
            Column::Niche2 => "niche_2",
            Column::Traffic => "traffic",
            Column::DomainRating => "domain_rating",
            Column::DomainAuthority => "domain_authority",
            Column::Language => "language",
            Column::Price => "price",
            Column::SpamScore => "spam_score",
        }
    }

    /// 只比對 CSV 標頭文字 (不分大小寫)
    pub fn from_header(header: &str) -> Option<Column> {
        let wanted = header.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.header().eq_ignore_ascii_case(wanted))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::DomainRating | Column::DomainAuthority)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|c| {
                c.header().eq_ignore_ascii_case(wanted)
                    || c.field_name().eq_ignore_ascii_case(wanted)
                    || c.title().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownColumn(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    /// 點擊欄位標頭：同一欄位翻轉方向，新欄位從遞增開始
    pub fn toggle(current: Option<SortState>, column: Column) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                direction: state.direction.flipped(),
            },
            _ => SortState::ascending(column),
        }
    }
}
