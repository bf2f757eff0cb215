use crate::core::{Column, CsvSource, DomainRecord};
use crate::utils::error::{DashError, Result};
use std::collections::HashMap;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 載入器：一次取回並完整解析 CSV，不重試
pub struct CsvLoader<S: CsvSource> {
    source: S,
}

impl<S: CsvSource> CsvLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 成功回傳所有記錄；失敗時錯誤類別為 Network 或 Parse
    pub async fn load(&self) -> Result<Vec<DomainRecord>> {
        tracing::info!("📥 Fetching CSV from {}", self.source.describe());
        let body = self.source.fetch().await.map_err(|e| {
            tracing::error!("❌ Error loading CSV: {}", e);
            e
        })?;
        tracing::debug!("CSV body received ({} bytes)", body.len());

        let records = parse_csv(&body).map_err(|e| {
            tracing::error!("❌ Parse error: {}", e);
            e
        })?;
        tracing::info!("✅ Parse complete. Row count: {}", records.len());
        if let Some(first) = records.first() {
            tracing::debug!("First row: {:?}", first);
        }

        Ok(records)
    }
}

/// 以標頭列推斷欄位，依名稱取值；缺少的儲存格視為空字串
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<DomainRecord>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DashError::ParseError {
            message: "missing header row".to_string(),
        });
    }

    let positions = column_positions(&headers);
    if !positions.contains_key(&Column::Domain) {
        tracing::warn!("⚠️ CSV header has no 'Domain' column; domain cells will be empty");
    }
    let unknown: Vec<&str> = headers
        .iter()
        .filter(|h| Column::from_header(h).is_none())
        .collect();
    if !unknown.is_empty() {
        tracing::debug!("Ignoring extra CSV columns: {:?}", unknown);
    }

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result?;
        if raw.iter().all(|cell| cell.trim().is_empty()) {
            tracing::debug!("Skipping blank row {}", row + 2);
            continue;
        }

        let text = |column: Column| -> String {
            positions
                .get(&column)
                .and_then(|&i| raw.get(i))
                .unwrap_or_default()
                .to_string()
        };
        let number = |column: Column| -> Option<f64> {
            let cell = text(column);
            let parsed = parse_number(&cell);
            if parsed.is_none() && !cell.trim().is_empty() {
                tracing::debug!("Row {}: non-numeric {} value '{}'", row + 2, column, cell);
            }
            parsed
        };

        records.push(DomainRecord {
            domain: text(Column::Domain),
            niche_1: text(Column::Niche1),
            niche_2: text(Column::Niche2),
            traffic: text(Column::Traffic),
            domain_rating: number(Column::DomainRating),
            domain_authority: number(Column::DomainAuthority),
            language: text(Column::Language),
            price: text(Column::Price),
            spam_score: text(Column::SpamScore),
        });
    }

    Ok(records)
}

fn column_positions(headers: &csv::StringRecord) -> HashMap<Column, usize> {
    let mut positions = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            positions.entry(column).or_insert(index);
        }
    }
    positions
}

fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
