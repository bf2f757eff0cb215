use crate::core::{CellValue, DomainRecord, SortDirection, SortState};
use std::cmp::Ordering;

/// 只比對網域名稱，不分大小寫；空字串回傳全部
pub fn filter<'a>(records: &'a [DomainRecord], search_term: &str) -> Vec<&'a DomainRecord> {
    if search_term.is_empty() {
        return records.iter().collect();
    }

    let needle = search_term.to_lowercase();
    records
        .iter()
        .filter(|record| record.domain.to_lowercase().contains(&needle))
        .collect()
}

/// 穩定排序：相同值的列維持輸入順序
pub fn sort<'a>(mut rows: Vec<&'a DomainRecord>, state: SortState) -> Vec<&'a DomainRecord> {
    rows.sort_by(|a, b| {
        let ordering = compare_cells(a.cell(state.column), b.cell(state.column));
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

/// 由 (原始記錄, 搜尋字串, 排序狀態) 重新推導表格內容，不修改原始集合
pub fn derive_view<'a>(
    records: &'a [DomainRecord],
    search_term: &str,
    sort_state: Option<SortState>,
) -> Vec<&'a DomainRecord> {
    let filtered = filter(records, search_term);
    let view = match sort_state {
        Some(state) => sort(filtered, state),
        None => filtered,
    };
    tracing::debug!(
        "View recomputed: {} of {} rows (search={:?}, sort={:?})",
        view.len(),
        records.len(),
        search_term,
        sort_state
    );
    view
}

fn compare_cells(a: CellValue<'_>, b: CellValue<'_>) -> Ordering {
    match (a, b) {
        (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
        (CellValue::Number(a), CellValue::Number(b)) => match (a, b) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        // 同一欄位的值型別一致，不會走到這裡
        (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Column;

    fn record(domain: &str, dr: Option<f64>, language: &str) -> DomainRecord {
        DomainRecord {
            domain: domain.to_string(),
            domain_rating: dr,
            language: language.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<DomainRecord> {
        vec![
            record("Alpha.com", Some(40.0), "English"),
            record("beta.io", Some(9.0), "German"),
            record("gamma.com", None, "English"),
            record("ALPHABET.org", Some(100.0), "French"),
            record("delta.net", Some(9.0), "Spanish"),
        ]
    }

    fn domains(rows: &[&DomainRecord]) -> Vec<String> {
        rows.iter().map(|r| r.domain.clone()).collect()
    }

    #[test]
    fn test_filter_matches_domain_case_insensitively() {
        let records = sample();

        for term in ["alpha", "ALPHA", ".com", "o", "zzz", "Et"] {
            let kept = filter(&records, term);
            let needle = term.to_lowercase();
            for r in &kept {
                assert!(r.domain.to_lowercase().contains(&needle));
            }
            let excluded = records
                .iter()
                .filter(|r| !kept.iter().any(|k| std::ptr::eq(*k, *r)));
            for r in excluded {
                assert!(!r.domain.to_lowercase().contains(&needle));
            }
        }
    }

    #[test]
    fn test_filter_ignores_other_fields() {
        let records = sample();
        assert!(filter(&records, "english").is_empty());
    }

    #[test]
    fn test_empty_search_returns_everything_in_order() {
        let records = sample();
        let view = filter(&records, "");
        assert_eq!(
            domains(&view),
            vec!["Alpha.com", "beta.io", "gamma.com", "ALPHABET.org", "delta.net"]
        );
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let records = sample();

        let view = sort(filter(&records, ""), SortState::ascending(Column::DomainRating));

        // 缺值排最前，9 在 40 之前，100 最後
        assert_eq!(
            domains(&view),
            vec!["gamma.com", "beta.io", "delta.net", "Alpha.com", "ALPHABET.org"]
        );
    }

    #[test]
    fn test_text_sort_is_lexicographic() {
        let records = sample();

        let view = sort(filter(&records, ""), SortState::ascending(Column::Domain));

        assert_eq!(
            domains(&view),
            vec!["ALPHABET.org", "Alpha.com", "beta.io", "delta.net", "gamma.com"]
        );
    }

    #[test]
    fn test_descending_reverses_ascending_modulo_ties() {
        let records = sample();

        for column in Column::ALL {
            let asc = sort(filter(&records, ""), SortState::ascending(column));
            let desc = sort(filter(&records, ""), SortState::descending(column));
            let asc_keys: Vec<String> = asc.iter().map(|r| r.display(column)).collect();
            let mut desc_keys: Vec<String> = desc.iter().map(|r| r.display(column)).collect();
            desc_keys.reverse();
            assert_eq!(asc_keys, desc_keys, "column {}", column);
        }
    }

    #[test]
    fn test_toggle_property() {
        let records = sample();
        let column = Column::Domain;

        let once = sort(filter(&records, ""), SortState::ascending(column));
        let twice = sort(once.clone(), SortState::ascending(column));
        let mut desc = sort(filter(&records, ""), SortState::descending(column));
        desc.reverse();

        assert_eq!(domains(&twice), domains(&desc));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = sample();

        let view = sort(filter(&records, ""), SortState::ascending(Column::Language));

        assert_eq!(
            domains(&view),
            vec!["Alpha.com", "gamma.com", "ALPHABET.org", "beta.io", "delta.net"]
        );
    }

    #[test]
    fn test_derive_view_does_not_depend_on_operation_order() {
        let records = sample();
        let sort_state = Some(SortState::descending(Column::DomainRating));

        let sorted_everything = derive_view(&records, "", sort_state);
        let narrowed = derive_view(&records, "alpha", sort_state);

        assert_eq!(sorted_everything.len(), records.len());
        assert_eq!(domains(&narrowed), vec!["ALPHABET.org", "Alpha.com"]);
        // 清除搜尋後回到完整集合，原始資料未被改動
        assert_eq!(derive_view(&records, "", None).len(), 5);
        assert_eq!(records[0].domain, "Alpha.com");
    }
}
