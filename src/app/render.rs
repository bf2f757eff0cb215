use crate::app::dashboard::Snapshot;
use crate::core::Column;
use crate::utils::error::Result;

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(text))));
    out
}

/// 以固定寬度文字表格輸出目前視窗內的列
pub fn render_table(snapshot: &Snapshot<'_>) -> String {
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|column| match snapshot.sort {
            Some(state) if state.column == *column => {
                format!("{} {}", column.title(), state.direction.marker())
            }
            _ => column.title().to_string(),
        })
        .collect();

    let cells: Vec<Vec<String>> = snapshot
        .rows
        .iter()
        .map(|row| Column::ALL.iter().map(|c| row.record.display(*c)).collect())
        .collect();

    let index_width = snapshot
        .rows
        .last()
        .map(|row| width(&(row.index + 1).to_string()))
        .unwrap_or(1)
        .max(1);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| width(&row[i]))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 3);
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    lines.push(format!("{} | {}", pad("#", index_width), header_line.join(" | ")));
    lines.push(
        std::iter::once("-".repeat(index_width))
            .chain(widths.iter().map(|w| "-".repeat(*w)))
            .collect::<Vec<_>>()
            .join("-+-"),
    );

    for (row, values) in snapshot.rows.iter().zip(&cells) {
        let line: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| pad(v, *w))
            .collect();
        lines.push(format!(
            "{} | {}",
            pad(&(row.index + 1).to_string(), index_width),
            line.join(" | ")
        ));
    }

    lines.push(summary_line(snapshot));
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_line(snapshot: &Snapshot<'_>) -> String {
    let shown = match (snapshot.rows.first(), snapshot.rows.last()) {
        (Some(first), Some(last)) => format!("rows {}-{}", first.index + 1, last.index + 1),
        _ => "no rows".to_string(),
    };
    let mut summary = format!(
        "{} of {} ({} loaded)",
        shown, snapshot.matching_rows, snapshot.total_rows
    );
    if !snapshot.search_term.is_empty() {
        summary.push_str(&format!(", search \"{}\"", snapshot.search_term));
    }
    summary
}

pub fn render_json(snapshot: &Snapshot<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
