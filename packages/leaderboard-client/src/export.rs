//! CSV export and the plain-text top-three summary.

use crate::error::ClientError;
use crate::view::RankedRow;

pub const CSV_FILE_NAME: &str = "leaderboard.csv";

/// `rank,name,score` CSV over the displayed rows, one record per line
/// with no trailing newline. Fields containing a comma, quote or line
/// break are quoted with inner quotes doubled.
pub fn to_csv(rows: &[RankedRow<'_>]) -> Result<String, ClientError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    let export_err = |e: csv::Error| ClientError::Export(e.to_string());

    writer.write_record(["rank", "name", "score"]).map_err(export_err)?;
    for row in rows {
        writer
            .write_record([
                row.rank.to_string(),
                row.record.name.clone(),
                row.record.score.to_string(),
            ])
            .map_err(export_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ClientError::Export(e.error().to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ClientError::Export(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// "Leaderboard Top 3:" followed by up to three `"{rank}. {name} — {score}"`
/// lines. `None` when there is nothing displayed.
pub fn top3_summary(rows: &[RankedRow<'_>]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let mut lines = vec!["Leaderboard Top 3:".to_string()];
    lines.extend(
        rows.iter()
            .take(3)
            .enumerate()
            .map(|(i, row)| format!("{}. {} — {}", i + 1, row.record.name, row.record.score)),
    );
    Some(lines.join("\n"))
}
