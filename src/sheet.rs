//! Player sheet ingestion ("giocatori" export).
//!
//! Fixed columns: A=surname, B=position, D=appearances, E=win %, G=assists/match,
//! H=goals/match. Columns C and F are ignored.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::engine::RawPlayerRecord;

const COL_SURNAME: usize = 0;
const COL_POSITION: usize = 1;
const COL_APPEARANCES: usize = 3;
const COL_WIN_RATE: usize = 4;
const COL_ASSISTS_PM: usize = 6;
const COL_GOALS_PM: usize = 7;

/// Parse the sheet's CSV export. Rows with fewer than two populated cells are
/// dropped, then the first remaining row is taken as the header.
pub fn parse_players_csv(raw: &str) -> Result<Vec<RawPlayerRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("malformed csv row {}", line + 1))?;
        if populated_cells(&record) < 2 {
            continue;
        }
        rows.push(record);
    }

    Ok(rows.iter().skip(1).map(record_from_row).collect())
}

fn populated_cells(record: &StringRecord) -> usize {
    record.iter().filter(|cell| !cell.trim().is_empty()).count()
}

fn record_from_row(row: &StringRecord) -> RawPlayerRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
    RawPlayerRecord {
        surname: cell(COL_SURNAME),
        position: cell(COL_POSITION),
        appearances: cell(COL_APPEARANCES),
        win_rate: cell(COL_WIN_RATE),
        assists_per_match: cell(COL_ASSISTS_PM),
        goals_per_match: cell(COL_GOALS_PM),
    }
}
