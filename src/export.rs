use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::attributes::Attribute;
use crate::engine::DerivedPlayerProfile;

pub struct ExportReport {
    pub players: usize,
    pub columns: usize,
}

/// Pretty JSON, swapped in through a temp file so readers never see half a write.
pub fn write_profiles_json(path: &Path, profiles: &[DerivedPlayerProfile]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(profiles).context("serialize profiles")?;
    let written = fs::write(&tmp, json)
        .context("write profiles")
        .and_then(|()| fs::rename(&tmp, path).context("swap profiles"));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

pub fn export_profiles_xlsx(path: &Path, profiles: &[DerivedPlayerProfile]) -> Result<ExportReport> {
    let mut rows = vec![header_row()];
    rows.extend(profiles.iter().map(profile_row));
    let columns = rows[0].len();

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Profiles")?;
        write_rows(sheet, &rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: rows.len().saturating_sub(1),
        columns,
    })
}

fn header_row() -> Vec<String> {
    let mut row: Vec<String> = [
        "ID",
        "Player",
        "Pos",
        "Apps",
        "Win %",
        "Win % (cons.)",
        "Reliability",
        "Assists/Match",
        "Goals/Match",
        "Rating",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    row.extend(Attribute::ALL.iter().map(|a| a.label().to_string()));
    row
}

fn profile_row(p: &DerivedPlayerProfile) -> Vec<String> {
    let mut row = vec![
        p.id.clone(),
        p.name.clone(),
        p.position.clone(),
        p.appearances.to_string(),
        format!("{:.0}%", p.win_rate * 100.0),
        format!("{:.1}%", p.win_rate_conservative * 100.0),
        format!("{:.3}", p.reliability),
        format!("{:.2}", p.assists_per_match),
        format!("{:.2}", p.goals_per_match),
        p.rating.to_string(),
    ];
    row.extend(p.attributes.iter().map(|(_, v)| v.to_string()));
    row
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
