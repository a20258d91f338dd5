//! CSV persistence for events and schedule collections.
//!
//! Both file kinds are line-oriented CSV with `#` comment headers. Comments
//! are stripped before the `csv` reader sees the data and re-written as a
//! fixed documentation block on every save, so hand edits to the headers do
//! not survive -- the rows do. Malformed rows are skipped with a warning and
//! *not* rewritten; dropping data silently is worse than carrying a warning.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};

use marquee_core::event::{EventList, EventRow};
use marquee_core::schedule::{ScheduleRow, SCHEDULE_FIELDS};
use marquee_core::store::{ScheduleKey, ScheduleStore};

const EVENTS_HEADER: &str = "\
# Ephemeral Events - Auto-generated
# Format: YYYY-MM-DD,TopLine,BottomLine,Image,Color[,StartHour,EndHour]
# TopLine = displays on TOP of screen
# BottomLine = displays on BOTTOM (usually the name)
# Times are optional (24-hour format, 0-23). If omitted, event shows all day.
";

const SCHEDULE_HEADER: &str = "\
# Format: name,enabled,days,start_hour,start_min,end_hour,end_min,image,progressbar
# enabled: 1=true, 0=false
# days: 1-7 for Mon-Sun (e.g., \"12345\" = Mon-Fri)
# progressbar: 1=true, 0=false
";

/// Parse CSV content into per-line string fields, skipping comments and
/// blank lines. Returns `(line_number, fields)` pairs so warnings can point
/// at the offending line.
fn read_rows(content: &str) -> Result<Vec<(u64, Vec<String>)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed CSV record")?;
        let line = record.position().map_or(0, |p| p.line());
        let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push((line, fields));
    }
    Ok(rows)
}

/// Write a comment header followed by CSV rows.
fn write_rows<'a, I>(path: &Path, header: &str, rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<&'a str>>,
{
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(header.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(file);
    for row in rows {
        writer
            .write_record(&row)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

/// Load the events file. A missing file is an empty list, not an error.
pub fn load_events(path: &Path) -> Result<EventList> {
    if !path.exists() {
        return Ok(EventList::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut list = EventList::new();
    for (line, fields) in read_rows(&content)? {
        match EventRow::from_fields(&fields) {
            Ok(row) => list.push(row),
            Err(e) => eprintln!(
                "warning: {} line {}: {} - row skipped",
                path.display(),
                line,
                e
            ),
        }
    }
    Ok(list)
}

/// Save the events file, sorted by date, with the documentation header.
pub fn save_events(path: &Path, list: &mut EventList) -> Result<()> {
    list.sort_by_date();
    write_rows(path, EVENTS_HEADER, list.rows().iter().map(|r| r.to_fields()))?;
    println!("Saved {} event(s) to {}", list.len(), path.display());
    Ok(())
}

/// Load every `*.csv` under the schedules directory into a store, keyed by
/// filename stem. Files whose stem is not a calendar key, and rows with too
/// few fields, are skipped with a warning.
pub fn load_store(dir: &Path) -> Result<ScheduleStore> {
    let mut store = ScheduleStore::new();
    if !dir.exists() {
        return Ok(store);
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read schedules dir {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read schedules dir {}", dir.display()))?
            .path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let key: ScheduleKey = match stem.parse() {
            Ok(key) => key,
            Err(_) => {
                eprintln!(
                    "warning: {} is not named after a calendar key - file skipped",
                    path.display()
                );
                continue;
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut rows = Vec::new();
        for (line, fields) in read_rows(&content)? {
            match ScheduleRow::from_fields(&fields) {
                Ok(row) => rows.push(row),
                Err(_) => eprintln!(
                    "warning: {} line {}: expected {} fields, got {} - row skipped",
                    path.display(),
                    line,
                    SCHEDULE_FIELDS,
                    fields.len()
                ),
            }
        }
        store.replace(key, rows);
    }
    Ok(store)
}

/// Path of one calendar key's file.
pub fn key_path(dir: &Path, key: ScheduleKey) -> std::path::PathBuf {
    dir.join(format!("{}.csv", key))
}

/// Save one calendar key's collection, creating the directory if needed.
pub fn save_key(dir: &Path, key: ScheduleKey, rows: &[ScheduleRow]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create schedules dir {}", dir.display()))?;
    let path = key_path(dir, key);
    write_rows(
        &path,
        SCHEDULE_HEADER,
        rows.iter().map(|r| r.to_fields().to_vec()),
    )?;
    println!("Saved {} schedule(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Save every collection in the store.
pub fn save_store(dir: &Path, store: &ScheduleStore) -> Result<()> {
    for key in store.keys() {
        save_key(dir, key, store.get(key))?;
    }
    Ok(())
}

/// Delete one calendar key's file. Missing files are fine: the key may never
/// have been saved.
pub fn delete_key_file(dir: &Path, key: ScheduleKey) -> Result<()> {
    let path = key_path(dir, key);
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to delete {}", path.display()))?;
        println!("Deleted {}", path.display());
    }
    Ok(())
}
