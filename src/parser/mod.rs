//! CSV ingestion and row classification.
//!
//! Each statistics file is a header-less CSV whose first field names the
//! record category. Rows from unknown categories (and factory rows with an
//! unknown action) are skipped; rows from a known category that lack the
//! fields that category needs are a hard error.

use crate::config::Conventions;
use crate::error::{Result, StatError};
use crate::model::Record;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Raw rows of one statistics file, kept together with where they came from.
#[derive(Debug, Clone)]
pub struct StatFile {
    pub path: PathBuf,
    pub rows: Vec<StringRecord>,
}

/// Read every file fully, then classify every row.
///
/// Nothing is classified until all files have been read, so an unreadable
/// path is reported before any malformed row.
pub fn load(paths: &[PathBuf], conv: &Conventions) -> Result<Vec<Record>> {
    let files = paths
        .iter()
        .map(|p| read_file(p))
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::new();
    for file in &files {
        records.extend(classify_rows(file, conv)?);
    }
    Ok(records)
}

pub fn read_file(path: &Path) -> Result<StatFile> {
    let file = File::open(path).map_err(|source| StatError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_rows(path, file)?;
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(StatFile {
        path: path.to_path_buf(),
        rows,
    })
}

/// Parse CSV text from any reader. `path` is only used for error messages.
pub fn read_rows<R: Read>(path: &Path, reader: R) -> Result<Vec<StringRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|r| r.map_err(|e| csv_error(path, e)))
        .collect()
}

fn csv_error(path: &Path, e: csv::Error) -> StatError {
    let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(source) => StatError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        },
        _ => StatError::malformed(path, line, message),
    }
}

pub fn classify_rows(file: &StatFile, conv: &Conventions) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(file.rows.len());
    for (idx, row) in file.rows.iter().enumerate() {
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        match classify(row, conv) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => trace!("{}:{}: skipped row {:?}", file.path.display(), line, row),
            Err(reason) => return Err(StatError::malformed(&file.path, line, reason)),
        }
    }
    debug!(
        "{}: {} of {} rows classified",
        file.path.display(),
        records.len(),
        file.rows.len()
    );
    Ok(records)
}

/// Classify a single row. `Ok(None)` means the row is deliberately ignored.
pub fn classify(
    row: &StringRecord,
    conv: &Conventions,
) -> std::result::Result<Option<Record>, String> {
    let Some(tag) = row.get(0) else {
        return Ok(None);
    };

    let domain = if tag == conv.domains.scope {
        Domain::Scope
    } else if tag == conv.domains.switch {
        Domain::Switch
    } else if tag == conv.domains.factory {
        Domain::Factory
    } else {
        return Ok(None);
    };

    let payload = row
        .get(1)
        .ok_or_else(|| format!("`{tag}` record has no second field"))?;

    match domain {
        Domain::Scope => Ok(Some(Record::Scope(payload.to_string()))),
        Domain::Switch => {
            let (switch, value) = payload
                .trim()
                .split_once(conv.delimiter)
                .ok_or_else(|| {
                    format!(
                        "switch record `{payload}` has no `{}` between name and case",
                        conv.delimiter
                    )
                })?;
            Ok(Some(Record::Case {
                switch: switch.to_string(),
                value: value.to_string(),
            }))
        }
        Domain::Factory => classify_factory(payload.trim(), conv),
    }
}

enum Domain {
    Scope,
    Switch,
    Factory,
}

fn classify_factory(
    payload: &str,
    conv: &Conventions,
) -> std::result::Result<Option<Record>, String> {
    let parts: Vec<&str> = payload.split(conv.delimiter).collect();
    let action = parts[0];

    if action == conv.actions.register {
        match parts.as_slice() {
            [_, factory, id, class, ..] => Ok(Some(Record::Register {
                factory: factory.to_string(),
                id: id.to_string(),
                class: class.to_string(),
            })),
            _ => Err(format!(
                "factory registration `{payload}` needs action, factory, id and class"
            )),
        }
    } else if action == conv.actions.create {
        match parts.as_slice() {
            [_, factory, id, ..] => Ok(Some(Record::Create {
                factory: factory.to_string(),
                id: id.to_string(),
            })),
            _ => Err(format!(
                "factory creation `{payload}` needs action, factory and id"
            )),
        }
    } else {
        Ok(None)
    }
}
