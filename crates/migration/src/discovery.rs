use crate::error::{LoadError, Section};
use crate::model::Migration;
use crate::sections::extract_section;
use crate::series::check_series;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.(.+)\.sql$").expect("filename pattern is a valid regex"))
}

/// A directory entry whose name looks like `<id>.<name>.sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub id: i64,
    pub name: String,
    pub filename: String,
    pub path: PathBuf,
}

/// Lists migration candidates in `dir`, sorted by id.
///
/// Entries that are not regular files or whose names do not match the naming scheme are
/// skipped without error. A matching name whose id does not fit an `i64` fails the listing.
pub fn list_migration_files(dir: impl AsRef<Path>) -> Result<Vec<MigrationFile>, LoadError> {
    let dir = dir.as_ref();
    let dir_display = dir.display().to_string();
    tracing::debug!(dir = %dir_display, "resolving migrations");

    let entries = fs::read_dir(dir).map_err(|e| LoadError::io(&dir_display, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::io(&dir_display, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        let Some((id, name)) = parse_filename(&filename)? else {
            tracing::trace!(%filename, "ignoring non-migration entry");
            continue;
        };

        files.push(MigrationFile {
            id,
            name,
            filename,
            path,
        });
    }

    files.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.filename.cmp(&b.filename)));
    tracing::debug!(count = files.len(), "found migrations");

    Ok(files)
}

/// Loads the whole series from `dir`: numbering is checked before any file is read, and
/// a single malformed file fails the load.
pub fn load_migrations(dir: impl AsRef<Path>) -> Result<Vec<Migration>, LoadError> {
    let files = list_migration_files(dir)?;

    let ids: Vec<i64> = files.iter().map(|f| f.id).collect();
    check_series(&ids)?;

    let mut out = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(&file.path)
            .map_err(|e| LoadError::io(file.path.display().to_string(), e))?;
        out.push(parse_migration(file, &content)?);
    }

    Ok(out)
}

fn parse_migration(file: MigrationFile, content: &str) -> Result<Migration, LoadError> {
    let up = extract_section(content, Section::Up).ok_or_else(|| LoadError::MissingSection {
        id: file.id,
        name: file.name.clone(),
        section: Section::Up,
    })?;
    let down = extract_section(content, Section::Down).ok_or_else(|| LoadError::MissingSection {
        id: file.id,
        name: file.name.clone(),
        section: Section::Down,
    })?;

    Ok(Migration::new(file.id, file.name, file.filename, up, down))
}

/// `Ok(None)` when `filename` is not a migration name at all.
fn parse_filename(filename: &str) -> Result<Option<(i64, String)>, LoadError> {
    let Some(captures) = filename_pattern().captures(filename) else {
        return Ok(None);
    };

    let id = captures[1].parse::<i64>().map_err(|e| LoadError::InvalidId {
        filename: filename.to_string(),
        message: e.to_string(),
    })?;
    Ok(Some((id, captures[2].to_string())))
}
