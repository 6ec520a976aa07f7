use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::models::{ADDED_FIELD, ID_FIELD, RESERVED_FIELDS, UPDATED_FIELD, Vendor};

/// Handle on the JSON file that holds the vendor collection
///
/// Nothing is cached: every call to [`VendorStore::load`] reads the whole
/// file and every call to [`VendorStore::save`] replaces it with a rename.
/// Clones share the same write lock, so read-modify-write cycles run one at a
/// time within the process. Readers take no lock.
#[derive(Clone, Debug)]
pub struct VendorStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl VendorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection from disk
    ///
    /// A missing file is an empty collection.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON array of objects
    pub async fn load(&self) -> Result<Vec<Vendor>> {
        let bytes = match fs::read(self.path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No vendor file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read vendor file {}", self.path.display())
                });
            }
        };

        let vendors: Vec<Vendor> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse vendor file {}", self.path.display()))?;

        tracing::debug!("Loaded {} vendors from {}", vendors.len(), self.path.display());
        Ok(vendors)
    }

    /// Rewrite the whole collection as a 2-space pretty-printed JSON array
    ///
    /// The array is written to a sibling temp file which is then renamed over
    /// the vendor file, so readers see either the old or the new collection.
    ///
    /// # Errors
    /// Returns an error if serialization, the temp file write or the rename
    /// fails. The vendor file is left untouched in that case.
    pub async fn save(&self, vendors: &[Vendor]) -> Result<()> {
        let json = serde_json::to_string_pretty(vendors)
            .context("Failed to serialize vendor collection")?;

        let tmp_path = self.temp_path();
        if let Err(e) = write_synced(&tmp_path, json.as_bytes()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e).with_context(|| {
                format!("Failed to write vendor file {}", self.path.display())
            });
        }

        if let Err(e) = fs::rename(&tmp_path, self.path()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e).with_context(|| {
                format!("Failed to replace vendor file {}", self.path.display())
            });
        }

        tracing::debug!("Saved {} vendors to {}", vendors.len(), self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vendors".to_string());
        self.path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
    }

    /// Run one read-modify-write cycle under the write lock
    ///
    /// `op` receives the freshly loaded snapshot. When it returns
    /// `Some((next, value))`, `next` is persisted and `value` returned; when
    /// it returns `None` the file is left untouched.
    ///
    /// # Errors
    /// Returns an error if the load or the save fails. A failed load never
    /// reaches `op`, so a corrupt file is not overwritten.
    pub async fn modify<T, F>(&self, op: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<Vendor>) -> Option<(Vec<Vendor>, T)>,
    {
        let _guard = self.write_lock.lock().await;

        let vendors = self.load().await?;
        match op(vendors) {
            Some((next, value)) => {
                self.save(&next).await?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Verify that the data file can be reached
    ///
    /// The containing directory must exist, and the file itself, when
    /// present, must be a regular file.
    ///
    /// # Errors
    /// Returns an error describing the first check that failed
    pub async fn health_check(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let dir_meta = fs::metadata(dir)
            .await
            .with_context(|| format!("Data directory {} is not accessible", dir.display()))?;
        if !dir_meta.is_dir() {
            anyhow::bail!("Data directory {} is not a directory", dir.display());
        }

        match fs::metadata(self.path()).await {
            Ok(meta) if !meta.is_file() => {
                anyhow::bail!("Vendor file {} is not a regular file", self.path.display())
            }
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Vendor file {} is not accessible", self.path.display())
            }),
        }
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Format a timestamp the way `added` and `updated` are stored.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Pick the identifier for a new record
///
/// The clock in milliseconds, bumped past the largest stored id when the
/// clock has not moved beyond it.
pub fn next_id(vendors: &[Vendor], now: DateTime<Utc>) -> i64 {
    let clock = now.timestamp_millis();
    match vendors.iter().filter_map(Vendor::id).max() {
        Some(max) if max >= clock => max.saturating_add(1),
        _ => clock,
    }
}

/// Append a new record built from `fields` with a generated `id` and `added`.
pub fn create(
    mut vendors: Vec<Vendor>,
    fields: Map<String, JsonValue>,
    now: DateTime<Utc>,
) -> (Vec<Vendor>, Vendor) {
    let mut record = Map::new();
    record.insert(ID_FIELD.to_string(), JsonValue::from(next_id(&vendors, now)));
    record.extend(client_fields(fields));
    record.insert(ADDED_FIELD.to_string(), JsonValue::String(format_timestamp(now)));

    let vendor = Vendor::from_fields(record);
    vendors.push(vendor.clone());
    (vendors, vendor)
}

/// Shallow-merge `fields` onto the first record matching `id` and stamp `updated`.
///
/// Returns `None` when no record matches.
pub fn update(
    mut vendors: Vec<Vendor>,
    id: i64,
    fields: Map<String, JsonValue>,
    now: DateTime<Utc>,
) -> Option<(Vec<Vendor>, Vendor)> {
    let index = vendors.iter().position(|v| v.id() == Some(id))?;

    let record = vendors[index].fields_mut();
    for (key, value) in client_fields(fields) {
        record.insert(key, value);
    }
    record.insert(UPDATED_FIELD.to_string(), JsonValue::String(format_timestamp(now)));

    let vendor = vendors[index].clone();
    Some((vendors, vendor))
}

/// Remove every record matching `id`, keeping the rest in order.
///
/// Returns the remaining records and how many were removed, or `None` when
/// nothing matched.
pub fn delete(vendors: Vec<Vendor>, id: i64) -> Option<(Vec<Vendor>, usize)> {
    let before = vendors.len();
    let remaining: Vec<Vendor> = vendors.into_iter().filter(|v| v.id() != Some(id)).collect();

    let removed = before - remaining.len();
    if removed == 0 {
        None
    } else {
        Some((remaining, removed))
    }
}

fn client_fields(fields: Map<String, JsonValue>) -> impl Iterator<Item = (String, JsonValue)> {
    fields
        .into_iter()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
}
