//! Gym equipment list - CSV-backed, regenerated with defaults if absent
//!
//! Read-only at runtime. The summary feeds the chat system prompt so
//! the model only plans around machines the gym actually has.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One row of the equipment sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(rename = "Machine")]
    pub machine: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Min_Weights(lbs)")]
    pub min_weight_lbs: Option<f64>,
    #[serde(rename = "Max_weights(lbs)")]
    pub max_weight_lbs: Option<f64>,
}

/// The hardcoded sample written when no sheet exists yet
fn default_equipment() -> Vec<Equipment> {
    let rows = [
        ("Bench Press", 2, "Main Area", Some((45.0, 225.0))),
        ("Squat Rack", 1, "Main Area", Some((45.0, 315.0))),
        ("Dumbbells", 10, "Free Weights", Some((5.0, 80.0))),
        ("Barbells", 4, "Free Weights", Some((45.0, 45.0))),
        ("Treadmill", 3, "Cardio Zone", None),
        ("Rowing Machine", 2, "Cardio Zone", None),
    ];
    rows.into_iter()
        .map(|(machine, quantity, location, weights)| Equipment {
            machine: machine.to_string(),
            quantity,
            location: Some(location.to_string()),
            min_weight_lbs: weights.map(|(lo, _)| lo),
            max_weight_lbs: weights.map(|(_, hi)| hi),
        })
        .collect()
}

/// Equipment sheet handle
pub struct EquipmentList {
    path: PathBuf,
    rows: Vec<Equipment>,
}

impl EquipmentList {
    /// Load the sheet, creating it with the sample rows when missing.
    /// An unreadable sheet degrades to the sample without failing the
    /// session.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rows = if path.exists() {
            match read_rows(&path) {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "equipment sheet unreadable, using defaults");
                    default_equipment()
                }
            }
        } else {
            let rows = default_equipment();
            match write_rows(&path, &rows) {
                Ok(()) => info!(path = %path.display(), "created sample equipment sheet"),
                Err(e) => warn!(path = %path.display(), error = %e, "could not write sample sheet"),
            }
            rows
        };
        Self { path, rows }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[Equipment] {
        &self.rows
    }

    /// Bullet list interpolated into the system prompt.
    pub fn summary(&self) -> String {
        if self.rows.is_empty() {
            return "Equipment data not available".to_string();
        }
        self.rows
            .iter()
            .map(|row| {
                let weights = match (row.min_weight_lbs, row.max_weight_lbs) {
                    (Some(lo), Some(hi)) => format!(" ({lo}-{hi} lbs)"),
                    _ => String::new(),
                };
                format!("- {} (Qty: {}{})", row.machine, row.quantity, weights)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn read_rows(path: &Path) -> anyhow::Result<Vec<Equipment>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[Equipment]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "mygymbro-equipment-test-{}-{}.csv",
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_missing_sheet_regenerates_defaults() {
        let path = temp_path();
        let _ = fs::remove_file(&path);
        let list = EquipmentList::load(&path);
        assert_eq!(list.rows().len(), 6);
        assert!(path.exists(), "sample sheet should be written");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_default_sample_round_trips_through_csv() {
        let path = temp_path();
        let _ = fs::remove_file(&path);
        let first = EquipmentList::load(&path);
        let second = EquipmentList::load(&path);
        assert_eq!(first.rows(), second.rows());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_summary_format() {
        let path = temp_path();
        let _ = fs::remove_file(&path);
        let list = EquipmentList::load(&path);
        let summary = list.summary();
        assert!(summary.contains("- Bench Press (Qty: 2 (45-225 lbs))"));
        assert!(summary.contains("- Treadmill (Qty: 3)"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_sheet_falls_back_to_defaults() {
        let path = temp_path();
        fs::write(&path, "not,a,valid\nequipment,sheet").unwrap();
        let list = EquipmentList::load(&path);
        assert_eq!(list.rows().len(), 6);
        let _ = fs::remove_file(&path);
    }
}
