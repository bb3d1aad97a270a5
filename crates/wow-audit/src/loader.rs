//! Record collection loading
//!
//! Each collection is read from `<data_dir>/<name>.csv` when the file exists and
//! falls back to the built-in sample collection otherwise. Rows are validated on load.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use wow_metrics::{
    ChannelMetric, MonthlyMetric, Record, RegionMetric, SkuInventoryRecord, SlowMoverRecord, SubscriptionSnapshot,
};

use crate::constants;

/// Every collection the audit works from
#[derive(Debug, Clone)]
pub struct Dataset {
    pub monthly: Vec<MonthlyMetric>,
    pub channels: Vec<ChannelMetric>,
    pub regions: Vec<RegionMetric>,
    pub skus: Vec<SkuInventoryRecord>,
    pub slow_movers: Vec<SlowMoverRecord>,
    pub subscription: SubscriptionSnapshot,
}

impl Dataset {
    /// Built-in sample collections
    pub fn fixtures() -> Self {
        Self {
            monthly: shared::monthly_metrics(),
            channels: shared::channel_metrics(),
            regions: shared::region_metrics(),
            skus: shared::sku_inventory(),
            slow_movers: shared::slow_movers(),
            subscription: shared::subscription_snapshot(),
        }
    }

    /// Load each collection from `data_dir`, using the sample collection for missing files
    pub fn load(data_dir: &Path) -> Result<Self> {
        let monthly = load_or_fixture(data_dir, constants::MONTHLY_FILENAME, shared::monthly_metrics)?;
        warn_if_out_of_order(&monthly);

        Ok(Self {
            monthly,
            channels: load_or_fixture(data_dir, constants::CHANNELS_FILENAME, shared::channel_metrics)?,
            regions: load_or_fixture(data_dir, constants::REGIONS_FILENAME, shared::region_metrics)?,
            skus: load_or_fixture(data_dir, constants::SKUS_FILENAME, shared::sku_inventory)?,
            slow_movers: load_or_fixture(data_dir, constants::SLOW_MOVERS_FILENAME, shared::slow_movers)?,
            subscription: shared::subscription_snapshot(),
        })
    }
}

/// Read and validate every row of a CSV file
pub fn load_from_csv<R>(path: &Path) -> Result<Vec<R>>
where
    R: Record + DeserializeOwned,
{
    let mut rdr = csv::Reader::from_path(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut records = Vec::new();

    for (idx, result) in rdr.deserialize().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let record: R = result.with_context(|| format!("{}:{}: malformed row", path.display(), line))?;
        record
            .validate()
            .with_context(|| format!("{}:{}: rejected row", path.display(), line))?;
        records.push(record);
    }

    Ok(records)
}

/// Load `filename` from `data_dir`, or the sample collection when the file is absent
fn load_or_fixture<R>(data_dir: &Path, filename: &str, fixture: fn() -> Vec<R>) -> Result<Vec<R>>
where
    R: Record + DeserializeOwned,
{
    let path = data_dir.join(filename);
    if path.exists() {
        let records = load_from_csv(&path)?;
        tracing::info!(path = %path.display(), count = records.len(), "loaded records");
        Ok(records)
    } else {
        let records = fixture();
        tracing::debug!(file = filename, count = records.len(), "no CSV found, using sample data");
        Ok(records)
    }
}

/// Parse a month label such as "Aug 23"
pub fn parse_month_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {label}"), constants::MONTH_LABEL_FORMAT).ok()
}

/// True when every label parses and months strictly increase
pub fn is_chronological(monthly: &[MonthlyMetric]) -> Option<bool> {
    let dates = monthly
        .iter()
        .map(|m| parse_month_label(&m.label))
        .collect::<Option<Vec<_>>>()?;
    Some(dates.windows(2).all(|pair| pair[0] < pair[1]))
}

fn warn_if_out_of_order(monthly: &[MonthlyMetric]) {
    match is_chronological(monthly) {
        Some(true) => {}
        Some(false) => tracing::warn!("monthly rows are not in chronological order; trends follow file order"),
        None => tracing::debug!("month labels are free-form, skipping order check"),
    }
}

/// Write a collection as CSV
pub fn export_to_csv<R: Serialize>(records: &[R], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_unless_present<R: Serialize>(
    data_dir: &Path,
    filename: &str,
    records: &[R],
    force: bool,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = data_dir.join(filename);
    if path.exists() && !force {
        tracing::warn!(path = %path.display(), "file exists, skipping (use --force to overwrite)");
        return Ok(());
    }
    export_to_csv(records, &path)?;
    written.push(path);
    Ok(())
}

/// Write the sample collections into `data_dir`
///
/// Existing files are left untouched unless `force` is set. Returns the files written.
pub fn export_fixtures(data_dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let data = Dataset::fixtures();
    let mut written = Vec::new();

    export_unless_present(data_dir, constants::MONTHLY_FILENAME, &data.monthly, force, &mut written)?;
    export_unless_present(data_dir, constants::CHANNELS_FILENAME, &data.channels, force, &mut written)?;
    export_unless_present(data_dir, constants::REGIONS_FILENAME, &data.regions, force, &mut written)?;
    export_unless_present(data_dir, constants::SKUS_FILENAME, &data.skus, force, &mut written)?;
    export_unless_present(data_dir, constants::SLOW_MOVERS_FILENAME, &data.slow_movers, force, &mut written)?;

    Ok(written)
}
