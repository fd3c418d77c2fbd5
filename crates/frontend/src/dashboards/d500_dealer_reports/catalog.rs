use anyhow::{anyhow, Context};
use contracts::shared::reports::ReportCatalog;

/// Report descriptors embedded in the binary
const CATALOG_TOML: &str = include_str!("catalog.toml");

pub fn load_catalog() -> anyhow::Result<ReportCatalog> {
    let catalog: ReportCatalog =
        toml::from_str(CATALOG_TOML).context("Failed to parse d500 report catalog")?;
    catalog.validate().map_err(|e| anyhow!(e))?;
    log::debug!("d500 catalog: {} reports", catalog.reports.len());
    Ok(catalog)
}
