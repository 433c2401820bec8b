use crate::browser::Page;
use crate::calculators::selectors::EmiSelectors;
use crate::error::{HarnessError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

/// One payment period: column key → cell text, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmortizationRow {
    cells: Vec<(String, String)>,
}

pub type AmortizationTable = Vec<AmortizationRow>;

impl AmortizationRow {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // A repeated key keeps its first position and takes the later value.
    fn insert(&mut self, key: String, value: String) {
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((key, value)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for AmortizationRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = AmortizationRow::default();
        for (k, v) in iter {
            row.insert(k.into(), v.into());
        }
        row
    }
}

impl Serialize for AmortizationRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Header text up to the first line break; the rest is a unit annotation.
pub fn column_key(header: &str) -> String {
    header.split('\n').next().unwrap_or_default().trim().to_string()
}

/// Zips each row positionally against the header keys.
///
/// Short rows simply lack the trailing keys; cells beyond the last header are dropped.
pub fn build_table(headers: &[String], rows: &[Vec<String>]) -> AmortizationTable {
    let keys: Vec<String> = headers.iter().map(|h| column_key(h)).collect();

    rows.iter()
        .enumerate()
        .map(|(i, cells)| {
            if cells.len() != keys.len() {
                tracing::debug!(
                    "Row {} has {} cells for {} headers, zipping what lines up",
                    i,
                    cells.len(),
                    keys.len()
                );
            }
            keys.iter()
                .zip(cells)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<AmortizationRow>()
        })
        .collect()
}

/// Reads the yearly payment table currently rendered on `page`.
pub async fn extract_amortization_table<P>(page: &P) -> Result<AmortizationTable>
where
    P: Page + ?Sized,
{
    let headers = page.inner_texts(EmiSelectors::TABLE_HEADERS).await?;
    let rows = page
        .row_cells(EmiSelectors::PAYMENT_ROWS, EmiSelectors::PAYMENT_CELLS)
        .await?;

    let table = build_table(&headers, &rows);
    tracing::info!(
        "📊 Extracted amortization table: {} columns, {} rows",
        headers.len(),
        table.len()
    );
    Ok(table)
}

/// Overwrites `path` with the table as a pretty-printed JSON array.
pub fn write_table_artifact(table: &[AmortizationRow], path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| {
        HarnessError::Artifact(format!("could not write {}: {}", path.display(), e))
    })?;

    tracing::info!("💾 Amortization table written to {}", path.display());
    Ok(())
}
