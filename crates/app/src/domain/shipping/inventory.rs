//! Box inventory sources.

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;

use boxcart::{fixtures::load_boxes, packaging::ShippingBox};

use super::InventoryError;

/// Where the shipping boxes come from.
#[automock]
#[async_trait]
pub trait BoxInventory: Send + Sync {
    /// Boxes in inventory order. May include inactive boxes; selection
    /// filters them out.
    async fn list_boxes(&self) -> Result<Vec<ShippingBox>, InventoryError>;
}

/// Inventory read from a YAML file on every call.
#[derive(Debug, Clone)]
pub struct FixtureBoxInventory {
    path: PathBuf,
}

impl FixtureBoxInventory {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BoxInventory for FixtureBoxInventory {
    async fn list_boxes(&self) -> Result<Vec<ShippingBox>, InventoryError> {
        Ok(load_boxes(&self.path)?)
    }
}

/// Inventory served by the shop at `GET {base}/boxes`.
#[derive(Debug, Clone)]
pub struct HttpBoxInventory {
    base_url: String,
    http: Client,
}

impl HttpBoxInventory {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn boxes_url(&self) -> String {
        format!("{}/boxes", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl BoxInventory for HttpBoxInventory {
    async fn list_boxes(&self) -> Result<Vec<ShippingBox>, InventoryError> {
        let response = self.http.get(self.boxes_url()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(InventoryError::UnexpectedResponse(format!(
                "boxes request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use boxcart::packaging::BoxId;

    use super::*;

    #[tokio::test]
    async fn fixture_inventory_reads_boxes_in_order() -> TestResult {
        let mut file = NamedTempFile::new()?;

        writeln!(
            file,
            "boxes:
  - id: 7
    label: Flat pack
    dimensions: {{ length_mm: 400, width_mm: 300, height_mm: 50 }}
    max_weight_kg: 3
  - id: 2
    label: Cube
    dimensions: {{ length_mm: 200, width_mm: 200, height_mm: 200 }}
    max_weight_kg: 20
    active: false"
        )?;

        let boxes = FixtureBoxInventory::new(file.path()).list_boxes().await?;
        let ids: Vec<_> = boxes.iter().map(|b| b.id).collect();

        assert_eq!(ids, vec![BoxId(7), BoxId(2)]);
        assert!(boxes.last().is_some_and(|b| !b.active));

        Ok(())
    }

    #[tokio::test]
    async fn missing_fixture_is_an_error() {
        let inventory = FixtureBoxInventory::new("does/not/exist.yml");

        assert!(matches!(
            inventory.list_boxes().await,
            Err(InventoryError::Fixture(_))
        ));
    }

    #[test]
    fn boxes_url_ignores_trailing_slash() {
        let inventory = HttpBoxInventory::new("https://shop.example.com/api/");

        assert_eq!(inventory.boxes_url(), "https://shop.example.com/api/boxes");
    }
}
