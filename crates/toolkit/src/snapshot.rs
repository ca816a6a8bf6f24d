use std::path::Path;

use scoring::{Entry, RatingCategory};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A user's category set and entry log as exported from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<RatingCategory>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Snapshot {
    pub async fn load(path: &Path) -> Result<Self> {
        let json_content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json_content)?)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let json_content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json_content).await?;
        Ok(())
    }

    pub fn category_by_name(&self, name: &str) -> Option<&RatingCategory> {
        self.categories.iter().find(|c| c.name == name)
    }
}
