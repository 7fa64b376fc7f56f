//! Pharmacy locator
//!
//! Reads the pharmacy dataset (CSV: Name, Type, Latitude, Longitude,
//! Dosages) keyed by normalized city. Only Bangalore is covered; a missing
//! dataset degrades to a conversational message, never an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::validators::normalize_city;

const SUPPORTED_CITY: &str = "Bangalore";
const MAX_RESULTS: usize = 5;

#[derive(Debug, Deserialize)]
struct PharmacyRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Dosages", default)]
    dosages: Option<String>,
}

/// CSV-backed pharmacy directory
pub struct PharmacyDirectory {
    csv_path: PathBuf,
}

impl PharmacyDirectory {
    pub fn new(csv_path: &Path) -> Self {
        Self {
            csv_path: csv_path.to_path_buf(),
        }
    }

    /// Conversational pharmacy listing for the user's stored city.
    pub fn lookup(&self, city: Option<&str>) -> String {
        let Some(city) = city.filter(|c| !c.trim().is_empty()) else {
            return "⚠️ City not set. Please complete onboarding.".to_string();
        };

        let city_std = normalize_city(city);
        if city_std != SUPPORTED_CITY {
            return format!(
                "🌍 Pharmacy locator is currently available only for {SUPPORTED_CITY}. (Your city: {city_std})"
            );
        }

        match self.load_rows() {
            Ok(rows) if rows.is_empty() => {
                "⚠️ Pharmacy data not available. Please check back later.".to_string()
            }
            Ok(rows) => {
                let listing: Vec<String> = rows
                    .iter()
                    .take(MAX_RESULTS)
                    .map(|row| {
                        format!(
                            "{} ({}) — Dosages: {}",
                            row.name,
                            row.kind,
                            row.dosages.as_deref().unwrap_or("N/A")
                        )
                    })
                    .collect();
                format!("💊 Pharmacies in {SUPPORTED_CITY}:\n{}", listing.join("\n"))
            }
            Err(err) => {
                warn!("pharmacy dataset unreadable at {}: {err}", self.csv_path.display());
                "⚠️ Pharmacy data not available. Please check back later.".to_string()
            }
        }
    }

    fn load_rows(&self) -> Result<Vec<PharmacyRow>, csv::Error> {
        let mut reader = csv::Reader::from_path(&self.csv_path)?;
        reader.deserialize().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn directory_with(content: &str) -> (tempfile::TempDir, PharmacyDirectory) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pharmacies_with_dosages.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, PharmacyDirectory::new(&path))
    }

    #[test]
    fn lists_bangalore_pharmacies() {
        let (_dir, directory) = directory_with(
            "Name,Type,Latitude,Longitude,Dosages\n\
             Apollo,Offline,12.97,77.59,0.25mg;0.5mg\n\
             MedPlus,Online,12.93,77.61,1mg\n",
        );
        let reply = directory.lookup(Some("bengaluru"));
        assert!(reply.contains("Pharmacies in Bangalore"));
        assert!(reply.contains("Apollo (Offline) — Dosages: 0.25mg;0.5mg"));
        assert!(reply.contains("MedPlus (Online)"));
    }

    #[test]
    fn caps_listing_at_five_rows() {
        let mut content = String::from("Name,Type,Latitude,Longitude,Dosages\n");
        for i in 0..8 {
            content.push_str(&format!("Pharm{i},Offline,12.9,77.5,1mg\n"));
        }
        let (_dir, directory) = directory_with(&content);
        let reply = directory.lookup(Some("Bangalore"));
        assert_eq!(reply.matches("Pharm").count(), 5);
    }

    #[test]
    fn unsupported_city_names_the_region() {
        let (_dir, directory) = directory_with("Name,Type,Latitude,Longitude,Dosages\n");
        let reply = directory.lookup(Some("Pune"));
        assert!(reply.contains("only for Bangalore"));
        assert!(reply.contains("Pune"));
    }

    #[test]
    fn unset_city_prompts_onboarding() {
        let (_dir, directory) = directory_with("Name,Type,Latitude,Longitude,Dosages\n");
        assert!(directory.lookup(None).contains("City not set"));
    }

    #[test]
    fn missing_dataset_degrades() {
        let directory = PharmacyDirectory::new(Path::new("/nonexistent/pharmacies.csv"));
        let reply = directory.lookup(Some("Bangalore"));
        assert!(reply.contains("not available"));
    }
}
