//! Vehicle brand/model catalog and its TTL cache.

use moka::future::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::models::{
    Brand, BrandSummary, CatalogFile, ModelSummary, SearchHit, SearchHitKind,
};

pub const CATALOG_CACHE_KEY: &str = "vehicle_catalog";
pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_SEARCH_RESULTS: usize = 20;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read vehicle catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse vehicle catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lowercase and drop diacritics so "Škoda", "skoda" and "SKODA" compare equal.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'ё' => 'е',
            'й' => 'и',
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
            'ç' | 'č' | 'ć' => 'c',
            'è' | 'é' | 'ê' | 'ë' | 'ě' | 'ē' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' | 'ň' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
            'ř' => 'r',
            'š' | 'ś' => 's',
            'ù' | 'ú' | 'û' | 'ü' | 'ů' => 'u',
            'ý' | 'ÿ' => 'y',
            'ž' | 'ź' | 'ż' => 'z',
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    brands: Vec<Brand>,
}

impl VehicleCatalog {
    pub fn new(brands: Vec<Brand>) -> Self {
        Self { brands }
    }

    pub fn from_json(raw: &[u8]) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_slice(raw)?;
        Ok(Self::new(file.data))
    }

    pub fn brands(&self) -> Vec<BrandSummary> {
        self.brands
            .iter()
            .map(|b| BrandSummary {
                id: b.id.clone(),
                name: b.name.clone(),
                cyrillic_name: b.cyrillic_name.clone().unwrap_or_else(|| b.name.clone()),
            })
            .collect()
    }

    /// Models of the brand whose id equals `brand_id` uppercased.
    pub fn models(&self, brand_id: &str) -> Vec<ModelSummary> {
        let wanted = brand_id.to_uppercase();
        let Some(brand) = self.brands.iter().find(|b| b.id == wanted) else {
            return Vec::new();
        };

        brand
            .models
            .iter()
            .map(|m| ModelSummary {
                id: m.id.clone(),
                name: m.name.clone(),
                cyrillic_name: m.cyrillic_name.clone().unwrap_or_else(|| m.name.clone()),
                full_name: format!("{} {}", brand.name, m.name),
            })
            .collect()
    }

    /// Substring search over brand and model names, Latin and Cyrillic.
    /// Queries shorter than two characters return nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let q = fold(query.trim());
        if q.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let mut results = Vec::new();
        for brand in &self.brands {
            let brand_cyr = brand.cyrillic_name.as_deref().unwrap_or_default();
            if fold(&brand.name).contains(&q) || fold(brand_cyr).contains(&q) {
                results.push(SearchHit {
                    kind: SearchHitKind::Brand,
                    value: brand.name.clone(),
                    label: format!(
                        "{} ({})",
                        brand.name,
                        brand.cyrillic_name.as_deref().unwrap_or(&brand.name)
                    ),
                });
            }

            for model in &brand.models {
                let full = format!("{} {}", brand.name, model.name);
                let model_cyr = model.cyrillic_name.as_deref().unwrap_or_default();
                if fold(&model.name).contains(&q)
                    || fold(model_cyr).contains(&q)
                    || fold(&full).contains(&q)
                {
                    results.push(SearchHit {
                        kind: SearchHitKind::Model,
                        label: format!(
                            "{} ({})",
                            full,
                            model.cyrillic_name.as_deref().unwrap_or(&model.name)
                        ),
                        value: full,
                    });
                }
            }

            if results.len() >= MAX_SEARCH_RESULTS {
                break;
            }
        }

        results.truncate(MAX_SEARCH_RESULTS);
        results
    }
}

/// Catalog file held in memory for a limited time.
#[derive(Clone)]
pub struct VehicleCatalogCache {
    path: PathBuf,
    cache: Cache<String, Arc<VehicleCatalog>>,
}

impl VehicleCatalogCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).max_capacity(1).build();
        Self {
            path: path.into(),
            cache,
        }
    }

    /// Cached catalog, reloading from disk once the entry has expired.
    /// Concurrent misses share a single load.
    pub async fn get(&self) -> Result<Arc<VehicleCatalog>, Arc<CatalogError>> {
        let path = self.path.clone();
        self.cache
            .try_get_with(CATALOG_CACHE_KEY.to_string(), async move {
                let raw = tokio::fs::read(&path).await.map_err(|source| CatalogError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                let catalog = VehicleCatalog::from_json(&raw)?;
                log::info!(
                    "Vehicle catalog loaded from {} ({} brands)",
                    path.display(),
                    catalog.brands.len()
                );
                Ok::<_, CatalogError>(Arc::new(catalog))
            })
            .await
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate(CATALOG_CACHE_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {
                "id": "TOYOTA",
                "name": "Toyota",
                "cyrillic_name": "Тойота",
                "models": [
                    { "id": "CAMRY", "name": "Camry", "cyrillic_name": "Камри" },
                    { "id": "COROLLA", "name": "Corolla" }
                ]
            },
            {
                "id": "SKODA",
                "name": "Škoda",
                "cyrillic_name": "Шкода",
                "models": [{ "id": "OCTAVIA", "name": "Octavia", "cyrillic_name": "Октавия" }]
            },
            { "id": "LADA", "name": "Lada", "cyrillic_name": "Лада (ВАЗ)", "models": [] }
        ]
    }"#;

    fn catalog() -> VehicleCatalog {
        VehicleCatalog::from_json(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_brands_fall_back_to_latin_name() {
        let brands = catalog().brands();
        assert_eq!(brands.len(), 3);
        assert_eq!(brands[0].cyrillic_name, "Тойота");
    }

    #[test]
    fn test_models_by_brand_id_is_case_insensitive() {
        let models = catalog().models("toyota");
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].full_name, "Toyota Camry");
        assert_eq!(models[1].cyrillic_name, "Corolla");
        assert!(catalog().models("unknown").is_empty());
    }

    #[test]
    fn test_short_query_returns_nothing() {
        assert!(catalog().search("t").is_empty());
        assert!(catalog().search("  ").is_empty());
    }

    #[test]
    fn test_search_matches_cyrillic_and_full_name() {
        let hits = catalog().search("камри");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, SearchHitKind::Model);
        assert_eq!(hits[0].value, "Toyota Camry");

        let hits = catalog().search("toyota cor");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "Toyota Corolla (Corolla)");
    }

    #[test]
    fn test_search_ignores_diacritics() {
        let hits = catalog().search("skoda");
        assert_eq!(hits[0].kind, SearchHitKind::Brand);
        assert_eq!(hits[0].value, "Škoda");
    }

    #[test]
    fn test_search_is_capped() {
        let models = (0..30)
            .map(|i| super::super::models::Model {
                id: format!("M{i}"),
                name: format!("Model {i}"),
                cyrillic_name: None,
            })
            .collect();
        let catalog = VehicleCatalog::new(vec![Brand {
            id: "GEN".to_string(),
            name: "Generic".to_string(),
            cyrillic_name: None,
            models,
        }]);
        assert_eq!(catalog.search("model").len(), MAX_SEARCH_RESULTS);
    }
}
