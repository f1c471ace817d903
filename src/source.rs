//! Data sources that supply the base dataset.
//!
//! A source is fetched once; [`load`] drives the reducer through the fetch
//! lifecycle so the loading flag is raised while the request is in flight and
//! a failure leaves the previous dataset in place.

use crate::error::ViewError;
use crate::record::Dataset;
use crate::reducer::ViewReducer;
use async_trait::async_trait;
use log::{info, warn};

/// Supplies a dataset asynchronously.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self) -> Result<Dataset, ViewError>;
}

/// In-memory source, mostly for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        StaticSource { dataset }
    }

    /// Parses a JSON array and projects `fields` out of each element.
    pub fn from_json(json: &str, fields: &[&str]) -> Result<Self, ViewError> {
        Ok(StaticSource::new(Dataset::from_json_rows(json, fields)?))
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(&self) -> Result<Dataset, ViewError> {
        Ok(self.dataset.clone())
    }
}

/// Fetches a JSON array of records over HTTP.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    fields: Vec<String>,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// A source projecting [`COUNTRY_FIELDS`](crate::record::COUNTRY_FIELDS).
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_fields(url, &crate::record::COUNTRY_FIELDS)
    }

    pub fn with_fields(url: impl Into<String>, fields: &[&str]) -> Self {
        HttpSource {
            client: reqwest::Client::new(),
            url: url.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Dataset, ViewError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ViewError::Fetch(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ViewError::Decode(e.to_string()))?;

        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        Dataset::from_json_value(&body, &fields)
    }
}

/// Fetches from `source` and installs the result in `reducer`.
///
/// Failures are logged and swallowed; the reducer ends up not loading with
/// its previous dataset. Returns the number of records now loaded.
pub async fn load(reducer: &mut ViewReducer, source: &dyn DataSource) -> usize {
    reducer.begin_fetch();
    let result = source.fetch().await;
    finish(reducer, result)
}

/// Completes a fetch started with [`ViewReducer::begin_fetch`].
///
/// Split out from [`load`] so hosts that must not hold the reducer across an
/// await can fetch on their own and hand the result back.
pub fn finish(reducer: &mut ViewReducer, result: Result<Dataset, ViewError>) -> usize {
    match &result {
        Ok(dataset) => info!("Loaded {} records", dataset.len()),
        Err(e) => warn!("Data source failed: {}", e),
    }
    reducer.finish_fetch(result);
    reducer.dataset().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::COUNTRY_FIELDS;
    use crate::reducer::ViewStatus;
    use crate::state::ViewConfig;

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        async fn fetch(&self) -> Result<Dataset, ViewError> {
            Err(ViewError::Fetch("503 Service Unavailable".to_string()))
        }
    }

    const COUNTRIES: &str = r#"[
        {"name": "Colombia", "region": "Americas", "alpha2Code": "CO", "alpha3Code": "COL",
         "population": 48759958, "timezones": ["UTC-05:00"]},
        {"name": "Cyprus", "region": "Europe", "alpha2Code": "CY", "alpha3Code": "CYP",
         "population": 847000},
        {"name": "Czech Republic", "region": "Europe", "alpha2Code": "CZ", "alpha3Code": "CZE",
         "population": 10558524}
    ]"#;

    #[tokio::test]
    async fn test_load_static_source() {
        let source = StaticSource::from_json(COUNTRIES, &COUNTRY_FIELDS).unwrap();
        let mut reducer = ViewReducer::new(ViewConfig::default());

        assert_eq!(load(&mut reducer, &source).await, 3);
        assert!(!reducer.view().loading);
        assert_eq!(reducer.view().columns, COUNTRY_FIELDS.to_vec());
        assert_eq!(reducer.view().status(), ViewStatus::Rows);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_data() {
        let source = StaticSource::from_json(COUNTRIES, &COUNTRY_FIELDS).unwrap();
        let mut reducer = ViewReducer::new(ViewConfig::default());
        load(&mut reducer, &source).await;

        assert_eq!(load(&mut reducer, &FailingSource).await, 3);
        assert!(!reducer.state().is_loading());
        assert_eq!(reducer.view().rows.len(), 3);
    }

    #[tokio::test]
    async fn test_load_failure_on_empty_shows_no_data() {
        let mut reducer = ViewReducer::new(ViewConfig::default());
        assert_eq!(load(&mut reducer, &FailingSource).await, 0);
        assert_eq!(reducer.view().status(), ViewStatus::NoData);
    }

    #[test]
    fn test_finish_after_manual_fetch() {
        let mut reducer = ViewReducer::new(ViewConfig::default());
        reducer.begin_fetch();
        assert_eq!(reducer.view().status(), ViewStatus::Loading);

        let result = Dataset::from_json_rows(COUNTRIES, &COUNTRY_FIELDS);
        assert_eq!(finish(&mut reducer, result), 3);
        assert_eq!(reducer.view().status(), ViewStatus::Rows);
    }
}
