//! Record counts for the dashboard's stats cards

use crate::client::envelope;
use crate::client::transport::ApiClient;
use crate::core::error::AdminError;
use futures::future::join_all;
use indexmap::IndexMap;
use tracing::instrument;

/// Resources counted on the dashboard, in card order
pub const STAT_RESOURCES: &[&str] = &[
    "tags",
    "coupons",
    "categories",
    "collections",
    "orders",
    "products",
];

#[derive(Debug, Default)]
pub struct DashboardStats {
    counts: IndexMap<String, usize>,
    failures: IndexMap<String, AdminError>,
}

impl DashboardStats {
    /// Fetch every resource list concurrently and count the records
    ///
    /// A resource that fails counts as 0 and is kept in [`failures`](Self::failures);
    /// the other cards still show.
    #[instrument(skip(api))]
    pub async fn fetch(api: &ApiClient) -> Self {
        Self::fetch_resources(api, STAT_RESOURCES).await
    }

    pub async fn fetch_resources(api: &ApiClient, resources: &[&str]) -> Self {
        let requests = resources.iter().map(|resource| async move {
            let path = format!("/api/{}", resource);
            let result = api.get_json(&path).await.map(|body| {
                let (items, shape) = envelope::unwrap_list(body);
                if shape == envelope::ListShape::Unrecognized {
                    tracing::warn!(resource = %resource, "Unrecognized list response shape, counting 0");
                }
                items.len()
            });
            (resource.to_string(), result)
        });

        let mut stats = Self::default();
        for (resource, result) in join_all(requests).await {
            match result {
                Ok(count) => {
                    stats.counts.insert(resource, count);
                }
                Err(e) => {
                    tracing::error!(resource = %resource, "Failed to fetch stats: {}", e);
                    stats.counts.insert(resource.clone(), 0);
                    stats.failures.insert(resource, e);
                }
            }
        }
        stats
    }

    /// Count for a resource; 0 when it failed or was not requested
    pub fn count(&self, resource: &str) -> usize {
        self.counts.get(resource).copied().unwrap_or(0)
    }

    /// `(resource, count)` pairs in card order
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn failures(&self) -> &IndexMap<String, AdminError> {
        &self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_unreachable_backend_counts_zero() {
        // Port 9 (discard) is not listening on loopback in test environments
        let api = ApiClient::new(&ApiConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            timeout_secs: 2,
        })
        .unwrap();

        let stats = DashboardStats::fetch_resources(&api, &["tags", "orders"]).await;
        assert_eq!(stats.count("tags"), 0);
        assert_eq!(stats.count("orders"), 0);
        assert!(!stats.is_complete());
        assert_eq!(stats.failures().len(), 2);
        let names: Vec<&str> = stats.counts().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["tags", "orders"]);
        assert!(matches!(
            stats.failures().get("tags"),
            Some(AdminError::Network { .. })
        ));
    }
}
