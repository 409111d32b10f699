use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Common output shape for a single store location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub address: String,
    /// `(latitude, longitude)`, serialized as a two element array
    pub coordinates: (f64, f64),
    pub name: String,
    pub phones: Vec<String>,
    pub working_hours: Vec<String>,
}

/// Everything needed to issue the GET request for a source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

/// Core trait that all store location sources must implement
pub trait StoreApi: Send + Sync {
    /// Unique identifier for this source
    fn api_name(&self) -> &'static str;

    /// Request that retrieves the raw listing
    fn request(&self) -> SourceRequest;

    /// Turn the raw response body into records, failing on any missing field
    fn normalize(&self, payload: &[u8]) -> Result<Vec<NormalizedRecord>>;
}
