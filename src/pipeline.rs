use crate::app::ports::HttpClientPort;
use crate::error::Result;
use crate::storage::Storage;
use crate::types::{NormalizedRecord, StoreApi};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Outcome for one source within a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub api_name: String,
    pub status: u16,
    pub success: bool,
    pub records: usize,
}

impl SourceSummary {
    /// The endpoint answered with a non-success status and contributed nothing
    pub fn skipped(&self) -> bool {
        !self.success
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub sources: Vec<SourceSummary>,
    pub total_records: usize,
    pub output_file: String,
}

/// Fetches every source in turn, merges their records and saves them once.
pub struct Pipeline<'a> {
    http: &'a dyn HttpClientPort,
}

impl<'a> Pipeline<'a> {
    pub fn new(http: &'a dyn HttpClientPort) -> Self {
        Self { http }
    }

    /// Fetch and normalize one source. A non-success status or a 2xx with an
    /// empty body (e.g. 204) yields no records; transport and parse failures
    /// are returned to the caller.
    #[instrument(skip(self, api), fields(api_name = %api.api_name()))]
    pub async fn collect(&self, api: &dyn StoreApi) -> Result<(SourceSummary, Vec<NormalizedRecord>)> {
        let request = api.request();
        let response = self.http.get(&request).await?;

        let records = if !response.is_success() {
            warn!(
                status = response.status,
                "Source responded with non-success status, treating as empty"
            );
            Vec::new()
        } else if response.bytes.iter().all(u8::is_ascii_whitespace) {
            warn!(status = response.status, "Source returned an empty body, treating as empty");
            Vec::new()
        } else {
            api.normalize(&response.bytes)?
        };

        let summary = SourceSummary {
            api_name: api.api_name().to_string(),
            status: response.status,
            success: response.is_success(),
            records: records.len(),
        };
        Ok((summary, records))
    }

    /// Run all `apis` in the given order and write the merged list.
    /// Nothing is written if any source fails.
    pub async fn run(&self, apis: &[Box<dyn StoreApi>], storage: &dyn Storage) -> Result<PipelineResult> {
        let mut sources = Vec::with_capacity(apis.len());
        let mut all_records = Vec::new();

        for api in apis {
            info!("Starting source {}", api.api_name());
            let (summary, records) = self.collect(api.as_ref()).await?;
            info!("Source {} produced {} records", summary.api_name, summary.records);
            sources.push(summary);
            all_records.extend(records);
        }

        storage.save(&all_records).await?;

        Ok(PipelineResult {
            sources,
            total_records: all_records.len(),
            output_file: storage.location(),
        })
    }
}
