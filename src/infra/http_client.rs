use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::HttpConfig;
use crate::error::Result;
use crate::types::SourceRequest;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get(&self, request: &SourceRequest) -> Result<HttpGetResult> {
        let mut builder = self.client.get(&request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?.to_vec();
        debug!(status, bytes = bytes.len(), "Fetched payload");

        Ok(HttpGetResult { status, bytes })
    }
}
