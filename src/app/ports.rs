use crate::error::Result;
use crate::types::SourceRequest;
use async_trait::async_trait;

#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, request: &SourceRequest) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
