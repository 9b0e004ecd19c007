use crate::api::{BodyPart, Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use crate::model::GenerateDataRequest;
use serde_json::Value;
use std::sync::Arc;

/// Synthetic data generation, served by the chat backend.
pub struct SyntheticDataService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl SyntheticDataService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Upload a source database file to seed generation from.
    pub async fn upload_database(&self, file_name: &str, bytes: Vec<u8>) -> Outcome<Value> {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/chat/upload/")).multipart(
            vec![BodyPart::file(
                "file",
                file_name,
                "application/octet-stream",
                bytes,
            )],
        );
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn schema(&self, table_name: &str) -> Outcome<Value> {
        let descriptor =
            RequestDescriptor::get(self.config.endpoint(&format!("/chat/schema/{table_name}")));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn generate(&self, table_name: &str, num_records: u64) -> Outcome<Value> {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/chat/generate/")).json(
            &GenerateDataRequest {
                table_name: table_name.to_string(),
                num_records,
            },
        );
        self.dispatcher.dispatch(descriptor).await
    }
}
