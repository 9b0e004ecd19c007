use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use serde_json::Value;
use std::sync::Arc;

/// The landing dashboard: schema overview and the precomputed analysis.
pub struct DashboardService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl DashboardService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn schema(&self) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(self.config.endpoint("/dashboard/"));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn analysis(&self) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(self.config.endpoint("/dashboard/analysis"));
        self.dispatcher.dispatch(descriptor).await
    }
}
