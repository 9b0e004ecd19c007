use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use serde_json::Value;
use std::sync::Arc;

/// Drill-down inventory reports.
pub struct DetailReportService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl DetailReportService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn inventory_summary(&self) -> Outcome<Value> {
        let descriptor =
            RequestDescriptor::get(self.config.endpoint("/detail_report/inventory_summary"));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn turnover_analysis_by_region(&self) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(
            self.config
                .endpoint("/detail_report/turnover_analysis_by_region"),
        );
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn restock_recommendations(&self) -> Outcome<Value> {
        let descriptor =
            RequestDescriptor::get(self.config.endpoint("/detail_report/restock_recommendations"));
        self.dispatcher.dispatch(descriptor).await
    }
}
