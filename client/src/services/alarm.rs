use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use serde_json::Value;
use std::sync::Arc;

/// Threshold alarms over the imported tables.
pub struct AlarmService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl AlarmService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn list(&self) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(self.config.endpoint("/alarm_management/list"));
        self.dispatcher.dispatch(descriptor).await
    }

    /// Create an alarm from a natural-language description. The backend
    /// takes the description as a query parameter, not a body.
    pub async fn create(&self, user_input: &str) -> Outcome<Value> {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/alarm_management/create"))
            .query("user_input", user_input);
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn update(&self, id: i64, changes: &Value) -> Outcome<Value> {
        let descriptor = RequestDescriptor::patch(
            self.config
                .endpoint(&format!("/alarm_management/update/{id}")),
        )
        .json(changes);
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn delete(&self, id: i64) -> Outcome<Value> {
        let descriptor = RequestDescriptor::delete(
            self.config
                .endpoint(&format!("/alarm_management/delete/{id}")),
        );
        self.dispatcher.dispatch(descriptor).await
    }

    /// Evaluate the alarms configured for a table.
    pub async fn check(&self, table_name: &str) -> Outcome<Value> {
        let descriptor =
            RequestDescriptor::get(self.config.endpoint("/alarm_management/check_alarm"))
                .query("table_name", table_name);
        self.dispatcher.dispatch(descriptor).await
    }
}
