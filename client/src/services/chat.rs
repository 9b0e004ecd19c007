use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use crate::model::ChatAnswer;
use serde_json::json;
use std::sync::Arc;

/// Natural-language questions against the dashboard data.
pub struct ChatService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl ChatService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn ask_question(&self, question: &str) -> Outcome<ChatAnswer> {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/chat"))
            .json(&json!({ "question": question }));
        self.dispatcher.dispatch(descriptor).await
    }
}
