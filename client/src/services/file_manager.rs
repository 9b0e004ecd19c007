use crate::api::{BodyPart, Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use serde_json::Value;
use std::sync::Arc;

const CSV_MIME: &str = "text/csv";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Table uploads and table management.
pub struct FileManagerService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl FileManagerService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Import a CSV file into a new table.
    pub async fn upload_csv(
        &self,
        table_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Outcome<Value> {
        self.upload(self.config.endpoint("/file_manager/upload/csv/"), table_name, file_name, CSV_MIME, bytes)
            .await
    }

    /// Import an Excel workbook into a new table.
    pub async fn upload_excel(
        &self,
        table_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Outcome<Value> {
        self.upload(self.config.endpoint("/file_manager/upload/excel/"), table_name, file_name, XLSX_MIME, bytes)
            .await
    }

    pub async fn tables(&self) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(self.config.endpoint("/file_manager/tables/"));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn table_info(&self, table_name: &str) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(
            self.config
                .endpoint(&format!("/file_manager/tables/{table_name}/info")),
        );
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn table_data(&self, table_name: &str) -> Outcome<Value> {
        let descriptor = RequestDescriptor::get(
            self.config
                .endpoint(&format!("/file_manager/tables/{table_name}/data")),
        );
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn delete_table(&self, table_name: &str) -> Outcome<Value> {
        let descriptor = RequestDescriptor::delete(
            self.config
                .endpoint(&format!("/file_manager/tables/{table_name}")),
        );
        self.dispatcher.dispatch(descriptor).await
    }

    /// Replace or append to an existing table from a fresh file.
    pub async fn update_table(
        &self,
        table_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
        replace: bool,
    ) -> Outcome<Value> {
        let descriptor = RequestDescriptor::put(
            self.config
                .endpoint(&format!("/file_manager/tables/{table_name}")),
        )
        .multipart(vec![
            BodyPart::file("file", file_name, CSV_MIME, bytes),
            BodyPart::text("replace", replace.to_string()),
        ]);
        self.dispatcher.dispatch(descriptor).await
    }

    async fn upload(
        &self,
        url: String,
        table_name: &str,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Outcome<Value> {
        let descriptor = RequestDescriptor::post(url).multipart(vec![
            BodyPart::file("file", file_name, mime, bytes),
            BodyPart::text("table_name", table_name),
        ]);
        self.dispatcher.dispatch(descriptor).await
    }
}
