use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use crate::model::{AdminUserUpdate, BaseResponse, UserDetails, UserOverview, UserRole};
use std::sync::Arc;

/// Administration of all dashboard accounts.
pub struct AdminUserService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl AdminUserService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn list_all(&self) -> Outcome<BaseResponse<UserOverview>> {
        let descriptor = RequestDescriptor::get(self.config.endpoint("/admin/users"));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn details(&self, user_id: i64) -> Outcome<BaseResponse<UserDetails>> {
        let descriptor =
            RequestDescriptor::get(self.config.endpoint(&format!("/admin/users/{user_id}")));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn update(&self, user_id: i64, update: &AdminUserUpdate) -> Outcome<BaseResponse> {
        let descriptor =
            RequestDescriptor::put(self.config.endpoint(&format!("/admin/users/{user_id}")))
                .json(update);
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn delete(&self, user_id: i64) -> Outcome<BaseResponse> {
        let descriptor =
            RequestDescriptor::delete(self.config.endpoint(&format!("/admin/users/{user_id}")));
        self.dispatcher.dispatch(descriptor).await
    }

    /// Shorthand for a role-only update.
    pub async fn promote_to_admin(&self, user_id: i64) -> Outcome<BaseResponse> {
        self.update(
            user_id,
            &AdminUserUpdate {
                role: Some(UserRole::Admin),
                ..AdminUserUpdate::default()
            },
        )
        .await
    }
}
