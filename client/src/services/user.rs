use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use crate::model::{BaseResponse, User, UserCreate, UserUpdate};
use std::sync::Arc;

/// Account registration and the caller's own profile.
pub struct UserService {
    dispatcher: Arc<RequestDispatcher>,
    config: ApiConfig,
}

impl UserService {
    pub fn new(dispatcher: Arc<RequestDispatcher>, config: ApiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn register(&self, user: &UserCreate) -> Outcome<BaseResponse<User>> {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/users")).json(user);
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn my_profile(&self) -> Outcome<BaseResponse<User>> {
        let descriptor = RequestDescriptor::get(self.config.endpoint("/users/me"));
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn update_profile(&self, update: &UserUpdate) -> Outcome<BaseResponse> {
        let descriptor = RequestDescriptor::put(self.config.endpoint("/users/me")).json(update);
        self.dispatcher.dispatch(descriptor).await
    }

    pub async fn delete_account(&self) -> Outcome<BaseResponse> {
        let descriptor = RequestDescriptor::delete(self.config.endpoint("/users/me"));
        self.dispatcher.dispatch(descriptor).await
    }
}
