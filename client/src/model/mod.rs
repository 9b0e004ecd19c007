use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response envelope used by most dashboard endpoints.
///
/// Endpoints that carry no payload leave `response` absent; errors surface
/// through `success` and `message`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct BaseResponse<T = Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
}

/// Role assigned to a dashboard account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// A dashboard account as returned by the profile endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Payload for registering a new account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserCreate {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial update of the caller's own profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Partial update of any account, admin only.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Aggregate usage metrics plus the per-account activity rows shown on the
/// admin user overview.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserOverview {
    pub general_metrics: GeneralMetrics,
    pub users_info: Vec<UserActivity>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneralMetrics {
    pub total_users: u64,
    pub total_admins: u64,
    pub total_questions_asked: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserActivity {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub questions_asked: u64,
}

/// Full account record as returned by the admin detail endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserDetails {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: String,
}

/// Answer produced by the chat assistant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatAnswer {
    pub response: Value,
}

/// Request payload for synthetic data generation. The API expects camelCase
/// field names here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDataRequest {
    pub table_name: String,
    pub num_records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_response_tolerates_missing_fields() {
        let parsed: BaseResponse<User> = serde_json::from_value(json!({})).expect("decode");
        assert!(!parsed.success);
        assert_eq!(parsed.message, None);
        assert_eq!(parsed.response, None);
    }

    #[test]
    fn user_overview_decodes_roles() {
        let parsed: UserOverview = serde_json::from_value(json!({
            "general_metrics": {
                "total_users": 3,
                "total_admins": 1,
                "total_questions_asked": 42
            },
            "users_info": [
                {"name": "Ada", "email": "ada@example.com", "role": "admin", "questions_asked": 40},
                {"name": "Bob", "email": "bob@example.com", "role": "user", "questions_asked": 2}
            ]
        }))
        .expect("decode");
        assert_eq!(parsed.users_info[0].role, UserRole::Admin);
        assert_eq!(parsed.users_info[1].role, UserRole::User);
    }

    #[test]
    fn partial_updates_skip_unset_fields() {
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..UserUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).expect("encode"),
            json!({"email": "new@example.com"})
        );
    }

    #[test]
    fn generate_request_uses_camel_case_on_the_wire() {
        let request = GenerateDataRequest {
            table_name: "inventory".to_string(),
            num_records: 100,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("encode"),
            json!({"tableName": "inventory", "numRecords": 100})
        );
    }
}
