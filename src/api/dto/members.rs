use serde::{Deserialize, Serialize};

use crate::domain::Member;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub email: String,
    pub password: String,
    pub age: i32,
}

/// `password` is accepted for compatibility but never changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub age: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub age: i32,
}

impl From<&Member> for MemberResponse {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id(),
            email: m.email().to_string(),
            age: m.age(),
        }
    }
}
