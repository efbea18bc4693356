use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

use crate::api::id_string;

/// `data` of `GET /users/{user_id}`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub username: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub mobile: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub email: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    pub email_active: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub mobile: String,
    pub email: String,
    pub email_active: bool,
}

impl UserProfile {
    /// `email` and `email_active` are part of the contract but not read yet;
    /// they keep their defaults whatever the server sends.
    pub fn load(&mut self, record: UserRecord) {
        self.user_id = record.id;
        self.username = record.username;
        self.mobile = record.mobile;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn email_fields_are_left_alone() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id": 7, "username": "ann", "mobile": "13800000000", "email": "ann@example.com", "email_active": true}"#,
        )
        .unwrap();
        assert_eq!(record.email.as_deref(), Some("ann@example.com"));

        let mut profile = UserProfile::default();
        profile.load(record);

        assert_eq!(
            profile,
            UserProfile {
                user_id: "7".into(),
                username: "ann".into(),
                mobile: "13800000000".into(),
                email: "".into(),
                email_active: false,
            }
        );
    }

    #[test]
    fn null_mobile() {
        let record: UserRecord =
            serde_json::from_str(r#"{"id": "7", "username": "ann", "mobile": null}"#).unwrap();

        assert_eq!(record.mobile, "");
    }
}
