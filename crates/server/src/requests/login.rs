use serde::Deserialize;

use service::auth::domain::LoginInput;
use service::validation::{Rule, RuleTable, Validate};

use super::Request;

const RULES: RuleTable = &[
    ("username", &[Rule::Required, Rule::Min(3)]),
    ("password", &[Rule::Required, Rule::Min(3)]),
];

/// Missing fields bind as empty strings and are reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn rules(&self) -> RuleTable {
        RULES
    }

    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "username" => Some(self.username.as_str()),
            "password" => Some(self.password.as_str()),
            _ => None,
        }
    }
}

impl Request for LoginRequest {}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput { username: req.username, password: req.password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_login_reports_both_fields() {
        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password", "username"]);
        assert_eq!(errors.get("username").unwrap()[0], "The username field is required");
    }

    #[test]
    fn short_password_is_rejected() {
        let req = LoginRequest { username: "alice".into(), password: "ab".into() };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password").unwrap()[0], "The password field must be minimum 3 char");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.password, "");
    }
}
