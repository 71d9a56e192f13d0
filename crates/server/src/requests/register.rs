use serde::Deserialize;

use service::auth::domain::RegisterInput;
use service::validation::{Rule, RuleTable, Validate};

use super::Request;

const RULES: RuleTable = &[
    ("username", &[Rule::Required, Rule::Between(3, 5)]),
    ("email", &[Rule::Required, Rule::Min(4), Rule::Max(20), Rule::Email]),
    ("name", &[Rule::Required, Rule::Min(4), Rule::Max(20)]),
    ("password", &[Rule::Required, Rule::Min(6)]),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn rules(&self) -> RuleTable {
        RULES
    }

    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "username" => Some(self.username.as_str()),
            "email" => Some(self.email.as_str()),
            "name" => Some(self.name.as_str()),
            "password" => Some(self.password.as_str()),
            _ => None,
        }
    }
}

impl Request for RegisterRequest {}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput { username: req.username, email: req.email, name: req.name, password: req.password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: "alice".into(),
            email: "alice@x.io".into(),
            name: "Alice Smith".into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn well_formed_registration_passes() {
        assert!(alice().validate().is_ok());
    }

    #[test]
    fn five_char_name_is_accepted() {
        let mut req = alice();
        req.name = "Alice".into();
        assert!(req.validate().is_ok());
        req.name = "Al".into();
        assert_eq!(req.validate().unwrap_err().get("name").unwrap()[0], "The name field must be minimum 4 char");
    }

    #[test]
    fn username_length_is_bounded() {
        let mut req = alice();
        req.username = "alexandra".into();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("username").unwrap()[0], "The username field must be between 3 and 5 chars");
    }

    #[test]
    fn malformed_email_gets_one_message() {
        let mut req = alice();
        req.email = "alice".into();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email").unwrap().len(), 1);
    }

    #[test]
    fn empty_payload_flags_every_field() {
        let errors = RegisterRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("password").unwrap().len(), 2);
    }
}
