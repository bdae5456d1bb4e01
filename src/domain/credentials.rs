use crate::domain::SyntheticUser;

#[derive(Debug, Clone, serde::Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl From<&SyntheticUser> for Credentials {
    fn from(user: &SyntheticUser) -> Self {
        Self {
            email: user.email.as_ref().to_string(),
            password: user.password.clone(),
        }
    }
}
