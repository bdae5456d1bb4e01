use crate::domain::{SyntheticEmail, SyntheticLink};

/// Registration payload for a user created by the suite.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SyntheticUser {
    pub name: String,
    pub email: SyntheticEmail,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct UserWithLinks {
    pub user: SyntheticUser,
    pub links: Vec<SyntheticLink>,
}
