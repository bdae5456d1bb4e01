mod bearer_token;
mod credentials;
mod reserved_domain;
mod synthetic_email;
mod synthetic_link;
mod synthetic_user;

pub use bearer_token::BearerToken;
pub use credentials::Credentials;
pub use reserved_domain::ReservedDomain;
pub use synthetic_email::SyntheticEmail;
pub use synthetic_link::SyntheticLink;
pub use synthetic_user::{SyntheticUser, UserWithLinks};
