use crate::domain::{ReservedDomain, SyntheticEmail, SyntheticUser, UserWithLinks};
use crate::factories::build_links_with_rng;
use fake::Fake;
use fake::faker::internet::en::Password;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;

/// Builds users under one reserved domain.
#[derive(Debug, Clone, Default)]
pub struct UserFactory {
    domain: ReservedDomain,
}

impl UserFactory {
    pub fn new(domain: ReservedDomain) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &ReservedDomain {
        &self.domain
    }

    pub fn build_user(&self) -> SyntheticUser {
        self.build_user_with_rng(&mut rand::thread_rng())
    }

    pub fn build_user_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> SyntheticUser {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        // The hex tag keeps two users with the same name from colliding on email.
        let tag = rng.gen_range(0..=u32::MAX);
        let local_part = format!(
            "{}.{}.{:08x}",
            email_safe(&first_name),
            email_safe(&last_name),
            tag
        );

        SyntheticUser {
            name: format!("{} {}", first_name, last_name),
            email: SyntheticEmail::from_local_part(&local_part, &self.domain),
            password: Password(8..20).fake_with_rng(rng),
        }
    }

    pub fn build_user_with_links(&self, links_count: usize) -> UserWithLinks {
        let mut rng = rand::thread_rng();
        UserWithLinks {
            user: self.build_user_with_rng(&mut rng),
            links: build_links_with_rng(links_count, &mut rng),
        }
    }
}

/// Lowercase ASCII alphanumerics of `name`, or `user` if nothing is left.
fn email_safe(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.is_empty() {
        "user".to_string()
    } else {
        cleaned
    }
}

pub fn build_user() -> SyntheticUser {
    UserFactory::default().build_user()
}

pub fn build_user_with_links(links_count: usize) -> UserWithLinks {
    UserFactory::default().build_user_with_links(links_count)
}
