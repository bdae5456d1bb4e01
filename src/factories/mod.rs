//! Random but valid payloads for positive-path tests.
//!
//! Nothing here is seeded: every run sees different data, which helps
//! surface tests that depend on ordering or on leftovers from other tests.
//! The `*_with_rng` variants exist for property tests.

mod link;
mod user;

pub use link::{build_link, build_link_with_rng, build_links, build_links_with_rng};
pub use user::{UserFactory, build_user, build_user_with_links};
