use crate::domain::SyntheticLink;
use fake::Fake;
use fake::faker::internet::en::DomainSuffix;
use fake::faker::lorem::en::{Word, Words};
use rand::Rng;

pub fn build_link() -> SyntheticLink {
    build_link_with_rng(&mut rand::thread_rng())
}

pub fn build_link_with_rng<R: Rng + ?Sized>(rng: &mut R) -> SyntheticLink {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    let path: String = Word().fake_with_rng(rng);
    let title: Vec<String> = Words(3..4).fake_with_rng(rng);

    SyntheticLink {
        original_url: format!("https://{}.{}/{}", host, suffix, path),
        title: title.join(" "),
    }
}

pub fn build_links(count: usize) -> Vec<SyntheticLink> {
    build_links_with_rng(count, &mut rand::thread_rng())
}

pub fn build_links_with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<SyntheticLink> {
    (0..count).map(|_| build_link_with_rng(rng)).collect()
}
