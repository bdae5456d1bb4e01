#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SyntheticLink {
    pub original_url: String,
    pub title: String,
}
