//! Helpers shared by the test binaries under `tests/`.
//! Not every binary uses every helper.
#![allow(dead_code)]


#[allow(unused_imports)]
pub use helpers::*;
#[allow(unused_imports)]
pub use test_data::*;
