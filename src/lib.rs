pub mod clients;
pub mod configuration;
pub mod contract;
pub mod domain;
pub mod error;
pub mod factories;
pub mod fixtures;
pub mod identifier;
pub mod lifecycle;
pub mod startup;
pub mod suite;
pub mod telemetry;
