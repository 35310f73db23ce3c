pub mod analysis;
pub mod catalog;
pub mod config;
pub mod datahub;
pub mod dataset;
pub mod domain;
pub mod entitlement;
pub mod fixtures;
pub mod format;
pub mod plan;
pub mod series;
