pub mod dashboard;
pub mod datahub;
pub mod demand;
pub mod insights;
pub mod optimization;
pub mod prediction;
pub mod reports;
pub mod settings;
