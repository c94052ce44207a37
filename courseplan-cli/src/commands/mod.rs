pub mod browse;
pub mod classtable;
pub mod config;
pub mod export;
pub mod fetch;
pub mod plan;
pub mod semesters;
