pub mod aggregator;
pub mod api;
pub mod availability;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod models;
pub mod transform;
