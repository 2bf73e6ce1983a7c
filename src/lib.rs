pub mod api;
pub mod config;
pub mod humanize;
pub mod negotiation;
pub mod observability;
