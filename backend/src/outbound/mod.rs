//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **identity**: userinfo-endpoint identity provider using reqwest

pub mod identity;
pub mod persistence;
