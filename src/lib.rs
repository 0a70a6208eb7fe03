//! Client engine for the subscription tracker web UI.
//!
//! Talks JSON over HTTP to the `/api/subscriptions` endpoints and keeps an
//! explicit page state (table, modal, notices) that renders to HTML
//! fragments.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod view;
