//! Tournament API Library
//!
//! This library provides the core functionality for the tournament API:
//! the season/match lifecycle, the store contract and its adapters, and the
//! HTTP layer.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
