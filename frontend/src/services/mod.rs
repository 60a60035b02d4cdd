pub mod api;
pub mod auth;
pub mod date_utils;
pub mod download;
pub mod logging;
