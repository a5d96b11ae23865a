pub mod api;
pub mod app;
pub mod auth;
pub mod database;
pub mod notifier;
pub mod repository;
pub mod ui;
