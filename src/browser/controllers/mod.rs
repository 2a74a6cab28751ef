//! # Controllers Module
//!
//! Orchestrates the view models, views and input source.

pub mod app_controller;

pub use app_controller::AppController;
