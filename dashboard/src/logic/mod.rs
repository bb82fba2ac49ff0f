//! Logic Module - Polling & Reconciliation Engine
//!
//! ## Layout
//! - `client` / `payload` - Status fetch and decoding
//! - `connection` / `change_detector` - Engine state
//! - `render/` - Region renderers (detections, guidance, log tail)
//! - `engine` / `poll_loop` - Completion handling and scheduling

pub mod config;
pub mod payload;
pub mod client;
pub mod connection;
pub mod change_detector;
pub mod render;
pub mod view;
pub mod engine;
pub mod poll_loop;

pub use config::DashboardConfig;
pub use client::StatusClient;
pub use poll_loop::PollLoop;
