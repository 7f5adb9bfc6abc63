//! # vkgraph VK source
//!
//! [`EntitySource`](vkgraph_core::EntitySource) backed by the VK API
//! (`users.get`, `users.getFollowers`, `users.getSubscriptions`).

pub mod client;
pub mod config;
pub mod response;

pub use client::VkClient;
pub use config::VkConfig;
