//! HTTP 处理器模块

pub mod auth;
pub mod cart;
pub mod docs;
pub mod grocery;
pub mod health;
