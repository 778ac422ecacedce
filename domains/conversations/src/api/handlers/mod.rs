//! HTTP handlers for the Conversations domain

pub mod auth;
pub mod chat;
