//! API endpoint integration tests
//!
//! Drive the composed router end to end: login, chat routing, logout, and
//! history persistence across restarts.

#![allow(dead_code)]

mod auth;
mod chat;
mod common;
mod history;
mod openai;
