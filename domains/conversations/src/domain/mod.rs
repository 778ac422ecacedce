//! Domain layer for Conversations: entities and intent classification

pub mod classifier;
pub mod entities;
