// SYNOID Reel Library
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Typed model of JSON2Video render requests plus the clients and the
// generation pipeline built on top of it.

pub mod clients;
pub mod config;
pub mod pipeline;
pub mod prompt;
pub mod schema;

pub use config::Config;
pub use schema::{Element, Movie, Scene};
