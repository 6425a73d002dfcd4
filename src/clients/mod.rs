// SYNOID Reel Clients
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// HTTP clients for the three remote services: JSON2Video (rendering),
// Pexels (stock media) and Gemini (prompting and media description).

pub mod gemini;
pub mod json2video;
pub mod pexels;

pub use gemini::{FileState, GeminiClient, GeminiError, UploadedFile};
pub use json2video::{JobDescriptor, RenderClient, RenderError};
pub use pexels::{RateLimit, StockMediaClient, StockMediaError};
