//! Gemini-backed analysis of social-media post URLs.
//!
//! [`Analyzer`] builds an extraction prompt, makes a single
//! `generateContent` call with the search tool enabled, and normalizes the
//! returned JSON into a [`socialsave_core::Post`].

pub mod analyzer;
pub mod client;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod types;

pub use analyzer::Analyzer;
pub use client::{ClientOptions, GeminiClient};
pub use error::{AnalysisError, GeminiError};
pub use normalize::{normalize_reply, thumbnail_url};
