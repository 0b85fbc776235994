//! Library exports for cosketch.
//!
//! The drawing side (regions, tools, strokes) and the collaboration side
//! (prompts, reply parsing, the two-phase orchestrator) are independent; a
//! [`session::Session`] ties them together for one user.

pub mod artwork;
pub mod collab;
pub mod config;
pub mod draw;
pub mod input;
pub mod session;
pub mod ui;

pub use config::Config;
