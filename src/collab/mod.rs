//! Two-phase collaboration with the model.
//!
//! Phase 1 sends a reference artwork and receives head instructions, a body
//! fragment and leg instructions. Phase 2 sends those back and receives the
//! model's own complete figure.

pub mod markup;
pub mod orchestrator;
pub mod prompt;
pub mod relay;
pub mod sections;
pub mod types;


pub use markup::{MarkupExtraction, extract};
pub use orchestrator::{CollabLimits, Orchestrator};
pub use relay::{HttpRelay, Relay, RelayError, RelayRequest};
pub use sections::{StructureMismatch, parse};
pub use types::{
    CollabError, GenerationResult, OrchestrationState, OrchestratorState, PhaseStatus,
    PreconditionUnmet, Transition, VisionResult,
};
