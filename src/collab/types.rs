//! Result and status types for the two collaboration phases.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::artwork::ArtworkId;

/// Outcome of parsing the phase-1 reply.
///
/// When the reply does not follow the three-section layout, only `raw_text`
/// is populated and `is_structured` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub head_text: String,
    pub body_markup: String,
    pub legs_text: String,
    pub raw_text: String,
    pub is_structured: bool,
}

impl GenerationResult {
    pub fn structured(head: &str, body: &str, legs: &str, raw: &str) -> Self {
        Self {
            head_text: head.to_string(),
            body_markup: body.to_string(),
            legs_text: legs.to_string(),
            raw_text: raw.to_string(),
            is_structured: true,
        }
    }

    pub fn unstructured(raw: &str) -> Self {
        Self {
            raw_text: raw.to_string(),
            ..Self::default()
        }
    }

    /// Whether this result can seed the second phase.
    pub fn is_usable_for_vision(&self) -> bool {
        self.is_structured && !self.head_text.is_empty() && !self.legs_text.is_empty()
    }
}

/// Outcome of the phase-2 reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisionResult {
    /// Extracted markup block, empty when none was found
    pub markup: String,
    pub raw_text: String,
    pub is_markup_found: bool,
}

/// Progress of one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Idle,
    Pending,
    Ready,
    Failed(String),
}

/// Combined state of the two-phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrchestratorState {
    Idle,
    Phase1Pending,
    Phase1Ready,
    Phase1Failed,
    Phase2Pending,
    Phase2Ready,
    Phase2Failed,
}

/// Why the second phase refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PreconditionUnmet {
    /// Phase 1 has never been started (or the session was reset)
    NoArtwork,
    /// Phase 1 is still waiting for its reply
    InstructionsPending,
    /// Phase 1 failed or produced no usable head/legs instructions
    NoInstructions,
}

impl fmt::Display for PreconditionUnmet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PreconditionUnmet::NoArtwork => {
                "No artwork selected! Please generate an artwork first."
            }
            PreconditionUnmet::InstructionsPending => {
                "Instructions are still on their way. Try again once they appear."
            }
            PreconditionUnmet::NoInstructions => {
                "No instructions found! Please generate an artwork first."
            }
        };
        f.write_str(message)
    }
}

/// Errors surfaced by collaboration transitions.
///
/// None of these is fatal: each one is also recorded in the session state so
/// the panels can render it, and the user may simply retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollabError {
    #[error("{0}")]
    Transport(String),

    #[error("Could not prepare artwork: {0}")]
    Image(String),

    #[error("{0}")]
    PreconditionUnmet(PreconditionUnmet),
}

/// What a transition did with its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The reply was stored in the session
    Applied,
    /// A request for the same work was already in flight; nothing was sent
    Ignored,
    /// A newer request or a reset superseded this one; its reply was dropped
    Discarded,
}

/// Mutable collaboration state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrchestrationState {
    pub selected_artwork: Option<ArtworkId>,
    pub generation: Option<GenerationResult>,
    pub vision: Option<VisionResult>,
    pub phase1: PhaseStatus,
    pub phase2: PhaseStatus,
    /// Guidance from the last refused phase-2 request
    pub phase2_notice: Option<PreconditionUnmet>,
    /// Bumped by every request start and every reset
    pub request_sequence: u64,
}

impl OrchestrationState {
    pub fn phase1_in_flight(&self) -> bool {
        self.phase1 == PhaseStatus::Pending
    }

    pub fn phase2_in_flight(&self) -> bool {
        self.phase2 == PhaseStatus::Pending
    }

    pub fn state(&self) -> OrchestratorState {
        match (&self.phase1, &self.phase2) {
            (_, PhaseStatus::Pending) => OrchestratorState::Phase2Pending,
            (_, PhaseStatus::Ready) => OrchestratorState::Phase2Ready,
            (_, PhaseStatus::Failed(_)) => OrchestratorState::Phase2Failed,
            (PhaseStatus::Idle, PhaseStatus::Idle) => OrchestratorState::Idle,
            (PhaseStatus::Pending, PhaseStatus::Idle) => OrchestratorState::Phase1Pending,
            (PhaseStatus::Ready, PhaseStatus::Idle) => OrchestratorState::Phase1Ready,
            (PhaseStatus::Failed(_), PhaseStatus::Idle) => OrchestratorState::Phase1Failed,
        }
    }

    /// Checks whether phase 2 may start from the current state.
    pub fn vision_precondition(&self) -> Result<&GenerationResult, PreconditionUnmet> {
        match (&self.phase1, &self.generation) {
            (PhaseStatus::Idle, _) => Err(PreconditionUnmet::NoArtwork),
            (PhaseStatus::Pending, _) => Err(PreconditionUnmet::InstructionsPending),
            (PhaseStatus::Ready, Some(generation)) if generation.is_usable_for_vision() => {
                Ok(generation)
            }
            _ => Err(PreconditionUnmet::NoInstructions),
        }
    }
}
