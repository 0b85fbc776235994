use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::markup;
use super::prompt;
use super::relay::{HttpRelay, Relay, RelayError, RelayRequest};
use super::sections;
use super::types::{
    CollabError, OrchestrationState, PhaseStatus, PreconditionUnmet, Transition, VisionResult,
};
use crate::artwork::{ArtworkId, FileImageSource, ImageSource};
use crate::config::Config;

/// Token limits for the two round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollabLimits {
    pub generation_max_tokens: u32,
    pub vision_max_tokens: u32,
}

impl Default for CollabLimits {
    fn default() -> Self {
        Self {
            generation_max_tokens: 1000,
            vision_max_tokens: 1500,
        }
    }
}

/// Sequences the two model round trips and owns the collaboration state.
///
/// Cloning yields another handle to the same session. The state lock is only
/// held between suspension points, never across a relay call, so the drawing
/// path and other triggers stay responsive while a request is in flight.
/// Every request start and every reset bumps `request_sequence`; a reply whose
/// sequence is no longer current is dropped.
#[derive(Clone)]
pub struct Orchestrator {
    state: Arc<Mutex<OrchestrationState>>,
    relay: Arc<dyn Relay>,
    images: Arc<dyn ImageSource>,
    limits: CollabLimits,
}

impl Orchestrator {
    pub fn new(relay: Arc<dyn Relay>, images: Arc<dyn ImageSource>, limits: CollabLimits) -> Self {
        Self {
            state: Arc::new(Mutex::new(OrchestrationState::default())),
            relay,
            images,
            limits,
        }
    }

    /// Builds an orchestrator talking to the configured relay and artwork directory.
    pub fn from_config(config: &Config, artwork_root: Option<PathBuf>) -> Result<Self, RelayError> {
        let relay = HttpRelay::new(&config.relay)?;
        let root = artwork_root.unwrap_or_else(|| config.artwork.directory.clone());
        let images = FileImageSource::new(
            root,
            config.artwork.max_dimension,
            config.artwork.jpeg_quality,
        );
        Ok(Self::new(
            Arc::new(relay),
            Arc::new(images),
            CollabLimits {
                generation_max_tokens: config.relay.generation_max_tokens,
                vision_max_tokens: config.relay.vision_max_tokens,
            },
        ))
    }

    /// Current state, cloned.
    pub async fn snapshot(&self) -> OrchestrationState {
        self.state.lock().await.clone()
    }

    /// Asks for head instructions, a body fragment and leg instructions for `artwork`.
    ///
    /// Any earlier results are discarded. Re-triggering for the artwork that
    /// is already in flight does nothing; a different artwork supersedes it.
    pub async fn start_phase1(&self, artwork: ArtworkId) -> Result<Transition, CollabError> {
        let sequence = {
            let mut state = self.state.lock().await;
            if state.phase1_in_flight() && state.selected_artwork.as_ref() == Some(&artwork) {
                log::debug!("Instructions for {artwork} already requested, ignoring");
                return Ok(Transition::Ignored);
            }

            state.request_sequence += 1;
            state.selected_artwork = Some(artwork.clone());
            state.generation = None;
            state.vision = None;
            state.phase1 = PhaseStatus::Pending;
            state.phase2 = PhaseStatus::Idle;
            state.phase2_notice = None;
            state.request_sequence
        };

        log::info!("Requesting instructions for '{}' (#{sequence})", artwork.title());
        let outcome = self
            .round_trip(&artwork, prompt::phase1_prompt(), self.limits.generation_max_tokens)
            .await;

        let mut state = self.state.lock().await;
        if state.request_sequence != sequence {
            log::info!("Discarding stale instructions reply #{sequence}");
            return Ok(Transition::Discarded);
        }

        // A refusal issued while instructions were pending no longer applies.
        state.phase2_notice = None;
        match outcome {
            Ok(raw_text) => {
                let generation = sections::parse(&raw_text);
                if !generation.is_structured {
                    log::warn!("Instructions arrived without the expected sections");
                }
                state.generation = Some(generation);
                state.phase1 = PhaseStatus::Ready;
                Ok(Transition::Applied)
            }
            Err(err) => {
                log::error!("Instructions request failed: {err}");
                state.phase1 = PhaseStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Asks the model to draw the complete figure from its own instructions.
    ///
    /// Refuses without any relay call unless phase 1 produced usable head and
    /// legs instructions.
    pub async fn start_phase2(&self) -> Result<Transition, CollabError> {
        let (sequence, artwork, request_prompt) = {
            let mut state = self.state.lock().await;
            if state.phase2_in_flight() {
                log::debug!("Complete vision already requested, ignoring");
                return Ok(Transition::Ignored);
            }

            let checked = state.vision_precondition().map(prompt::phase2_prompt);
            let checked = checked.and_then(|request_prompt| {
                state
                    .selected_artwork
                    .clone()
                    .map(|artwork| (artwork, request_prompt))
                    .ok_or(PreconditionUnmet::NoArtwork)
            });
            let (artwork, request_prompt) = match checked {
                Ok(ready) => ready,
                Err(unmet) => {
                    log::warn!("Complete vision refused: {unmet}");
                    state.phase2_notice = Some(unmet);
                    return Err(CollabError::PreconditionUnmet(unmet));
                }
            };

            state.request_sequence += 1;
            state.vision = None;
            state.phase2 = PhaseStatus::Pending;
            state.phase2_notice = None;
            (state.request_sequence, artwork, request_prompt)
        };

        log::info!("Requesting complete vision for '{}' (#{sequence})", artwork.title());
        let outcome = self
            .round_trip(&artwork, request_prompt, self.limits.vision_max_tokens)
            .await;

        let mut state = self.state.lock().await;
        if state.request_sequence != sequence {
            log::info!("Discarding stale vision reply #{sequence}");
            return Ok(Transition::Discarded);
        }

        match outcome {
            Ok(raw_text) => {
                let extraction = markup::extract(&raw_text);
                if !extraction.is_markup_found {
                    log::warn!("Vision reply contains no markup block");
                }
                state.vision = Some(VisionResult {
                    markup: extraction.markup,
                    raw_text,
                    is_markup_found: extraction.is_markup_found,
                });
                state.phase2 = PhaseStatus::Ready;
                Ok(Transition::Applied)
            }
            Err(err) => {
                log::error!("Vision request failed: {err}");
                state.phase2 = PhaseStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Drops all results and selections. Replies still in flight will be discarded.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let request_sequence = state.request_sequence + 1;
        *state = OrchestrationState {
            request_sequence,
            ..OrchestrationState::default()
        };
        log::info!("Collaboration reset");
    }

    async fn round_trip(
        &self,
        artwork: &ArtworkId,
        prompt: String,
        max_tokens: u32,
    ) -> Result<String, CollabError> {
        let image = self
            .images
            .load_base64(artwork)
            .await
            .map_err(|e| CollabError::Image(e.to_string()))?;
        self.relay
            .complete(RelayRequest {
                prompt,
                image,
                max_tokens,
            })
            .await
            .map_err(|e| CollabError::Transport(e.to_string()))
    }
}
