//! Single-request generation session.
//!
//! A session owns the one visible state of a generator surface and drives
//! the generate-then-watermark pipeline. Front-ends watch the state through
//! [`StorySession::subscribe`].
//!
//! Every submit starts a new run. Dismissing the surface, or submitting
//! again, ends the previous run: its pending work is dropped and its result
//! is never published.

use std::future::Future;

use tokio::sync::watch;

use crate::error::StoryError;
use crate::generate::{validate_request, GenerationClient};
use crate::messages::{user_message, Locale};
use crate::models::{GenerationRequest, Platform};
use crate::watermark::apply_watermark;

/// What the generator surface shows. Exactly one at a time.
#[derive(Clone, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Loading,
    /// Final watermarked PNG.
    Success(Vec<u8>),
    Error(String),
}

impl std::fmt::Debug for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationState::Idle => f.write_str("Idle"),
            GenerationState::Loading => f.write_str("Loading"),
            GenerationState::Success(png) => write!(f, "Success({} bytes)", png.len()),
            GenerationState::Error(message) => f.debug_tuple("Error").field(message).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The run's result (or validation error) was published.
    Delivered,
    /// The run was dismissed or superseded before it finished.
    Dismissed,
}

pub struct StorySession {
    client: GenerationClient,
    locale: Locale,
    state: watch::Sender<GenerationState>,
    run: watch::Sender<u64>,
}

impl StorySession {
    pub fn new(client: GenerationClient, locale: Locale) -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        let (run, _) = watch::channel(0);
        Self {
            client,
            locale,
            state,
            run,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    /// Runs one generation and publishes its outcome unless the run is
    /// dismissed first.
    pub async fn submit(&self, request: GenerationRequest, platform: Platform) -> SubmitOutcome {
        let run_id = self.begin_run();

        if let Err(err) = validate_request(&request) {
            tracing::debug!(error = %err, "Rejected generation request");
            return self.publish(run_id, GenerationState::Error(self.locale.validation_message().into()));
        }

        if self.publish(run_id, GenerationState::Loading) == SubmitOutcome::Dismissed {
            return SubmitOutcome::Dismissed;
        }

        let mut current_run = self.run.subscribe();
        let outcome = tokio::select! {
            outcome = run_pipeline(&self.client, request, platform) => outcome,
            _ = async { let _ = current_run.wait_for(|run| *run != run_id).await; } => {
                tracing::debug!(run_id, "Generation dismissed before completion");
                return SubmitOutcome::Dismissed;
            }
        };

        let state = match outcome {
            Ok(png) => GenerationState::Success(png),
            Err(err) => GenerationState::Error(user_message(&err, self.locale)),
        };
        self.publish(run_id, state)
    }

    /// Like [`submit`](Self::submit), but dismisses the run when `interrupt`
    /// resolves `Ok`. An interrupt source that fails is ignored.
    pub async fn submit_until_interrupted<F>(
        &self,
        request: GenerationRequest,
        platform: Platform,
        interrupt: F,
    ) -> SubmitOutcome
    where
        F: Future<Output = std::io::Result<()>>,
    {
        tokio::select! {
            outcome = self.submit(request, platform) => outcome,
            Ok(()) = interrupt => {
                self.dismiss();
                SubmitOutcome::Dismissed
            }
        }
    }

    /// Returns to `Idle` and drops whatever run is in flight.
    pub fn dismiss(&self) {
        self.run.send_modify(|run| *run += 1);
        self.state.send_replace(GenerationState::Idle);
    }

    fn begin_run(&self) -> u64 {
        self.run.send_modify(|run| *run += 1);
        *self.run.borrow()
    }

    /// Writes `state` only while `run_id` is still the current run.
    fn publish(&self, run_id: u64, state: GenerationState) -> SubmitOutcome {
        let published = self.state.send_if_modified(|current| {
            if *self.run.borrow() != run_id {
                return false;
            }
            *current = state;
            true
        });

        if published {
            SubmitOutcome::Delivered
        } else {
            SubmitOutcome::Dismissed
        }
    }
}

/// Generate, then watermark. A watermark failure fails the whole operation.
pub async fn run_pipeline(
    client: &GenerationClient,
    request: GenerationRequest,
    platform: Platform,
) -> Result<Vec<u8>, StoryError> {
    let generated = client.generate(request).await?;
    let png = apply_watermark(generated.bytes, platform).await?;
    Ok(png)
}
