use crate::core::codec::{self, Token};
use crate::core::store::FormStore;
use crate::domain::model::{Capsule, FieldUpdate, WardrobeResponse};
use crate::domain::ports::{Navigator, WardrobeClient};
use crate::utils::error::{CapsuleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Ready,
    InFlight,
    Settled,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The wardrobe is in the store and the location points at `token`.
    Delivered { token: Token },
    /// The service answered with an error envelope.
    Rejected { message: String },
    /// Encoding, transport, status or body failure; the store holds a generic message.
    Failed(CapsuleError),
}

/// Drives a form through `Idle -> Ready -> InFlight -> Settled`.
///
/// Every transition takes `&mut self`, so there is never more than one
/// request in flight and a response always belongs to the latest trigger.
pub struct SubmissionController<C: WardrobeClient, N: Navigator> {
    store: FormStore,
    client: C,
    navigator: N,
    origin: String,
    state: SubmissionState,
}

impl<C: WardrobeClient, N: Navigator> SubmissionController<C, N> {
    pub fn new(client: C, navigator: N, origin: impl Into<String>) -> Self {
        Self::with_capsule(client, navigator, origin, Capsule::default())
    }

    pub fn with_capsule(
        client: C,
        navigator: N,
        origin: impl Into<String>,
        capsule: Capsule,
    ) -> Self {
        Self {
            store: FormStore::new(capsule),
            client,
            navigator,
            origin: origin.into(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn update_field(&mut self, update: FieldUpdate) {
        self.store.update_field(update);
    }

    /// Restores the capsule carried by the current location, if any.
    ///
    /// Returns `Ok(true)` when a capsule was restored and a submission is
    /// now pending. A broken token leaves the controller idle with the
    /// error shown in the store.
    pub fn load_from_location(&mut self) -> Result<bool> {
        let Some(token) = codec::token_from_location(self.navigator.location()) else {
            tracing::debug!("No capsule in location {}", self.navigator.location());
            return Ok(false);
        };

        match codec::decode(token) {
            Ok(capsule) => {
                tracing::info!("Restored capsule from location");
                self.store.replace_capsule(capsule);
                Ok(self.mark_ready())
            }
            Err(e) => {
                tracing::warn!("Ignoring location token: {}", e);
                self.store.set_error(e.user_friendly_message());
                Err(e)
            }
        }
    }

    /// Form submission: drops the shown wardrobe and queues a request.
    pub fn submit_form(&mut self) -> bool {
        if !self.mark_ready() {
            return false;
        }
        self.store.clear_wardrobe();
        true
    }

    fn mark_ready(&mut self) -> bool {
        match self.state {
            SubmissionState::Idle | SubmissionState::Settled => {
                self.state = SubmissionState::Ready;
                true
            }
            SubmissionState::Ready | SubmissionState::InFlight => {
                tracing::debug!("Submission already pending, trigger ignored");
                false
            }
        }
    }

    /// Issues the pending request, if there is one, and settles it.
    pub async fn drive(&mut self) -> Option<SubmissionOutcome> {
        if self.state != SubmissionState::Ready {
            return None;
        }

        self.state = SubmissionState::InFlight;
        let outcome = self.send_capsule().await;
        self.state = SubmissionState::Settled;
        Some(outcome)
    }

    pub async fn submit(&mut self) -> Option<SubmissionOutcome> {
        self.submit_form();
        self.drive().await
    }

    async fn send_capsule(&mut self) -> SubmissionOutcome {
        let token = match codec::encode(self.store.capsule()) {
            Ok(token) => token,
            Err(e) => return self.fail(e),
        };

        tracing::info!("Requesting wardrobe for capsule {}", token);
        match self.client.fetch_wardrobe(token.as_str()).await {
            Ok(WardrobeResponse::Wardrobe(wardrobe)) => {
                tracing::info!(
                    "Received wardrobe with {} garments ({} pieces)",
                    wardrobe.items().len(),
                    wardrobe.total_pieces()
                );
                match codec::share_link(&self.origin, &token) {
                    Ok(link) => self.navigator.replace(link),
                    Err(e) => tracing::warn!("Not updating location: {}", e),
                }
                self.store.set_wardrobe(wardrobe);
                SubmissionOutcome::Delivered { token }
            }
            Ok(WardrobeResponse::Rejected(envelope)) => {
                tracing::info!("Wardrobe service rejected capsule: {}", envelope.message);
                self.store.set_error(envelope.message.clone());
                SubmissionOutcome::Rejected {
                    message: envelope.message,
                }
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: CapsuleError) -> SubmissionOutcome {
        tracing::warn!("Wardrobe request failed: {}", error);
        self.store.set_error(error.user_friendly_message());
        SubmissionOutcome::Failed(error)
    }
}
