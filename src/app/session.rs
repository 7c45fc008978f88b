use crate::adapters::http::HttpWardrobeClient;
use crate::adapters::navigation::MemoryNavigator;
use crate::app::form::render_form;
use crate::core::codec::{self, Token};
use crate::core::controller::{SubmissionController, SubmissionOutcome, SubmissionState};
use crate::core::Navigator;
use crate::config::Settings;
use crate::domain::model::FieldUpdate;
use crate::utils::error::{CapsuleError, Result};
use url::Url;

/// One page visit: open at a location, apply the user's edits, submit.
pub struct FormSession {
    controller: SubmissionController<HttpWardrobeClient, MemoryNavigator>,
}

impl FormSession {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = HttpWardrobeClient::from_config(settings)?;
        let start = start_location(&settings.origin, settings.link.as_deref())?;
        tracing::debug!("Opening form at {}", start);

        Ok(Self {
            controller: SubmissionController::new(
                client,
                MemoryNavigator::new(start),
                settings.origin.clone(),
            ),
        })
    }

    /// Restores any capsule in the location and applies `updates` on top.
    ///
    /// Returns whether a submission is pending: a restored capsule or any
    /// edit counts as submitting the form, while a bare page without edits
    /// only shows the form. A broken link without edits is an error; with
    /// edits the edited form is submitted instead.
    pub fn prepare(&mut self, updates: Vec<FieldUpdate>) -> Result<bool> {
        let loaded = self.controller.load_from_location();
        if updates.is_empty() {
            loaded?;
        } else if let Err(e) = loaded {
            tracing::warn!("💡 {}", e.recovery_suggestion());
        }

        let edited = !updates.is_empty();
        for update in updates {
            self.controller.update_field(update);
        }

        if edited {
            self.controller.submit_form();
        }
        Ok(self.controller.state() == SubmissionState::Ready)
    }

    pub async fn submit(&mut self) -> Option<SubmissionOutcome> {
        self.controller.drive().await
    }

    pub async fn run(&mut self, updates: Vec<FieldUpdate>) -> Result<Option<SubmissionOutcome>> {
        self.prepare(updates)?;
        Ok(self.submit().await)
    }

    pub fn token(&self) -> Result<Token> {
        codec::encode(self.controller.store().capsule())
    }

    pub fn share_link(&self) -> Result<Url> {
        codec::share_link(self.controller.origin(), &self.token()?)
    }

    pub fn location(&self) -> &Url {
        self.controller.navigator().location()
    }

    pub fn page(&self) -> String {
        render_form(self.controller.store())
    }

    pub fn controller(&self) -> &SubmissionController<HttpWardrobeClient, MemoryNavigator> {
        &self.controller
    }
}

/// Where the page opens: the origin, the given share link, or the origin
/// with a bare token as its fragment.
fn start_location(origin: &str, link: Option<&str>) -> Result<Url> {
    let raw = match link.map(str::trim) {
        Some(link) if link.contains("://") => link.to_string(),
        Some(token) => format!("{}/#/{}", origin.trim_end_matches('/'), token),
        None => format!("{}/", origin.trim_end_matches('/')),
    };

    Url::parse(&raw).map_err(|e| CapsuleError::InvalidConfigValueError {
        field: "link".to_string(),
        value: raw.clone(),
        reason: format!("Invalid URL format: {}", e),
    })
}
