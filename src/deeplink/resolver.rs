//! Resolves a `?ticket=<address>` deep link into the event it belongs to.
//!
//! The three inputs arrive independently: the page URL is known at load
//! time, the chain handle becomes available once the wallet connects, and
//! the events collection finishes loading on its own schedule. The
//! resolver is an explicit forward-only state machine over those inputs;
//! each observation re-runs its transition guard, and a stage once
//! reached is never reverted by a later, non-matching observation.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};
use url::Url;

use crate::client::ChainReader;
use crate::constants::TICKET_QUERY_PARAM;
use crate::state::EventRecord;

#[derive(Clone, Debug, PartialEq)]
pub enum ResolveStage {
    /// No ticket reference captured from the page URL.
    Idle,
    /// A raw ticket reference was captured and awaits a chain handle.
    Captured { raw: String },
    /// The ticket was fetched and its owning event is known; waiting for
    /// that event to appear in the loaded collection.
    ParentResolved { event: Pubkey },
    /// The owning event was found in the collection and selected.
    Selected { event: Pubkey },
    /// The reference could not be resolved. Terminal; not retried.
    Failed { diagnostic: String },
}

pub struct DeepLinkResolver {
    stage: ResolveStage,
    selection: Option<EventRecord>,
}

impl Default for DeepLinkResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DeepLinkResolver {
    pub fn new() -> Self {
        Self {
            stage: ResolveStage::Idle,
            selection: None,
        }
    }

    pub fn stage(&self) -> &ResolveStage {
        &self.stage
    }

    /// The resolved event, once selection has completed.
    pub fn selection(&self) -> Option<&EventRecord> {
        self.selection.as_ref()
    }

    /// The terminal diagnostic, if resolution failed.
    pub fn diagnostic(&self) -> Option<&str> {
        match &self.stage {
            ResolveStage::Failed { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }

    /// Feed the page URL, once, at load time. Returns `true` when a
    /// ticket reference was captured and the caller should switch to the
    /// tab that can display event details.
    pub fn observe_page_url(&mut self, page_url: &str) -> bool {
        if !matches!(self.stage, ResolveStage::Idle) {
            return false;
        }
        let captured = Url::parse(page_url).ok().and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key.as_ref() == TICKET_QUERY_PARAM)
                .map(|(_, value)| value.trim().to_string())
                .filter(|value| !value.is_empty())
        });
        match captured {
            Some(raw) => {
                debug!(%raw, "deep link ticket reference captured");
                self.stage = ResolveStage::Captured { raw };
                true
            }
            None => false,
        }
    }

    /// Feed the chain handle once it is available. Fetches the referenced
    /// ticket and records its owning event. A malformed address or a
    /// failed fetch is terminal; the user can still navigate manually.
    pub async fn resolve_ticket<R: ChainReader + ?Sized>(&mut self, reader: &R) {
        let raw = match &self.stage {
            ResolveStage::Captured { raw } => raw.clone(),
            _ => return,
        };
        let address = match Pubkey::from_str(&raw) {
            Ok(address) => address,
            Err(_) => {
                warn!(%raw, "deep link carries a malformed ticket address");
                self.fail();
                return;
            }
        };
        match reader.fetch_ticket(&address).await {
            Ok(ticket) => {
                debug!(ticket = %address, event = %ticket.event, "deep link ticket resolved");
                self.stage = ResolveStage::ParentResolved {
                    event: ticket.event,
                };
            }
            Err(err) => {
                warn!(ticket = %address, error = %err, "deep link ticket could not be loaded");
                self.fail();
            }
        }
    }

    /// Feed the events collection whenever it (re)loads. Selects the
    /// owning event when present. An absent event is not an error -- the
    /// collection may simply not include it for this viewer -- so the
    /// resolver stays at `ParentResolved` and later refreshes get
    /// another chance.
    pub fn observe_events(&mut self, events: &[EventRecord]) {
        let parent = match &self.stage {
            ResolveStage::ParentResolved { event } => *event,
            _ => return,
        };
        if events.is_empty() {
            return;
        }
        match events.iter().find(|event| event.address == parent) {
            Some(found) => {
                debug!(event = %parent, "deep link selection complete");
                self.selection = Some(found.clone());
                self.stage = ResolveStage::Selected { event: parent };
            }
            None => {
                debug!(event = %parent, "deep link event not in the loaded collection");
            }
        }
    }

    fn fail(&mut self) {
        self.stage = ResolveStage::Failed {
            diagnostic: "invalid or unknown ticket in link".to_string(),
        };
    }
}
