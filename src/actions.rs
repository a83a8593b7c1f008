//! High-level action handlers consumed by the form and panel components.
//! Each handler validates locally, composes through `instructions`, and
//! submits through the pipeline, folding the outcome into the status
//! projection. A task registry keyed by action kind rejects a second
//! invocation of a kind already in flight instead of racing it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signer::Signer;
use solana_sdk::program_pack::Pack;
use spl_token::state::Mint;
use tracing::debug;

use crate::client::{ChainClient, Wallet};
use crate::deeplink::extract_ticket_reference;
use crate::errors::{ClientError, Result};
use crate::instructions::{
    build_check_in, build_create_event, build_join_instruction, build_mint_setup, build_withdraw,
    CreateEventInput,
};
use crate::state::{EventRecord, PendingStatus, TicketRecord};
use crate::submit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    CreateEvent,
    JoinEvent,
    Withdraw,
    CheckIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::CreateEvent => "create-event",
            ActionKind::JoinEvent => "join-event",
            ActionKind::Withdraw => "withdraw",
            ActionKind::CheckIn => "check-in",
        })
    }
}

/// One slot per action kind. Policy: reject. A user who clicks twice
/// gets an immediate "already in flight" failure for the second click;
/// the first submission is never superseded or duplicated.
#[derive(Default)]
pub struct TaskRegistry {
    in_flight: HashSet<ActionKind>,
}

impl TaskRegistry {
    pub fn begin(&mut self, kind: ActionKind) -> Result<()> {
        if !self.in_flight.insert(kind) {
            return Err(ClientError::ActionInFlight(kind));
        }
        Ok(())
    }

    pub fn finish(&mut self, kind: ActionKind) {
        self.in_flight.remove(&kind);
    }

    pub fn is_in_flight(&self, kind: ActionKind) -> bool {
        self.in_flight.contains(&kind)
    }
}

pub struct Actions<C, W> {
    client: C,
    wallet: W,
    status: PendingStatus,
    tasks: TaskRegistry,
}

impl<C: ChainClient, W: Wallet> Actions<C, W> {
    pub fn new(client: C, wallet: W) -> Self {
        Self {
            client,
            wallet,
            status: PendingStatus::Idle,
            tasks: TaskRegistry::default(),
        }
    }

    /// The status projection read by the presentation layer.
    pub fn status(&self) -> &PendingStatus {
        &self.status
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Wholesale refresh of the events collection.
    pub async fn refresh_events(&self) -> Result<Vec<EventRecord>> {
        self.client.fetch_events().await
    }

    /// Wholesale refresh of the tickets collection.
    pub async fn refresh_tickets(&self) -> Result<Vec<TicketRecord>> {
        self.client.fetch_tickets().await
    }

    pub async fn create_event(&mut self, input: &CreateEventInput) -> Result<()> {
        self.begin(ActionKind::CreateEvent, "Creating event...")?;
        let result = self.create_event_inner(input).await;
        self.conclude(ActionKind::CreateEvent, result)
    }

    pub async fn join_event(
        &mut self,
        event_address: &Pubkey,
        events: &[EventRecord],
    ) -> Result<()> {
        self.begin(ActionKind::JoinEvent, "Minting your ticket...")?;
        let result = self.join_event_inner(event_address, events).await;
        self.conclude(ActionKind::JoinEvent, result)
    }

    pub async fn withdraw(&mut self, event_address: &Pubkey, amount: &str) -> Result<()> {
        self.begin(ActionKind::Withdraw, "Withdrawing...")?;
        let result = self.withdraw_inner(event_address, amount).await;
        self.conclude(ActionKind::Withdraw, result)
    }

    /// Self-service check-in from the attendee list. The organizer gate
    /// sits immediately before the submission; the chain enforces it
    /// authoritatively either way.
    pub async fn check_in(&mut self, event: &EventRecord, ticket: &TicketRecord) -> Result<()> {
        self.begin(ActionKind::CheckIn, "Checking in...")?;
        let result = self.check_in_inner(event, ticket).await;
        self.conclude(ActionKind::CheckIn, result)
    }

    /// Check-in from a scanned or pasted ticket reference. The organizer
    /// gate runs first here, before any extraction or fetch work.
    pub async fn organizer_check_in_by_address(
        &mut self,
        event: &EventRecord,
        raw_input: &str,
    ) -> Result<()> {
        self.begin(ActionKind::CheckIn, "Checking in...")?;
        let result = self.check_in_by_address_inner(event, raw_input).await;
        self.conclude(ActionKind::CheckIn, result)
    }

    async fn create_event_inner(&self, input: &CreateEventInput) -> Result<PendingStatus> {
        let organizer = self.wallet.pubkey();
        let plan = build_create_event(&organizer, input)?;
        debug!(event = %plan.event_address, event_id = plan.event_id, "submitting init_event");
        Ok(submit::submit(
            &self.wallet,
            &[plan.instruction],
            &[],
            &format!("Event \"{}\" created", input.title),
        )
        .await)
    }

    async fn join_event_inner(
        &self,
        event_address: &Pubkey,
        events: &[EventRecord],
    ) -> Result<PendingStatus> {
        // Stale local state: the collection the user clicked in no
        // longer contains the event.
        let event = events
            .iter()
            .find(|event| event.address == *event_address)
            .ok_or(ClientError::UnknownEvent(*event_address))?;

        let buyer = self.wallet.pubkey();
        let mint_rent = self
            .client
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;
        let setup = build_mint_setup(&buyer, mint_rent)?;

        // The join instruction references accounts the setup creates, so
        // the setup transaction must be confirmed first. Sequential await
        // is the ordering guarantee; a setup failure propagates out here
        // and no join is ever submitted.
        let setup_signature = self
            .wallet
            .sign_and_send(&setup.instructions, &[&setup.mint])
            .await?;
        debug!(%setup_signature, mint = %setup.mint.pubkey(), "mint setup confirmed");

        let join = build_join_instruction(&event.address, &buyer, &setup.mint.pubkey());
        Ok(submit::submit(
            &self.wallet,
            &[join],
            &[],
            &format!("Joined \"{}\"", event.title),
        )
        .await)
    }

    async fn withdraw_inner(&self, event_address: &Pubkey, amount: &str) -> Result<PendingStatus> {
        let organizer = self.wallet.pubkey();
        let instruction = build_withdraw(&organizer, event_address, amount)?;
        Ok(submit::submit(&self.wallet, &[instruction], &[], "Withdrawal submitted").await)
    }

    async fn check_in_inner(
        &self,
        event: &EventRecord,
        ticket: &TicketRecord,
    ) -> Result<PendingStatus> {
        if self.wallet.pubkey() != event.organizer {
            return Err(ClientError::NotOrganizer);
        }
        let instruction = build_check_in(&self.wallet.pubkey(), &event.address, &ticket.address);
        Ok(submit::submit(&self.wallet, &[instruction], &[], "Ticket checked in").await)
    }

    async fn check_in_by_address_inner(
        &self,
        event: &EventRecord,
        raw_input: &str,
    ) -> Result<PendingStatus> {
        if self.wallet.pubkey() != event.organizer {
            return Err(ClientError::NotOrganizer);
        }

        let reference = extract_ticket_reference(raw_input).ok_or(ClientError::NothingExtracted)?;
        let ticket_address = Pubkey::from_str(&reference)
            .map_err(|_| ClientError::InvalidTicketAddress(reference.clone()))?;

        let ticket = self
            .client
            .fetch_ticket(&ticket_address)
            .await
            .map_err(|err| ClientError::TicketFetch {
                address: ticket_address,
                reason: err.to_string(),
            })?;

        if ticket.event != event.address {
            return Err(ClientError::WrongEvent {
                ticket: ticket_address,
                expected: event.address,
                actual: ticket.event,
            });
        }
        if ticket.checked_in {
            // Informational no-op: nothing to submit, not an error.
            return Ok(PendingStatus::Success {
                message: "Ticket is already checked in".to_string(),
                signature: None,
            });
        }

        let instruction = build_check_in(&self.wallet.pubkey(), &event.address, &ticket.address);
        Ok(submit::submit(&self.wallet, &[instruction], &[], "Ticket checked in").await)
    }

    fn begin(&mut self, kind: ActionKind, progress: &str) -> Result<()> {
        if let Err(err) = self.tasks.begin(kind) {
            self.status = submit::failure_status(err.clone());
            return Err(err);
        }
        self.status = PendingStatus::InProgress(progress.to_string());
        Ok(())
    }

    fn conclude(&mut self, kind: ActionKind, result: Result<PendingStatus>) -> Result<()> {
        self.tasks.finish(kind);
        match result {
            Ok(status) => {
                self.status = status;
                Ok(())
            }
            Err(err) => {
                self.status = submit::failure_status(err.clone());
                Err(err)
            }
        }
    }
}
