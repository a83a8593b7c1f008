use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::actions::ActionKind;

/// Everything that can go wrong on the client side. Nothing here is fatal:
/// every variant leaves local state untouched and the action re-invocable.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("event {0} is not in the loaded collection; refresh and retry")]
    UnknownEvent(Pubkey),

    #[error("no ticket reference found in the scanned input")]
    NothingExtracted,

    #[error("invalid ticket public key: {0}")]
    InvalidTicketAddress(String),

    #[error("could not load ticket {address}: {reason}")]
    TicketFetch { address: Pubkey, reason: String },

    #[error("ticket {ticket} belongs to a different event")]
    WrongEvent {
        ticket: Pubkey,
        expected: Pubkey,
        actual: Pubkey,
    },

    #[error("only the event organizer may check tickets in")]
    NotOrganizer,

    #[error("a {0} action is already in flight")]
    ActionInFlight(ActionKind),

    #[error("transaction failed: {message}")]
    Submission { message: String, logs: Vec<String> },

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
