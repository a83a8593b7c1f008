//! Client-side orchestration for the Ticketline on-chain ticketing
//! program.
//!
//! The program itself defines and enforces all state transitions; this
//! crate composes the multi-instruction transactions that drive it
//! (event creation, ticket mint + join, withdrawal, check-in), derives
//! the program-owned addresses those transactions reference, and
//! resolves `?ticket=` deep links into the event they belong to. Wallet
//! signing and RPC transport sit behind trait seams so everything here
//! runs against in-memory fakes in tests.

pub mod actions;
pub mod client;
pub mod constants;
pub mod deeplink;
pub mod errors;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod submit;
pub mod utils;

pub use actions::{ActionKind, Actions, TaskRegistry};
pub use client::{ChainClient, ChainReader, LocalWallet, RpcChainClient, Wallet};
pub use deeplink::{extract_ticket_reference, DeepLinkResolver, ResolveStage};
pub use errors::{ClientError, Result};
pub use instructions::CreateEventInput;
pub use state::{EventRecord, PendingStatus, TicketRecord};

#[cfg(test)]
mod test {
    #[test]
    fn test_id() {
        assert_eq!(
            crate::constants::PROGRAM_ID.to_string(),
            "9sFXC6iX6qG4zHBmteKSWJ71U2yJ7bsx49x7Zt9CVECX"
        );
    }
}
