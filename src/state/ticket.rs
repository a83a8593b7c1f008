use anchor_lang::prelude::*;

use crate::constants::TICKET_DISCRIMINATOR;
use crate::errors::{ClientError, Result};

/// Borsh mirror of the on-chain ticket account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct TicketAccount {
    pub event: Pubkey,
    pub holder: Pubkey,
    pub checked_in: bool,
}

/// A fetched ticket. `checked_in` goes false to true through a confirmed
/// check-in submission only, and is never reversed.
#[derive(Clone, Debug, PartialEq)]
pub struct TicketRecord {
    pub address: Pubkey,
    pub event: Pubkey,
    pub holder: Pubkey,
    pub checked_in: bool,
}

impl TicketRecord {
    pub fn decode(address: Pubkey, data: &[u8]) -> Result<Self> {
        if data.len() < 8 || data[..8] != TICKET_DISCRIMINATOR {
            return Err(ClientError::Serialization(format!(
                "{address} is not a ticket account"
            )));
        }
        let account = TicketAccount::deserialize(&mut &data[8..])
            .map_err(|err| ClientError::Serialization(err.to_string()))?;
        Ok(Self {
            address,
            event: account.event,
            holder: account.holder,
            checked_in: account.checked_in,
        })
    }
}
