use anchor_lang::prelude::*;

use crate::constants::EVENT_DISCRIMINATOR;
use crate::errors::{ClientError, Result};

/// Borsh mirror of the on-chain event account, minus the 8-byte
/// discriminator prefix.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct EventAccount {
    pub organizer: Pubkey,
    pub event_id: u64,
    pub price_lamports: u64,
    pub title: String,
    pub description: String,
}

/// A fetched event, immutable once read. Refreshed wholesale by
/// re-querying the chain, never mutated client-side.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    pub address: Pubkey,
    pub organizer: Pubkey,
    pub event_id: u64,
    pub price_lamports: u64,
    pub title: String,
    pub description: String,
}

impl EventRecord {
    pub fn decode(address: Pubkey, data: &[u8]) -> Result<Self> {
        if data.len() < 8 || data[..8] != EVENT_DISCRIMINATOR {
            return Err(ClientError::Serialization(format!(
                "{address} is not an event account"
            )));
        }
        let account = EventAccount::deserialize(&mut &data[8..])
            .map_err(|err| ClientError::Serialization(err.to_string()))?;
        Ok(Self {
            address,
            organizer: account.organizer,
            event_id: account.event_id,
            price_lamports: account.price_lamports,
            title: account.title,
            description: account.description,
        })
    }
}
