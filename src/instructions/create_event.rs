use anchor_lang::prelude::borsh;
use anchor_lang::AnchorSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::constants::{INIT_EVENT_DISCRIMINATOR, PROGRAM_ID};
use crate::errors::Result;
use crate::pda;
use crate::utils::parse_price_lamports;

#[derive(AnchorSerialize)]
struct InitEventArgs {
    event_id: u64,
    price_lamports: u64,
    title: String,
    description: String,
}

/// Raw form input for a new event.
#[derive(Clone, Debug)]
pub struct CreateEventInput {
    pub price: String,
    pub title: String,
    pub description: String,
}

pub struct CreateEventPlan {
    pub event_id: u64,
    pub event_address: Pubkey,
    pub instruction: Instruction,
}

/// Validate the price, pick a fresh event id, derive the event address
/// and emit the single `init_event` invocation.
pub fn build_create_event(organizer: &Pubkey, input: &CreateEventInput) -> Result<CreateEventPlan> {
    let price_lamports = parse_price_lamports(&input.price)?;
    let event_id = pda::next_event_id();
    let (event_address, _) = pda::derive_event_address(organizer, event_id);

    let mut data = INIT_EVENT_DISCRIMINATOR.to_vec();
    InitEventArgs {
        event_id,
        price_lamports,
        title: input.title.clone(),
        description: input.description.clone(),
    }
    .serialize(&mut data)?;

    let instruction = Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*organizer, true),
            AccountMeta::new(event_address, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    };

    Ok(CreateEventPlan {
        event_id,
        event_address,
        instruction,
    })
}
