//! The join-event action spans two transactions with a hard ordering
//! dependency: the mint setup bundle must be confirmed before the
//! program's `join_event` instruction may reference the accounts it
//! creates. Both halves are built here; the sequencing lives in the
//! action layer.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::{system_instruction, system_program};
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account;
use solana_sdk::program_pack::Pack;
use spl_token::state::Mint;

use crate::constants::{JOIN_EVENT_DISCRIMINATOR, PROGRAM_ID};
use crate::errors::{ClientError, Result};
use crate::pda;

/// Phase one of a join: a freshly generated one-time mint plus the
/// instructions that bring it to life. The keypair must co-sign the
/// setup transaction and is dropped after that one submission.
pub struct MintSetup {
    pub mint: Keypair,
    pub mint_authority: Pubkey,
    pub instructions: Vec<Instruction>,
}

/// Build the setup bundle: fund the mint account at the rent-exempt
/// minimum for its storage class, initialize it with the derived PDA as
/// mint authority and no freeze authority, then create the buyer's
/// associated token account. `mint_rent` is supplied by the caller so
/// the builder stays pure.
pub fn build_mint_setup(buyer: &Pubkey, mint_rent: u64) -> Result<MintSetup> {
    let mint = Keypair::new();
    let mint_pubkey = mint.pubkey();
    let (mint_authority, _) = pda::derive_mint_authority(&mint_pubkey);

    let create_mint_account = system_instruction::create_account(
        buyer,
        &mint_pubkey,
        mint_rent,
        Mint::LEN as u64,
        &spl_token::ID,
    );
    let initialize_mint = spl_token::instruction::initialize_mint2(
        &spl_token::ID,
        &mint_pubkey,
        &mint_authority,
        None,
        0,
    )
    .map_err(|err| ClientError::Serialization(err.to_string()))?;
    let create_buyer_ata = create_associated_token_account(buyer, buyer, &mint_pubkey, &spl_token::ID);

    Ok(MintSetup {
        mint,
        mint_authority,
        instructions: vec![create_mint_account, initialize_mint, create_buyer_ata],
    })
}

/// Phase two: the program invocation. Derives the ticket address from
/// the event and the buyer; account order matches the program exactly.
pub fn build_join_instruction(event: &Pubkey, buyer: &Pubkey, mint: &Pubkey) -> Instruction {
    let (ticket, _) = pda::derive_ticket_address(event, buyer);
    let (mint_authority, _) = pda::derive_mint_authority(mint);
    let buyer_ata = get_associated_token_address(buyer, mint);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*buyer, true),
            AccountMeta::new(*event, false),
            AccountMeta::new(ticket, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new(buyer_ata, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: JOIN_EVENT_DISCRIMINATOR.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_bundle_is_ordered_create_init_ata() {
        let buyer = Pubkey::new_unique();
        let setup = build_mint_setup(&buyer, 1_461_600).unwrap();

        assert_eq!(setup.instructions.len(), 3);
        assert_eq!(setup.instructions[0].program_id, system_program::ID);
        assert_eq!(setup.instructions[1].program_id, spl_token::ID);
        assert_eq!(
            setup.instructions[2].program_id,
            spl_associated_token_account::ID
        );
        assert_eq!(
            setup.mint_authority,
            pda::derive_mint_authority(&setup.mint.pubkey()).0
        );
    }

    #[test]
    fn join_instruction_wires_derived_accounts() {
        let event = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let instruction = build_join_instruction(&event, &buyer, &mint);
        assert_eq!(instruction.program_id, PROGRAM_ID);
        assert_eq!(instruction.data, JOIN_EVENT_DISCRIMINATOR.to_vec());
        assert_eq!(instruction.accounts.len(), 9);

        let (ticket, _) = pda::derive_ticket_address(&event, &buyer);
        assert_eq!(instruction.accounts[0].pubkey, buyer);
        assert!(instruction.accounts[0].is_signer);
        assert_eq!(instruction.accounts[1].pubkey, event);
        assert_eq!(instruction.accounts[2].pubkey, ticket);
        assert_eq!(instruction.accounts[3].pubkey, mint);
        assert_eq!(
            instruction.accounts[4].pubkey,
            pda::derive_mint_authority(&mint).0
        );
        assert_eq!(
            instruction.accounts[5].pubkey,
            get_associated_token_address(&buyer, &mint)
        );
        assert_eq!(instruction.accounts[8].pubkey, system_program::ID);
    }
}
