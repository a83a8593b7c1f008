use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::constants::{CHECK_IN_DISCRIMINATOR, PROGRAM_ID};

/// Single `check_in` invocation. Shared by the self-service path and the
/// scan-by-address path; everything that differs between the two happens
/// before this is built.
pub fn build_check_in(signer: &Pubkey, event: &Pubkey, ticket: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new(*event, false),
            AccountMeta::new(*ticket, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: CHECK_IN_DISCRIMINATOR.to_vec(),
    }
}
