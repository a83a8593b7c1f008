use anchor_lang::prelude::borsh;
use anchor_lang::AnchorSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::constants::{PROGRAM_ID, WITHDRAW_DISCRIMINATOR};
use crate::errors::Result;
use crate::utils::parse_withdraw_lamports;

#[derive(AnchorSerialize)]
struct WithdrawArgs {
    amount_lamports: u64,
}

/// Single `withdraw` invocation against the event account. The amount is
/// parsed leniently (non-numeric is zero) and truncated to lamports; see
/// `utils` for why the truncation stays asymmetric with create-event.
pub fn build_withdraw(organizer: &Pubkey, event: &Pubkey, amount: &str) -> Result<Instruction> {
    let amount_lamports = parse_withdraw_lamports(amount);

    let mut data = WITHDRAW_DISCRIMINATOR.to_vec();
    WithdrawArgs { amount_lamports }.serialize(&mut data)?;

    Ok(Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*organizer, true),
            AccountMeta::new(*event, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    })
}
