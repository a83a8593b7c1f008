//! Maps submission outcomes onto the status projection. Single-shot:
//! nothing in here retries; a failed action is re-invoked by the user.

use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Keypair;
use tracing::{error, info};

use crate::client::Wallet;
use crate::errors::ClientError;
use crate::state::PendingStatus;

/// Last resort when a failure carries no usable message at all.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Transaction failed";

/// Submit one transaction through the wallet and fold the outcome into a
/// [`PendingStatus`].
pub async fn submit<W: Wallet + ?Sized>(
    wallet: &W,
    instructions: &[Instruction],
    extra_signers: &[&Keypair],
    success_message: &str,
) -> PendingStatus {
    match wallet.sign_and_send(instructions, extra_signers).await {
        Ok(signature) => {
            info!(%signature, "transaction confirmed");
            PendingStatus::Success {
                message: success_message.to_string(),
                signature: Some(signature),
            }
        }
        Err(err) => failure_status(err),
    }
}

/// Fold any client error into a failure status. Program logs, when the
/// node attached them, are emitted through `tracing` for operator
/// debugging and kept on the status for the UI's diagnostics view.
pub fn failure_status(err: ClientError) -> PendingStatus {
    let (message, logs) = match err {
        ClientError::Submission { message, logs } => (message, logs),
        other => (other.to_string(), Vec::new()),
    };
    for line in &logs {
        error!(target: "ticketline::program_logs", "{line}");
    }
    let message = if message.trim().is_empty() {
        FALLBACK_FAILURE_MESSAGE.to_string()
    } else {
        message
    };
    PendingStatus::Failure { message, logs }
}
