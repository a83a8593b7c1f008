//! Trait seams over the wallet and the RPC connection, plus the
//! production implementations. The traits exist so the composer, the
//! submission pipeline, and the deep-link resolver are testable against
//! in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use solana_client::client_error::{ClientError as RpcClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::constants::{EVENT_DISCRIMINATOR, PROGRAM_ID, TICKET_DISCRIMINATOR};
use crate::errors::{ClientError, Result};
use crate::state::{EventRecord, TicketRecord};

/// Read-only account access, enough for the deep-link resolver.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn fetch_event(&self, address: &Pubkey) -> Result<EventRecord>;
    async fn fetch_ticket(&self, address: &Pubkey) -> Result<TicketRecord>;
}

/// Full connection capability consumed by the action handlers.
#[async_trait]
pub trait ChainClient: ChainReader {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Wholesale refresh of the events collection.
    async fn fetch_events(&self) -> Result<Vec<EventRecord>>;

    /// Wholesale refresh of the tickets collection.
    async fn fetch_tickets(&self) -> Result<Vec<TicketRecord>>;
}

/// The wallet capability: knows its public key, and signs + broadcasts a
/// single transaction, awaiting confirmation. Single-shot by contract --
/// retry is a user-initiated re-invocation, never done in here.
#[async_trait]
pub trait Wallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    async fn sign_and_send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature>;
}

/// Production [`ChainClient`] over a nonblocking RPC connection.
pub struct RpcChainClient {
    rpc: Arc<RpcClient>,
}

impl RpcChainClient {
    pub fn new(rpc_url: impl ToString) -> Self {
        Self {
            rpc: Arc::new(RpcClient::new(rpc_url.to_string())),
        }
    }

    pub fn with_rpc(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> Arc<RpcClient> {
        Arc::clone(&self.rpc)
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Vec<u8>> {
        self.rpc
            .get_account_data(address)
            .await
            .map_err(|err| ClientError::Rpc(err.to_string()))
    }
}

#[async_trait]
impl ChainReader for RpcChainClient {
    async fn fetch_event(&self, address: &Pubkey) -> Result<EventRecord> {
        let data = self.account_data(address).await?;
        EventRecord::decode(*address, &data)
    }

    async fn fetch_ticket(&self, address: &Pubkey) -> Result<TicketRecord> {
        let data = self.account_data(address).await?;
        TicketRecord::decode(*address, &data)
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|err| ClientError::Rpc(err.to_string()))
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>> {
        let accounts = self
            .rpc
            .get_program_accounts(&PROGRAM_ID)
            .await
            .map_err(|err| ClientError::Rpc(err.to_string()))?;
        let mut events = Vec::new();
        for (address, account) in accounts {
            // The scan returns every program account; keep only events.
            if account.data.len() >= 8 && account.data[..8] == EVENT_DISCRIMINATOR {
                events.push(EventRecord::decode(address, &account.data)?);
            }
        }
        Ok(events)
    }

    async fn fetch_tickets(&self) -> Result<Vec<TicketRecord>> {
        let accounts = self
            .rpc
            .get_program_accounts(&PROGRAM_ID)
            .await
            .map_err(|err| ClientError::Rpc(err.to_string()))?;
        let mut tickets = Vec::new();
        for (address, account) in accounts {
            if account.data.len() >= 8 && account.data[..8] == TICKET_DISCRIMINATOR {
                tickets.push(TicketRecord::decode(address, &account.data)?);
            }
        }
        Ok(tickets)
    }
}

/// A wallet backed by a local keypair, signing and broadcasting through
/// the same RPC connection.
pub struct LocalWallet {
    keypair: Keypair,
    rpc: Arc<RpcClient>,
}

impl LocalWallet {
    pub fn new(keypair: Keypair, rpc: Arc<RpcClient>) -> Self {
        Self { keypair, rpc }
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_and_send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|err| ClientError::Rpc(err.to_string()))?;

        let transaction = {
            let mut signers: Vec<&dyn Signer> = vec![&self.keypair];
            signers.extend(extra_signers.iter().map(|keypair| *keypair as &dyn Signer));

            Transaction::new_signed_with_payer(
                instructions,
                Some(&self.keypair.pubkey()),
                &signers,
                blockhash,
            )
        };
        self.rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(submission_failure)
    }
}

/// Map an RPC-level failure into [`ClientError::Submission`], pulling out
/// any program logs the node attached to the preflight simulation. The
/// message falls back from the node's structured message to the error's
/// display form; an empty display form is replaced further down the
/// pipeline with a fixed default.
fn submission_failure(err: RpcClientError) -> ClientError {
    let mut logs = Vec::new();
    let message = match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError { message, data, .. }) => {
            if let RpcResponseErrorData::SendTransactionPreflightFailure(simulation) = data {
                if let Some(simulation_logs) = &simulation.logs {
                    logs = simulation_logs.clone();
                }
            }
            message.clone()
        }
        _ => err.to_string(),
    };
    ClientError::Submission { message, logs }
}
