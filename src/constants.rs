use solana_sdk::pubkey::Pubkey;

/// The deployed Ticketline program this client composes transactions for.
pub const PROGRAM_ID: Pubkey = solana_sdk::pubkey!("9sFXC6iX6qG4zHBmteKSWJ71U2yJ7bsx49x7Zt9CVECX");

// Seeds. These must match the program's derivation byte-for-byte or the
// chain recomputes a different address and rejects the transaction.
pub const EVENT_SEED: &[u8] = b"event";
pub const TICKET_SEED: &[u8] = b"ticket";
pub const MINT_AUTH_SEED: &[u8] = b"mint_auth";

// Anchor account discriminators, sha256("account:<Name>")[..8].
pub const EVENT_DISCRIMINATOR: [u8; 8] = [125, 192, 125, 158, 9, 115, 152, 233];
pub const TICKET_DISCRIMINATOR: [u8; 8] = [41, 228, 24, 165, 78, 90, 235, 200];

// Anchor instruction discriminators, sha256("global:<name>")[..8].
pub const INIT_EVENT_DISCRIMINATOR: [u8; 8] = [187, 76, 29, 231, 45, 94, 249, 84];
pub const JOIN_EVENT_DISCRIMINATOR: [u8; 8] = [10, 93, 234, 137, 237, 194, 224, 0];
pub const WITHDRAW_DISCRIMINATOR: [u8; 8] = [183, 18, 70, 156, 148, 109, 161, 34];
pub const CHECK_IN_DISCRIMINATOR: [u8; 8] = [209, 253, 4, 217, 250, 241, 207, 50];

/// Deep link query parameter carrying the ticket address.
pub const TICKET_QUERY_PARAM: &str = "ticket";
