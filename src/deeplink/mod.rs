pub mod extract;
pub mod resolver;

pub use extract::extract_ticket_reference;
pub use resolver::{DeepLinkResolver, ResolveStage};
