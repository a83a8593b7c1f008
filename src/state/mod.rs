pub mod event;
pub mod status;
pub mod ticket;


pub use event::*;
pub use status::*;
pub use ticket::*;
