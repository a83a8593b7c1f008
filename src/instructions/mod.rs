pub mod check_in;
pub mod create_event;
pub mod join_event;
pub mod withdraw;

pub use check_in::*;
pub use create_event::*;
pub use join_event::*;
pub use withdraw::*;
