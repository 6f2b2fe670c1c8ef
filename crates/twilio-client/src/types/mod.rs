//! Types for the Twilio messaging API.

mod inbound;
mod send;

pub use inbound::*;
pub use send::*;
