//! Domain model: cards, amounts, the authorization state machine and the ports it
//! depends on.

pub mod authorization;
pub mod card;
pub mod money;
pub mod ports;
pub mod settlement;
