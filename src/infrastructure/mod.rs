pub mod clock;
pub mod in_memory;
pub mod simulator;
pub mod timeout;
