pub mod command;
pub mod encode;
pub mod input;
pub mod transport;
