pub mod fixtures;
pub mod helper;
pub mod runner;
