pub mod circuit;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod netlist;
pub mod synthesis;
