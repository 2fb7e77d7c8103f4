pub mod cli;
pub mod commands;
pub mod ensemble;
pub mod interest;
pub mod prevalence;
pub mod utils;
pub mod writers;
