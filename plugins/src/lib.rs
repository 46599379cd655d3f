pub mod backend;
pub mod env;
pub mod factory;
pub mod runner;
