pub mod cli;
pub mod doctor;
pub mod task;
