pub mod codecli;

pub use codecli::CodeCliExecutor;
