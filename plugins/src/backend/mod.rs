pub mod codecli;

pub use codecli::resolve_executable_path;
