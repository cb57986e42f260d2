mod executor;
pub mod builtin;
pub mod command;
pub mod parallel;
pub mod path_resolver;
pub mod pipeline;
pub mod redirect;
pub mod spawn;

pub use executor::{ExecOutcome, ExecStatus, EXIT_FAILURE, EXIT_SUCCESS};
pub use builtin::BuiltinManager;
pub use parallel::ParallelHandler;
