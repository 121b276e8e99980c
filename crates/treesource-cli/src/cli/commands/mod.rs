//! CLI command handlers, one per file.

mod browse;
mod run;
mod sample;
mod spec;
mod test;

pub use browse::run_browse;
pub use run::{run_local, RunArgs};
pub use sample::run_sample;
pub use spec::run_spec;
pub use test::run_test;
