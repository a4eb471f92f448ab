mod cleanup;
mod fs;
mod pipeline;
mod prompts;
mod scenario_generator;
mod test_case_generator;

pub use cleanup::*;
pub use pipeline::*;
pub use scenario_generator::*;
pub use test_case_generator::*;
