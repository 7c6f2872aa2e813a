mod prompt_builder;
mod requirements_store;

pub use prompt_builder::build_compliance_prompt;
pub use requirements_store::{RequirementsNotFound, RequirementsStore};
