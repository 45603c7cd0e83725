mod ast_builder;
mod directives;
mod macro_expand;
mod pipeline;
mod validator;

pub use ast_builder::build_ast;
pub use directives::DEFAULT_DIRECTIVES;
pub use macro_expand::{expand_directives, Directive};
pub use pipeline::{compile_script, compile_script_with, required_inputs, CompiledScript};
pub use validator::{check_prompt_references, validate_actions};
