mod environment;
mod interpreter;
mod provider;
mod substitute;

pub use environment::{GlobalEnvironment, LocalEnvironment};
pub use interpreter::{HeroMlInterpreter, InterpreterOptions};
pub use provider::{CompletionProvider, EchoProvider, ScriptedProvider};
pub use substitute::{render_prompt, substitute_pass, ReferencePass};
