use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "heroml")]
#[command(about = "Compile and run HeroML step scripts")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Run a script and write the resulting environment as JSON.
    Run(RunArgs),
    /// Compile a script, or every script under a directory, without running it.
    Check(CheckArgs),
    /// List the initial values a script expects.
    Inputs(InputsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProviderKind {
    Openai,
    Echo,
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    pub(crate) file: String,
    #[arg(short = 'o', long = "output", default_value = "./outputs")]
    pub(crate) output: String,
    #[arg(short = 'f', long = "filename")]
    pub(crate) filename: Option<String>,
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub(crate) vars: Vec<String>,
    #[arg(long = "provider", value_enum, default_value_t = ProviderKind::Openai)]
    pub(crate) provider: ProviderKind,
    #[arg(long = "model", env = "HEROML_MODEL", default_value = "gpt-3.5-turbo")]
    pub(crate) model: String,
    #[arg(long = "timeout-secs", default_value_t = 120)]
    pub(crate) timeout_secs: u64,
    #[arg(long = "no-prompt")]
    pub(crate) no_prompt: bool,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    pub(crate) path: String,
}

#[derive(Debug, Args)]
pub(crate) struct InputsArgs {
    pub(crate) file: String,
}
