use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use hm_api::{compile_source, run_compiled, ScriptRun};
use hm_core::{HeroMlError, HmValue};
use hm_runtime::{CompletionProvider, EchoProvider};
use tracing::{debug, warn};

mod cli_args;
mod config;
mod error_map;
mod inputs;
mod openai;
mod output_store;
mod source_loader;

pub(crate) use cli_args::{CheckArgs, Cli, InputsArgs, Mode, ProviderKind, RunArgs};
pub(crate) use config::ProviderConfig;
pub(crate) use error_map::{
    emit_error, map_cli_input_read, map_cli_output_encode, map_cli_output_write,
    map_cli_provider_config, map_cli_source_path, map_cli_source_read, map_cli_source_scan,
};
pub(crate) use inputs::collect_inputs;
pub(crate) use openai::OpenAiProvider;
pub(crate) use output_store::{default_filename, save_environment};
pub(crate) use source_loader::{collect_scripts, load_script};

pub async fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli).await {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

async fn run(cli: Cli) -> Result<i32, HeroMlError> {
    match cli.command {
        Mode::Run(args) => run_file(args).await,
        Mode::Check(args) => run_check(args),
        Mode::Inputs(args) => run_inputs(args),
    }
}

async fn run_file(args: RunArgs) -> Result<i32, HeroMlError> {
    let script = load_script(&args.file)?;
    debug!(path = %script.path.display(), "loaded script");
    let compiled = compile_source(&script.source)?;
    let required = compiled.required_inputs();

    let (provider, supplied) = {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut prompt_out = io::stderr();
        prepare_run(&args, &required, build_provider, &mut reader, &mut prompt_out)?
    };

    let run = run_compiled(compiled, &supplied, provider).await;

    let filename = args
        .filename
        .clone()
        .unwrap_or_else(|| default_filename(Utc::now()));
    let keys = run.environment.len();
    let path = finish_run(run, Path::new(&args.output), &filename)?;

    println!("RESULT:OK");
    println!("OUTPUT:{}", path.display());
    println!("KEYS:{}", keys);
    Ok(0)
}

/// The provider is configured before any prompt so a bad configuration fails
/// without asking for input first.
fn prepare_run<F, R, W>(
    args: &RunArgs,
    required: &[String],
    make_provider: F,
    reader: &mut R,
    prompt_out: &mut W,
) -> Result<(Arc<dyn CompletionProvider>, BTreeMap<String, HmValue>), HeroMlError>
where
    F: FnOnce(&RunArgs) -> Result<Arc<dyn CompletionProvider>, HeroMlError>,
    R: BufRead,
    W: Write,
{
    let provider = make_provider(args)?;
    let supplied = collect_inputs(required, &args.vars, args.no_prompt, reader, prompt_out)?;
    Ok((provider, supplied))
}

/// Saves the environment, partial or not. A runtime failure takes precedence
/// over a failure to save.
fn finish_run(run: ScriptRun, output_dir: &Path, filename: &str) -> Result<PathBuf, HeroMlError> {
    if let Some(failure) = &run.failure {
        warn!(
            code = %failure.code,
            step = ?failure.step,
            message = %failure.message,
            "script stopped early"
        );
    }

    let saved = save_environment(output_dir, filename, &run.environment);
    match (run.failure, saved) {
        (None, saved) => saved,
        (Some(failure), Ok(path)) => {
            warn!(path = %path.display(), "partial environment saved");
            Err(failure)
        }
        (Some(failure), Err(save_error)) => {
            warn!(
                code = %save_error.code,
                message = %save_error.message,
                "partial environment not saved"
            );
            Err(failure)
        }
    }
}

fn build_provider(args: &RunArgs) -> Result<Arc<dyn CompletionProvider>, HeroMlError> {
    match args.provider {
        ProviderKind::Echo => Ok(Arc::new(EchoProvider)),
        ProviderKind::Openai => {
            let config = ProviderConfig::from_env(&args.model, args.timeout_secs)?;
            let provider = OpenAiProvider::new(config).map_err(map_cli_provider_config)?;
            Ok(Arc::new(provider))
        }
    }
}

fn run_check(args: CheckArgs) -> Result<i32, HeroMlError> {
    let scripts = collect_scripts(&args.path)?;
    let mut failed = 0usize;

    for path in &scripts {
        let status = match fs::read_to_string(path)
            .map_err(map_cli_source_read)
            .and_then(|source| compile_source(&source))
        {
            Ok(_) => "valid".to_string(),
            Err(error) => {
                failed += 1;
                error.code
            }
        };
        println!("CHECK:{}:{}", path.display(), status);
    }

    if failed == 0 {
        println!("RESULT:OK");
        Ok(0)
    } else {
        println!("RESULT:FAILED");
        println!("FAILED:{}/{}", failed, scripts.len());
        Ok(1)
    }
}

fn run_inputs(args: InputsArgs) -> Result<i32, HeroMlError> {
    let script = load_script(&args.file)?;
    debug!(path = %script.path.display(), "listing inputs");
    let compiled = compile_source(&script.source)?;
    for name in compiled.required_inputs() {
        println!("{}", name);
    }
    Ok(0)
}
