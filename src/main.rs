use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use pybuiltin::config::RuntimeConfig;
use pybuiltin::literal::parse_literal;
use pybuiltin::runtime::error::RuntimeError;
use pybuiltin::runtime::execution::{HostContext, uncaught_report};
use pybuiltin::runtime::iteration::for_each;
use pybuiltin::runtime::value::Value;

const USAGE: &str = "Usage: pybuiltin [--config PATH] NAME [ARG ...]";

fn init_tracing(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut name: Option<String> = None;
    let mut literals = Vec::new();

    while let Some(arg) = args.next() {
        if name.is_some() {
            literals.push(arg);
            continue;
        }
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Missing config path after {arg}"))?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => name = Some(arg),
        }
    }

    let Some(name) = name else {
        bail!("Missing builtin name\n{USAGE}");
    };
    let config = match config_path {
        Some(path) => RuntimeConfig::load(&path)?,
        None => RuntimeConfig::default(),
    };
    init_tracing(&config);

    let mut context = HostContext::new(config);
    let call_args = literals
        .iter()
        .map(|literal| {
            parse_literal(literal, context.globals())
                .with_context(|| format!("Parsing argument {literal}"))
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(builtin = %name, args = call_args.len(), "calling builtin");

    let outcome = context
        .call_global(&name, call_args)
        .and_then(|result| drive(&mut context, result));
    for line in context.take_output() {
        println!("{line}");
    }
    match outcome {
        Ok(()) => Ok(()),
        Err(RuntimeError::Raised { exception }) => {
            println!("{}", uncaught_report(&exception));
            Ok(())
        }
        // RuntimeError holds `Rc` payloads, so it is rendered rather than wrapped.
        Err(error) => bail!("Calling {name}: {error}"),
    }
}

/// Generators are drained one value per line; anything else prints its repr.
fn drive(context: &mut HostContext, result: Value) -> Result<(), RuntimeError> {
    use pybuiltin::runtime::object::CallContext;

    match &result {
        Value::Generator(_) | Value::Iterator(_) => for_each(&result, |value| {
            context.write_output(value.repr());
            Ok(())
        }),
        Value::None => Ok(()),
        other => {
            context.write_output(other.repr());
            Ok(())
        }
    }
}
