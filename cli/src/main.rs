mod args;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use kubesource::{FailurePolicy, Pipeline, PipelineOptions, SystemExecutor};

use args::Args;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "kubesource=debug"
    } else {
        "kubesource=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = Arc::clone(&cancelled);
        if let Err(e) = ctrlc::set_handler(move || {
            cancelled.store(true, Ordering::SeqCst);
        }) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
    }

    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };
    let options = PipelineOptions::default()
        .with_kustomize_binary(args.kustomize)
        .with_failure_policy(policy);

    let pipeline = Pipeline::new(SystemExecutor, options).with_cancel_flag(cancelled);

    match pipeline.run(&args.root) {
        Ok(summary) if summary.is_success() => {
            info!(
                "Wrote {} manifests to {} targets",
                summary.manifests_written(),
                summary.targets.len()
            );
        }
        Ok(summary) => {
            for failure in &summary.failures {
                eprintln!("Error: {}", failure);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
