// SPDX-License-Identifier: MPL-2.0
use minori::app::{self, Flags};
use std::process::ExitCode;

fn default_env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::new("minori=info,reqwest=warn,hyper=warn,hyper_util=warn")
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_env_filter()),
        )
        .init();

    let flags = match Flags::from_args(pico_args::Arguments::from_env()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}\n\n{}", app::USAGE);
            return ExitCode::from(2);
        }
    };

    let report = match app::run(flags).await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if !report.body.is_empty() {
        println!("{}", report.body);
    }
    if let Some(redirect) = &report.redirect {
        println!("-> {redirect}");
    }
    for notice in &report.notices {
        eprintln!("{notice}");
    }

    if report.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
