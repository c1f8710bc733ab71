use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod cli;
mod config;
mod errors;
mod export;
mod interpret;
mod log;
mod preview;
mod prompt;
mod provider;
mod render;
mod session;
mod ux;
mod wire;

use errors::ArchitectError;

fn init_tracing(debug: bool) {
    let default = if debug { "warn,locobot_architect=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.debug);

    if args.list_modes {
        ux::show_modes();
        return Ok(());
    }

    let mut cfg = config::Config::load(args.config.as_deref().map(Path::new))?;
    cfg.apply_args(&args);
    let builder = prompt::RequestBuilder::from_config(&cfg)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mode = match args.mode {
        Some(m) => m,
        None => ux::pick_mode(&mut input)?,
    };
    ux::show_console_header(mode);
    let user_prompt = match &args.prompt {
        Some(p) => p.clone(),
        None => ux::read_prompt(mode, &mut input)?,
    };
    if user_prompt.trim().is_empty() {
        return Err(ArchitectError::EmptyPrompt.into());
    }

    let txid = Uuid::new_v4();
    let root = Path::new(&cfg.root);
    if args.debug {
        log::trace_planned_paths(root, txid);
    }

    let prov = provider::make_provider(cfg.provider, &cfg)?;
    let mut session = session::Session::new(&*prov, builder);

    let pb = ux::spinner();
    let outcome = session.synthesize(mode, &user_prompt).await.map(|_| ());
    pb.finish_and_clear();
    ux::print_logs(session.logs());

    if let Some(req) = session.last_request() {
        let saved = log::save_stage(
            "synthesis",
            req,
            session.result(),
            root,
            txid,
            args.save_request,
            args.save_response,
        )?;
        if args.debug {
            log::trace_saved_paths("synthesis", &saved);
            log::trace_json("synthesis", req, session.result())?;
        }
    }

    outcome?;
    let result = session
        .result()
        .ok_or_else(|| ArchitectError::Generation("no result recorded".into()))?;
    ux::print_result(result, args.print_code);

    if args.copy {
        match ux::copy_to_clipboard(result) {
            Ok(bytes) => ux::print_copied(bytes),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "clipboard copy failed");
                ux::print_copy_failed(&e);
            }
        }
    }

    let opts = export::ExportOptions {
        artifact: !args.no_export,
        blueprint: args.blueprint,
        preview: args.preview,
    };
    let out_dir = root.join(&cfg.out_dir);
    let written = export::export(&out_dir, mode, result, opts, Local::now())
        .with_context(|| format!("writing artifacts to {}", out_dir.display()))?;
    ux::print_export_dashboard(&written);

    Ok(())
}
