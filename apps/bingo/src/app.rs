//! Application orchestrator: wires configuration, hosting, joining and the
//! play surface together.

use std::path::Path;

use anyhow::{Context, bail};

use bingo_client::join_with;
use bingo_host::{GameSession, HostServer};

use crate::cli::{Command, HostArgs};
use crate::config::Config;
use crate::play;

/// Runs one command to completion.
pub async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    match command {
        Command::Host(args) => host(args, &config).await,
        Command::Join { host, port } => join(&host, port.unwrap_or(config.port), &config).await,
        Command::Templates => {
            list_templates(&config);
            Ok(())
        }
    }
}

async fn host(args: HostArgs, config: &Config) -> anyhow::Result<()> {
    let (title, items) = resolve_setup(&args, config)?;
    let session = GameSession::new(title, &items)?;

    let host = HostServer::new(session, config.host_config(args.port))
        .start()
        .await
        .context("could not start hosting")?;
    println!(
        "Hosting \"{}\" on port {}. Players join with: bingo join <this machine's address> -p {}",
        host.session().title(),
        host.port(),
        host.port()
    );

    let title = host.session().title().to_string();
    let result = play::play(&title, host.host_card().clone()).await;

    let dealt = host.session().cards_dealt();
    host.stop().await;
    tracing::info!(cards_dealt = dealt, "game over");
    result
}

async fn join(address: &str, port: u16, config: &Config) -> anyhow::Result<()> {
    let game = join_with(address, port, &config.join_config())
        .await
        .with_context(|| format!("could not join {address}:{port}"))?;
    play::play(&game.title, game.card).await
}

fn list_templates(config: &Config) {
    if config.templates.is_empty() {
        println!("No templates configured.");
        return;
    }
    for (name, items) in &config.templates {
        println!("{name} ({} items)", items.len());
    }
}

/// Picks the title and raw item lines from either a template or a file.
fn resolve_setup(args: &HostArgs, config: &Config) -> anyhow::Result<(String, Vec<String>)> {
    match (&args.template, &args.items) {
        (Some(name), _) => {
            let Some(items) = config.template(name) else {
                bail!("no template named {name:?}");
            };
            let title = args.title.clone().unwrap_or_else(|| name.clone());
            Ok((title, items.to_vec()))
        }
        (None, Some(path)) => {
            let Some(title) = args.title.clone() else {
                bail!("--title is required when hosting from an items file");
            };
            Ok((title, read_items(path)?))
        }
        (None, None) => bail!("either --items or --template is required"),
    }
}

/// One item per line; blank lines are dropped later by session setup.
fn read_items(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading items from {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}
