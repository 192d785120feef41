//! modrecon CLI
//!
//! Compares the mod manifests of a multiplayer group against the host's
//! and writes one conflict report per player.

use clap::Parser;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "modrecon")]
#[command(about = "modrecon - Baldur's Gate 3 mod list reconciliation", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: commands::reconcile::ReconcileArgs,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::reconcile::execute(cli.args) {
        eprintln!("Error: {}", e);
        eprintln!("Hint: {}", e.hint());
        std::process::exit(1);
    }
}
