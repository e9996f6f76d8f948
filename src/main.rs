mod cli;
mod prelude;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Periodo(args) => args.run()?,
        Command::Proximos(args) => args.run()?,
        Command::Simular(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
