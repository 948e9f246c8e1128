use std::net::SocketAddr;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod listen;
pub mod run;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a tunnel radio node.
    Run(RunArgs),
    /// Push a single frame to a node's collection endpoint.
    Send(SendArgs),
    /// Listen for broadcast frames and print them.
    Listen(ListenArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args, format),
        Command::Send(args) => send::run(args),
        Command::Listen(args) => listen::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Local endpoint the outbound broadcast channel binds.
    #[arg(long, default_value = "127.0.0.1:52001")]
    pub publish: SocketAddr,
    /// Endpoint broadcast frames are sent to.
    #[arg(long, default_value = "127.0.0.1:52003")]
    pub subscriber: SocketAddr,
    /// Local endpoint the inbound collection channel binds.
    #[arg(long, default_value = "127.0.0.1:52002")]
    pub collect: SocketAddr,
    /// Ingestion tick period (e.g. 1ms, 500ms, 1s).
    #[arg(long, default_value = "1ms")]
    pub tick: String,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Collection endpoint of the target node.
    #[arg(default_value = "127.0.0.1:52002")]
    pub endpoint: SocketAddr,
    /// Interface id to tag the frame with.
    #[arg(long, short = 'i', default_value = "0")]
    pub interface: u8,
    /// Raw string payload.
    #[arg(long, conflicts_with = "hex")]
    pub data: Option<String>,
    /// Hex-encoded payload.
    #[arg(long, conflicts_with = "data")]
    pub hex: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Endpoint to bind for broadcast frames.
    #[arg(default_value = "127.0.0.1:52003")]
    pub endpoint: SocketAddr,
    /// Exit after receiving N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
