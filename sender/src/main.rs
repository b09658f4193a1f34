use std::fs;
use std::net::UdpSocket;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use mpx_core::format::CONTAINER_CEILING;

#[derive(Parser)]
#[command(name = "mpx-send", about = "Send an MPX container to the device over UDP")]
struct Cli {
    /// Path to the .mpx file
    input: PathBuf,

    /// Device address
    #[arg(long, default_value = "10.1.1.1:2023")]
    addr: String,

    /// Maximum datagram payload in bytes
    #[arg(long, default_value = "1470")]
    mtu: usize,

    /// Pause between datagrams, in milliseconds, so the device can
    /// reassemble in order
    #[arg(long, default_value = "500")]
    gap_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.mtu == 0 {
        bail!("--mtu must be at least 1");
    }

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    if bytes.len() > CONTAINER_CEILING {
        bail!(
            "{} is {} bytes, limit is {}",
            cli.input.display(),
            bytes.len(),
            CONTAINER_CEILING
        );
    }
    eprintln!("Got {} bytes from {}", bytes.len(), cli.input.display());

    let socket = UdpSocket::bind("0.0.0.0:0").context("failed to bind UDP socket")?;
    socket
        .connect(&cli.addr)
        .with_context(|| format!("failed to resolve {}", cli.addr))?;

    let chunks: Vec<&[u8]> = bytes.chunks(cli.mtu).collect();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(cli.gap_ms));
        }
        eprintln!("Sending {} bytes", chunk.len());
        socket
            .send(chunk)
            .with_context(|| format!("datagram {} failed", i + 1))?;
    }
    eprintln!("Sent {} datagrams to {}", chunks.len(), cli.addr);

    Ok(())
}
