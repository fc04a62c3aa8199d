use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

use bt2usb::config::{self, RelayConfig};
use bt2usb::hid::Profile;
use bt2usb::input::{DeviceProvider, EvdevProvider, RelayController};
use bt2usb::logging;
use bt2usb::usb::{GadgetGuard, GadgetManager, GadgetSinks};

/// Relay Bluetooth keyboards and mice to a USB host through the HID gadget.
#[derive(Debug, Parser)]
#[command(version, about, disable_version_flag = true, arg_required_else_help = true)]
struct Args {
    /// Comma-separated device identifiers: event node path, MAC address or name substring
    #[arg(short = 'i', long = "device_ids", value_delimiter = ',')]
    device_ids: Vec<String>,

    /// Relay every readable input device
    #[arg(short = 'a', long = "auto_discover")]
    auto_discover: bool,

    /// Grab relayed devices so no other program receives their input
    #[arg(short = 'g', long = "grab_devices")]
    grab_devices: bool,

    /// Read and translate input but never touch the USB gadget
    #[arg(short = 's', long = "sandbox")]
    sandbox: bool,

    /// List available input devices and exit
    #[arg(short = 'l', long = "list_devices")]
    list_devices: bool,

    /// Also write the log to a file
    #[arg(short = 'f', long = "log_to_file")]
    log_to_file: bool,

    /// Log file path
    #[arg(short = 'p', long = "log_path", default_value = config::DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Print version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Args {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            device_ids: self
                .device_ids
                .iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            auto_discover: self.auto_discover,
            grab_devices: self.grab_devices,
            sandbox: self.sandbox,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = args.log_to_file.then_some(args.log_path.as_path());
    logging::init(args.debug, log_file)
        .with_context(|| format!("failed to set up logging to {}", args.log_path.display()))?;

    // Informational mode: never touches the gadget.
    if args.list_devices {
        return list_devices();
    }

    let config = args.relay_config();
    info!("starting bt2usb v{}", env!("CARGO_PKG_VERSION"));
    if config.device_ids.is_empty() && !config.auto_discover {
        warn!("no device identifiers given and auto discovery is off, nothing will be relayed");
    }

    let shutdown = shutdown_signal().context("failed to install signal handlers")?;
    let provider = Arc::new(EvdevProvider::new());

    if config.sandbox {
        info!("sandbox mode: reports are discarded");
        let mut controller = RelayController::new(config, provider, GadgetSinks::sandbox());
        controller.run(shutdown).await;
        return Ok(());
    }

    let mut gadget = GadgetGuard::new(GadgetManager::new());
    let sinks = gadget
        .enable(&Profile::ALL)
        .context("failed to enable USB gadget")?;

    let mut controller = RelayController::new(config, provider, sinks);
    controller.run(shutdown).await;

    gadget.disable().context("failed to disable USB gadget")?;
    info!("bt2usb stopped");
    Ok(())
}

fn list_devices() -> Result<()> {
    let devices = EvdevProvider::new()
        .list()
        .context("failed to enumerate input devices")?;
    for device in devices {
        println!(
            "{}\t{}\t{}",
            device.name,
            device.uniq.as_deref().unwrap_or("-"),
            device.path
        );
    }
    Ok(())
}

/// Resolves on SIGTERM or SIGINT.
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
    })
}
