/*
 *  main.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::sync::{Arc, Mutex};

use anyhow::Context;
use env_logger::Env;
use log::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use kvdeck::config;
use kvdeck::device::{DeviceSink, DeviceSpecs, PngSink};
use kvdeck::store::{RedisStore, SharedStore};
use kvdeck::widget::ValueWidget;

const DEFAULT_STORE_URL: &str = "redis://127.0.0.1/";
const DEFAULT_OUTPUT: &str = "frame.png";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load().context("loading configuration")?;

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str())).init();

    let store_url = cfg.store_url.clone().unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
    info!("connecting to value store at {}", store_url);
    let store: SharedStore = Arc::new(Mutex::new(
        RedisStore::connect(&store_url).context("connecting to value store")?,
    ));

    let device = cfg.device.clone().unwrap_or_default();
    let specs = DeviceSpecs {
        pixels: device.pixels.unwrap_or_else(|| DeviceSpecs::default().pixels),
        dpi: device.dpi.unwrap_or_else(|| DeviceSpecs::default().dpi),
    };
    let output = device.output.unwrap_or_else(|| DEFAULT_OUTPUT.into());
    info!("rendering {}x{} frames to {}", specs.pixels, specs.pixels, output.display());
    let sink: Box<dyn DeviceSink> = Box::new(PngSink::new(output, specs));

    let base_dir = match cfg.base_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("determining base directory")?,
    };

    let widget_cfg = cfg.widget.as_ref().context("missing widget section")?;
    let mut widget = ValueWidget::new(widget_cfg, &base_dir, store, sink)
        .context("constructing widget")?;

    info!(
        "widget up: {} slot(s), refresh every {:?}",
        widget_cfg.keys.len(),
        widget.interval()
    );

    let mut ticker = tokio::time::interval(widget.interval());
    let shutdown = wait_for_signals();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // a failed tick skips one refresh; the previous frame stays up
                if let Err(e) = widget.update() {
                    error!("update failed, skipping refresh: {}", e);
                }
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Wait for SIGINT, SIGTERM, or SIGHUP.
#[cfg(unix)]
async fn wait_for_signals() {
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!("cannot install SIGINT handler: {}", e);
            return std::future::pending().await;
        }
    };
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("cannot install SIGTERM handler: {}", e);
            return std::future::pending().await;
        }
    };
    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            error!("cannot install SIGHUP handler: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigint.recv() => info!("SIGINT received. Initiating graceful shutdown."),
        _ = sigterm.recv() => info!("SIGTERM received. Initiating graceful shutdown."),
        _ = sighup.recv() => info!("SIGHUP received. Initiating graceful shutdown."),
    }
}

#[cfg(not(unix))]
async fn wait_for_signals() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("cannot install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
