/*
 *  device.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Device sink abstraction: where finished canvases go
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

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use embedded_graphics::prelude::*;
use thiserror::Error;

use crate::canvas::Canvas;

/// Fixed characteristics of the target panel.
///
/// `pixels` is the side length of the square drawing area. `dpi` is the
/// panel's physical density; the mono raster faces ignore it, but sinks
/// that re-rasterize (or tag output metadata) may consume it.
#[derive(Debug, Clone)]
pub struct DeviceSpecs {
    pub pixels: u32,
    pub dpi: u16,
}

impl Default for DeviceSpecs {
    fn default() -> Self {
        Self { pixels: 72, dpi: 141 }
    }
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("image encode error: {0}")]
    Encode(#[from] image::ImageError),
    #[error("render failed: {0}")]
    RenderFailed(String),
}

/// The pixel-transport boundary. Implementations own the transfer of a
/// completed canvas to a physical (or emulated) display; the widget only
/// hands frames over.
pub trait DeviceSink: Send {
    fn specs(&self) -> &DeviceSpecs;

    /// Take ownership of a finished frame and push it out.
    fn render(&mut self, canvas: Canvas) -> Result<(), DeviceError>;
}

/// Development sink: writes each frame to a PNG file, overwriting the last.
///
/// Stands in for real panel hardware the same way an emulator window would;
/// point a file watcher at the output to see the widget live.
pub struct PngSink {
    specs: DeviceSpecs,
    path: PathBuf,
}

impl PngSink {
    pub fn new(path: PathBuf, specs: DeviceSpecs) -> Self {
        Self { specs, path }
    }
}

impl DeviceSink for PngSink {
    fn specs(&self) -> &DeviceSpecs {
        &self.specs
    }

    fn render(&mut self, canvas: Canvas) -> Result<(), DeviceError> {
        let side = canvas.side();
        let img = image::RgbImage::from_fn(side, side, |x, y| {
            let p = canvas.pixel(x, y);
            image::Rgb([p.r(), p.g(), p.b()])
        });
        img.save_with_format(&self.path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Test sink: records every rendered frame for inspection.
pub struct MockSink {
    specs: DeviceSpecs,
    state: Arc<Mutex<MockSinkState>>,
}

/// Shared state for the mock sink (inspected by tests).
#[derive(Debug, Default)]
pub struct MockSinkState {
    /// Number of successful render() calls
    pub render_count: usize,

    /// Every frame handed over, in order
    pub frames: Vec<Canvas>,

    /// Fail the next render() call (for error-path testing)
    pub fail_next: bool,
}

impl MockSink {
    pub fn new(specs: DeviceSpecs) -> Self {
        Self { specs, state: Arc::new(Mutex::new(MockSinkState::default())) }
    }

    pub fn state(&self) -> Arc<Mutex<MockSinkState>> {
        self.state.clone()
    }
}

impl DeviceSink for MockSink {
    fn specs(&self) -> &DeviceSpecs {
        &self.specs
    }

    fn render(&mut self, canvas: Canvas) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.fail_next {
            state.fail_next = false;
            return Err(DeviceError::RenderFailed("simulated sink failure".to_string()));
        }
        state.render_count += 1;
        state.frames.push(canvas);
        Ok(())
    }
}
