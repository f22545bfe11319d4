/*
 *  widget/error.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Unified error type for the widget refresh cycle
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

use thiserror::Error;

use crate::device::DeviceError;
use crate::store::StoreError;
use crate::widget::icon::IconError;

/// Failures that abort a widget construction or one update tick.
///
/// Store misses never surface here (they resolve to the sentinel value);
/// everything that does is fatal for the current operation.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Fatal store failure (not a recoverable read miss)
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Construction-time icon load failure
    #[error("icon error: {0}")]
    Icon(#[from] IconError),

    /// String or image drawing failed mid-composition
    #[error("drawing failed: {0}")]
    Draw(String),

    /// The device sink rejected a finished canvas
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Invalid widget configuration
    #[error("invalid widget configuration: {0}")]
    Config(String),
}
