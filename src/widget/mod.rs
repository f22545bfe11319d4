/*
 *  widget/mod.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Widget subsystem: layout, slots, icon cache, and the refresh cycle
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

pub mod error;
pub mod icon;
pub mod layout;
pub mod slots;
pub mod value_widget;

// Re-exports for convenience
pub use error::WidgetError;
pub use icon::IconCache;
pub use layout::format_layout;
pub use slots::Slot;
pub use value_widget::{MIN_INTERVAL, ValueWidget};
