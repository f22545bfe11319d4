/*
 *  widget/value_widget.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  The widget proper: periodic refresh of store values onto the panel
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

use std::path::Path;
use std::sync::PoisonError;
use std::time::Duration;

use log::info;

use crate::canvas::Canvas;
use crate::config::{DEFAULT_INTERVAL_MS, WidgetConfig};
use crate::device::DeviceSink;
use crate::draw;
use crate::store::{SharedStore, fetch};
use crate::widget::error::WidgetError;
use crate::widget::icon::IconCache;
use crate::widget::layout::format_layout;
use crate::widget::slots::{Slot, build_slots};

/// Floor for the refresh interval, whatever the configuration says.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// A display widget that polls the value store on a fixed interval and
/// composes the results into a fresh canvas for the device sink.
///
/// All configuration-derived state (slots, frames, fonts, colors) is fixed
/// at construction; the icon cache is the only field that mutates over the
/// widget's lifetime.
pub struct ValueWidget {
    slots: Vec<Slot>,
    icon_key: Option<String>,
    icon: IconCache,
    store: SharedStore,
    sink: Box<dyn DeviceSink>,
    interval: Duration,
}

impl ValueWidget {
    /// Build a widget from its configuration block.
    ///
    /// If an icon key is configured, the icon path is read and the raster
    /// loaded here, synchronously; failure of that first load is fatal and
    /// no widget is returned. Runtime reloads are tolerant instead (see
    /// [`IconCache`]).
    pub fn new(
        cfg: &WidgetConfig,
        base_dir: &Path,
        store: SharedStore,
        sink: Box<dyn DeviceSink>,
    ) -> Result<Self, WidgetError> {
        let icon_key = cfg.icon_key.clone().filter(|k| !k.is_empty());
        if cfg.keys.is_empty() && icon_key.is_none() {
            return Err(WidgetError::Config("neither keys nor icon_key configured".to_string()));
        }

        let side = sink.specs().pixels;
        let frames = format_layout(&cfg.layout, cfg.keys.len(), side);
        let slots = build_slots(&cfg.keys, &cfg.font, &cfg.color, frames);
        let interval =
            Duration::from_millis(cfg.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS)).max(MIN_INTERVAL);

        let mut icon = IconCache::new(side, base_dir.to_path_buf());
        if let Some(key) = &icon_key {
            info!("reading icon image");
            let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
            let source = fetch(&mut *guard, key)?;
            drop(guard);
            icon.load_initial(&source)?;
        }

        Ok(Self { slots, icon_key, icon, store, sink, interval })
    }

    /// Refresh interval, already clamped to [`MIN_INTERVAL`].
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Icon load attempts so far (observability; see [`IconCache::load_count`]).
    pub fn icon_load_count(&self) -> usize {
        self.icon.load_count()
    }

    /// One tick: compose a fresh frame and hand it to the device sink.
    ///
    /// A failed update renders nothing partial; the previous frame simply
    /// stays on the panel and the error goes to the caller.
    pub fn update(&mut self) -> Result<(), WidgetError> {
        let canvas = self.compose()?;
        self.sink.render(canvas)?;
        Ok(())
    }

    /// Fetch and draw every slot, then overlay the icon if one is configured.
    fn compose(&mut self) -> Result<Canvas, WidgetError> {
        let side = self.sink.specs().pixels;
        let mut canvas = Canvas::new(side);

        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        for slot in &self.slots {
            let value = fetch(&mut *store, &slot.key)?;
            draw::draw_string(&mut canvas, slot.frame, slot.font, &value, slot.color, draw::AUTO_POS)
                .map_err(|e| WidgetError::Draw(format!("{:?}", e)))?;
        }

        if let Some(key) = &self.icon_key {
            let source = fetch(&mut *store, key)?;
            drop(store);
            let margin = side / 18;
            let height = side - margin * 2;
            let raster = self.icon.ensure_loaded(&source);
            draw::draw_image(&mut canvas, raster, height, draw::AUTO_POS)
                .map_err(|e| WidgetError::Draw(format!("{:?}", e)))?;
        }

        Ok(canvas)
    }
}
