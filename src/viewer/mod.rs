//! Main Argon2Viz struct - the entry point a host UI drives.
//!
//! This module provides the WASM-exported `Argon2Viz` struct that handles:
//! - Collecting form parameters into a draft configuration
//! - Starting a run and stepping between passes
//! - Tracking the grid viewport and labeling the visible cells
//!
//! Infallible accessors are shared by every target. Fallible operations have a
//! wasm32 implementation that reports errors as `JsValue` strings and a native
//! implementation (for testing/CLI) that returns [`crate::error::Result`].

use wasm_bindgen::prelude::*;

use crate::error::{Result, VizError};
use crate::layout::{GridLayout, GridViewport, LabelSheet};
use crate::session::{Run, Session};
use crate::types::Config;

/// The main viewer struct exported to JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct Argon2Viz {
    session: Session,
    viewport: GridViewport,
}

// ============================================================================
// Shared Implementation
// ============================================================================

#[wasm_bindgen]
impl Argon2Viz {
    /// Create a viewer with the default form values (1024 KiB, 1 pass, 1 lane, Argon2i).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Argon2Viz {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        Self::default()
    }

    /// Whether a run has been started.
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Current pass (1-based), or 0 before the first run.
    pub fn current_pass(&self) -> u32 {
        self.session.current_pass().unwrap_or(0)
    }

    /// Total passes of the running configuration, or 0 before the first run.
    pub fn iterations(&self) -> u32 {
        self.session.run().map(Run::iterations).unwrap_or(0)
    }

    /// Enables the "next" control.
    pub fn has_next_pass(&self) -> bool {
        self.session.has_next_pass()
    }

    /// Enables the "previous" control.
    pub fn has_previous_pass(&self) -> bool {
        self.session.has_previous_pass()
    }

    /// Rows of the grid, or 0 before the first run.
    pub fn lane_count(&self) -> u32 {
        self.session.run().map(Run::lane_count).unwrap_or(0)
    }

    /// Columns of the grid, or 0 before the first run.
    pub fn columns_per_lane(&self) -> u32 {
        self.session.run().map(Run::columns_per_lane).unwrap_or(0)
    }

    /// Variant label of the running configuration, or of the draft before the first run.
    pub fn variant_label(&self) -> String {
        self.active_config().variant.label().to_string()
    }

    /// Report the size of the grid's container in pixels.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        if let Some(layout) = self.layout() {
            self.viewport.clamp_scroll(&layout);
        }
    }

    /// Scroll the grid by a delta. Returns `true` if the position changed.
    pub fn scroll(&mut self, delta_x: f64, delta_y: f64) -> bool {
        let Some(layout) = self.layout() else {
            return false;
        };
        let (old_x, old_y) = (self.viewport.scroll_x, self.viewport.scroll_y);
        self.viewport.scroll_by(delta_x, delta_y, &layout);
        let dx = self.viewport.scroll_x - old_x;
        let dy = self.viewport.scroll_y - old_y;
        dx.abs() > f64::EPSILON || dy.abs() > f64::EPSILON
    }

    pub fn scroll_x(&self) -> f64 {
        self.viewport.scroll_x
    }

    pub fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }
}

impl Argon2Viz {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn viewport(&self) -> &GridViewport {
        &self.viewport
    }

    fn active_config(&self) -> &Config {
        self.session
            .run()
            .map_or_else(|| self.session.draft(), Run::config)
    }

    fn layout(&self) -> Option<GridLayout> {
        self.session.run().map(|run| GridLayout::new(run.shape()))
    }

    fn running(&self) -> Result<&Run> {
        self.session.run().ok_or(VizError::NotStarted)
    }

    fn set_parameter_impl(&mut self, name: &str, value: &str) -> Result<()> {
        self.session.set_parameter(name, value)
    }

    fn start_impl(&mut self) -> Result<u32> {
        let pass = self.session.start_with_draft()?.current_pass();
        self.viewport.scroll_x = 0.0;
        self.viewport.scroll_y = 0.0;
        Ok(pass)
    }

    fn cell_label_impl(&self, lane: u32, column: u32) -> Result<String> {
        self.running()?.cell_label(lane, column)
    }

    fn visible_sheet_impl(&self) -> Result<LabelSheet> {
        let run = self.running()?;
        let layout = GridLayout::new(run.shape());
        let (Some(lanes), Some(columns)) = (
            self.viewport.visible_lanes(&layout),
            self.viewport.visible_columns(&layout),
        ) else {
            return Err(VizError::InvalidConfig("grid has no cells".to_string()));
        };
        LabelSheet::build(run, lanes, columns)
    }

    fn visible_labels_json_impl(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.visible_sheet_impl()?)?)
    }

    fn engine_config_json_impl(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.active_config().engine_config())?)
    }
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl Argon2Viz {
    /// Update one form field (`memory`, `iterations`, `parallelism`, `variant`).
    pub fn set_parameter(&mut self, name: &str, value: &str) -> std::result::Result<(), JsValue> {
        Ok(self.set_parameter_impl(name, value)?)
    }

    /// Start a run from the current form values. Returns the initial pass.
    pub fn start(&mut self) -> std::result::Result<u32, JsValue> {
        Ok(self.start_impl()?)
    }

    /// Step to the next pass (no-op at the last pass). Returns the current pass.
    pub fn advance(&mut self) -> std::result::Result<u32, JsValue> {
        Ok(self.session.advance()?)
    }

    /// Step to the previous pass (no-op at pass 1). Returns the current pass.
    pub fn retreat(&mut self) -> std::result::Result<u32, JsValue> {
        Ok(self.session.retreat()?)
    }

    /// Label of one cell, e.g. `B[0][0]=G(H0, 0)`.
    pub fn cell_label(&self, lane: u32, column: u32) -> std::result::Result<String, JsValue> {
        Ok(self.cell_label_impl(lane, column)?)
    }

    /// Labels of the cells inside the viewport, as a JS object.
    pub fn visible_labels(&self) -> std::result::Result<JsValue, JsValue> {
        let sheet = self.visible_sheet_impl()?;
        serde_wasm_bindgen::to_value(&sheet)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Labels of the cells inside the viewport, as JSON.
    pub fn visible_labels_json(&self) -> std::result::Result<String, JsValue> {
        Ok(self.visible_labels_json_impl()?)
    }

    /// Configuration in the string form a hashing engine expects, as JSON.
    pub fn engine_config_json(&self) -> std::result::Result<String, JsValue> {
        Ok(self.engine_config_json_impl()?)
    }
}

// ============================================================================
// Non-WASM32 Implementation (for testing/CLI)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl Argon2Viz {
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        self.set_parameter_impl(name, value)
    }

    pub fn start(&mut self) -> Result<u32> {
        self.start_impl()
    }

    pub fn advance(&mut self) -> Result<u32> {
        self.session.advance()
    }

    pub fn retreat(&mut self) -> Result<u32> {
        self.session.retreat()
    }

    pub fn cell_label(&self, lane: u32, column: u32) -> Result<String> {
        self.cell_label_impl(lane, column)
    }

    pub fn visible_labels(&self) -> Result<LabelSheet> {
        self.visible_sheet_impl()
    }

    pub fn visible_labels_json(&self) -> Result<String> {
        self.visible_labels_json_impl()
    }

    pub fn engine_config_json(&self) -> Result<String> {
        self.engine_config_json_impl()
    }
}
