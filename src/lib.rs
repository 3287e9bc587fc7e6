//! argon2-viz - step through how Argon2 fills its memory matrix
//!
//! Given Argon2's tunable parameters (memory, iterations, parallelism,
//! variant) this crate derives the shape of the memory matrix `B` and, for
//! any pass, the symbolic dependency formula of every block:
//! - Lane count and columns per lane from memory and parallelism
//! - First-pass seeding from `H0`/`H1`, chaining within a lane afterwards
//! - Wrap-around of column 0 to the end of the lane on later passes
//! - A pass counter that steps forward and backward within `[1, iterations]`
//!
//! The cross-lane reference of each block is kept symbolic as `B[i'][j']`.
//!
//! # Usage (Rust)
//!
//! ```
//! use argon2_viz::session::Session;
//! use argon2_viz::types::{CellAddress, Config, Variant};
//!
//! let mut session = Session::new();
//! session.start(Config::new(2048, 3, 2, Variant::Argon2id))?;
//! assert_eq!(session.run().map(|r| r.columns_per_lane()), Some(1024));
//! session.advance()?;
//! let cell = session.cell_formula(CellAddress::new(0, 0))?;
//! assert_eq!(cell.to_string(), "B[0][0]=G(B[0][1023], B[i'][j'])");
//! # Ok::<(), argon2_viz::error::VizError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { Argon2Viz } from 'argon2-viz';
//! await init();
//! const viz = new Argon2Viz();
//! viz.set_parameter('memory', '2048');
//! viz.start();
//! viz.visible_labels();
//! ```

pub mod engine;
pub mod error;
pub mod formula;
pub mod layout;
pub mod session;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
pub use viewer::Argon2Viz;

pub use formula::{formula, CellFormula};
pub use session::{Run, Session};
pub use types::*;

/// Derive the matrix shape for `memory` KiB split over `parallelism` lanes, as JSON.
///
/// # Errors
/// Returns an error if the configuration leaves no columns per lane.
pub fn grid_shape_json(memory: u32, parallelism: u32) -> error::Result<String> {
    let config = Config {
        memory,
        parallelism,
        ..Config::default()
    };
    config.validate()?;
    Ok(serde_json::to_string(&config.shape())?)
}

/// Derive the matrix shape (`{"lanes":..,"columnsPerLane":..}`) for the given parameters.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn derive_grid_shape(memory: u32, parallelism: u32) -> Result<String, JsValue> {
    Ok(grid_shape_json(memory, parallelism)?)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
