//! Common test utilities and assertion helpers.
//!
//! Builders for sessions and viewers in a known state, shared by the
//! integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use argon2_viz::session::Session;
use argon2_viz::types::{Config, Variant};
use argon2_viz::Argon2Viz;

/// Start a session with the given parameters (Argon2i).
pub fn running_session(memory: u32, iterations: u32, parallelism: u32) -> Session {
    let mut session = Session::new();
    session
        .start(Config::new(memory, iterations, parallelism, Variant::Argon2i))
        .expect("configuration should start");
    session
}

/// Build a viewer through the form-style API and start it.
pub fn started_viewer(memory: u32, iterations: u32, parallelism: u32) -> Argon2Viz {
    let mut viz = Argon2Viz::new();
    viz.set_parameter("memory", &memory.to_string()).unwrap();
    viz.set_parameter("iterations", &iterations.to_string())
        .unwrap();
    viz.set_parameter("parallelism", &parallelism.to_string())
        .unwrap();
    viz.start().expect("viewer should start");
    viz
}

/// Advance `session` until it reaches `pass`, panicking if it cannot.
pub fn advance_to(session: &mut Session, pass: u32) {
    while session.current_pass() != Some(pass) {
        assert!(
            session.has_next_pass(),
            "cannot reach pass {pass}, stuck at {:?}",
            session.current_pass()
        );
        session.advance().unwrap();
    }
}
