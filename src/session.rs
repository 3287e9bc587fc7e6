//! Run lifecycle: configuration draft, start, and pass navigation.
//!
//! A [`Session`] is either `NotStarted` or running exactly one [`Run`].
//! Starting again replaces the previous run. Navigation is clamped to
//! `[1, iterations]`; stepping past either end is a no-op, never an error.

use crate::error::{Result, VizError};
use crate::formula::CellFormula;
use crate::types::{CellAddress, Config, GridShape};

/// A started exploration: a configuration snapshot plus the current pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    config: Config,
    current_pass: u32,
}

impl Run {
    /// Snapshot `config` at pass 1. Fails if the configuration has no well-formed grid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current_pass: 1,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 1-based pass currently shown.
    pub fn current_pass(&self) -> u32 {
        self.current_pass
    }

    pub fn iterations(&self) -> u32 {
        self.config.iterations
    }

    pub fn lane_count(&self) -> u32 {
        self.config.lane_count()
    }

    pub fn columns_per_lane(&self) -> u32 {
        self.config.columns_per_lane()
    }

    pub fn shape(&self) -> GridShape {
        self.config.shape()
    }

    pub fn has_next_pass(&self) -> bool {
        self.current_pass < self.config.iterations
    }

    pub fn has_previous_pass(&self) -> bool {
        self.current_pass > 1
    }

    /// Move to the next pass if there is one. Returns the resulting pass.
    pub fn advance(&mut self) -> u32 {
        if self.has_next_pass() {
            self.current_pass += 1;
            log::debug!("advanced to pass {}/{}", self.current_pass, self.iterations());
        } else {
            log::debug!("advance ignored at final pass {}", self.current_pass);
        }
        self.current_pass
    }

    /// Move to the previous pass if there is one. Returns the resulting pass.
    pub fn retreat(&mut self) -> u32 {
        if self.has_previous_pass() {
            self.current_pass -= 1;
            log::debug!("retreated to pass {}/{}", self.current_pass, self.iterations());
        } else {
            log::debug!("retreat ignored at pass 1");
        }
        self.current_pass
    }

    /// Formula of `address` under the current pass, checked against the grid bounds.
    pub fn cell_formula(&self, address: CellAddress) -> Result<CellFormula> {
        let shape = self.shape();
        if !shape.contains(address.lane, address.column) {
            return Err(VizError::CellOutOfRange {
                lane: address.lane,
                column: address.column,
                lanes: shape.lanes,
                columns: shape.columns_per_lane,
            });
        }
        Ok(CellFormula::derive(
            address,
            self.current_pass,
            shape.columns_per_lane,
        ))
    }

    /// Label text for `B[lane][column]`, e.g. `B[0][0]=G(H0, 0)`.
    pub fn cell_label(&self, lane: u32, column: u32) -> Result<String> {
        self.cell_formula(CellAddress::new(lane, column))
            .map(|f| f.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    #[default]
    NotStarted,
    Running(Run),
}

/// The single live exploration owned by a host.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Form values; edits never touch a running snapshot.
    draft: Config,
    state: State,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose draft starts at `draft` instead of the form defaults.
    pub fn with_draft(draft: Config) -> Self {
        Self {
            draft,
            state: State::NotStarted,
        }
    }

    pub fn draft(&self) -> &Config {
        &self.draft
    }

    /// Update one draft field by its form name (`memory`, `iterations`, `parallelism`, `variant`).
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        self.draft.set_parameter(name, value)
    }

    /// Start a new run from `config`, replacing any previous run.
    pub fn start(&mut self, config: Config) -> Result<&Run> {
        let run = Run::new(config)?;
        for advisory in config.advisories() {
            log::warn!("{advisory}");
        }
        log::info!(
            "started {} run: {} lanes x {} columns, {} passes",
            config.variant,
            run.lane_count(),
            run.columns_per_lane(),
            run.iterations()
        );
        self.state = State::Running(run);
        self.run().ok_or(VizError::NotStarted)
    }

    /// Start a new run from the current draft.
    pub fn start_with_draft(&mut self) -> Result<&Run> {
        let draft = self.draft;
        self.start(draft)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    pub fn run(&self) -> Option<&Run> {
        match &self.state {
            State::Running(run) => Some(run),
            State::NotStarted => None,
        }
    }

    fn run_mut(&mut self) -> Result<&mut Run> {
        match &mut self.state {
            State::Running(run) => Ok(run),
            State::NotStarted => Err(VizError::NotStarted),
        }
    }

    pub fn advance(&mut self) -> Result<u32> {
        self.run_mut().map(Run::advance)
    }

    pub fn retreat(&mut self) -> Result<u32> {
        self.run_mut().map(Run::retreat)
    }

    /// `None` until a run has started.
    pub fn current_pass(&self) -> Option<u32> {
        self.run().map(Run::current_pass)
    }

    pub fn has_next_pass(&self) -> bool {
        self.run().is_some_and(Run::has_next_pass)
    }

    pub fn has_previous_pass(&self) -> bool {
        self.run().is_some_and(Run::has_previous_pass)
    }

    pub fn cell_formula(&self, address: CellAddress) -> Result<CellFormula> {
        self.run()
            .ok_or(VizError::NotStarted)?
            .cell_formula(address)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::Variant;

    fn running(memory: u32, iterations: u32, parallelism: u32) -> Session {
        let mut session = Session::new();
        session
            .start(Config::new(memory, iterations, parallelism, Variant::Argon2i))
            .unwrap();
        session
    }

    #[test]
    fn test_not_started() {
        let mut session = Session::new();
        assert!(!session.is_running());
        assert_eq!(session.current_pass(), None);
        assert!(!session.has_next_pass());
        assert!(!session.has_previous_pass());
        assert!(matches!(session.advance(), Err(VizError::NotStarted)));
        assert!(matches!(session.retreat(), Err(VizError::NotStarted)));
        assert!(matches!(
            session.cell_formula(CellAddress::new(0, 0)),
            Err(VizError::NotStarted)
        ));
    }

    #[test]
    fn test_advance_and_retreat_clamp() {
        let mut session = running(1024, 3, 1);
        assert_eq!(session.current_pass(), Some(1));
        assert_eq!(session.retreat().unwrap(), 1);
        assert_eq!(session.advance().unwrap(), 2);
        assert_eq!(session.advance().unwrap(), 3);
        assert!(!session.has_next_pass());
        assert_eq!(session.advance().unwrap(), 3);
        assert_eq!(session.retreat().unwrap(), 2);
        assert!(session.has_previous_pass());
        assert!(session.has_next_pass());
    }

    #[test]
    fn test_single_iteration_cannot_move() {
        let mut session = running(1024, 1, 1);
        assert!(!session.has_next_pass());
        assert!(!session.has_previous_pass());
        assert_eq!(session.advance().unwrap(), 1);
        assert_eq!(session.retreat().unwrap(), 1);
    }

    #[test]
    fn test_start_resets_pass() {
        let mut session = running(1024, 5, 1);
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.current_pass(), Some(3));
        let run = session
            .start(Config::new(2048, 5, 2, Variant::Argon2d))
            .unwrap();
        assert_eq!(run.current_pass(), 1);
        assert_eq!(run.lane_count(), 2);
    }

    #[test]
    fn test_invalid_start_keeps_previous_run() {
        let mut session = running(1024, 2, 1);
        session.advance().unwrap();
        let result = session.start(Config::new(1, 1, 4, Variant::Argon2i));
        assert!(matches!(result, Err(VizError::InvalidConfig(_))));
        assert_eq!(session.current_pass(), Some(2));
    }

    #[test]
    fn test_draft_edits_do_not_touch_running_snapshot() {
        let mut session = Session::new();
        session.set_parameter("memory", "2048").unwrap();
        session.set_parameter("parallelism", "2").unwrap();
        session.start_with_draft().unwrap();
        session.set_parameter("parallelism", "4").unwrap();
        let run = session.run().unwrap();
        assert_eq!(run.columns_per_lane(), 1024);
        assert_eq!(run.lane_count(), 2);
        assert_eq!(session.draft().columns_per_lane(), 512);
    }

    #[test]
    fn test_cell_formula_bounds() {
        let session = running(2048, 3, 2);
        assert!(session.cell_formula(CellAddress::new(1, 1023)).is_ok());
        assert!(matches!(
            session.cell_formula(CellAddress::new(2, 0)),
            Err(VizError::CellOutOfRange { lanes: 2, .. })
        ));
        assert!(matches!(
            session.cell_formula(CellAddress::new(0, 1024)),
            Err(VizError::CellOutOfRange { columns: 1024, .. })
        ));
    }

    #[test]
    fn test_formula_tracks_current_pass() {
        let mut session = running(2048, 3, 2);
        let address = CellAddress::new(0, 0);
        assert_eq!(
            session.cell_formula(address).unwrap().to_string(),
            "B[0][0]=G(H0, 0)"
        );
        session.advance().unwrap();
        assert_eq!(
            session.cell_formula(address).unwrap().to_string(),
            "B[0][0]=G(B[0][1023], B[i'][j'])"
        );
        session.retreat().unwrap();
        assert_eq!(
            session.cell_formula(address).unwrap().to_string(),
            "B[0][0]=G(H0, 0)"
        );
    }
}
