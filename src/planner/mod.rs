//! Mock planner
//!
//! Accepts a free-text description of someone's finances and, after a fixed
//! delay, produces a plan. The planner is a state machine driven by the
//! caller's clock: `submit` starts a request, `poll` resolves it once its
//! delay has elapsed. Nothing runs in the background, so a host can drive it
//! from a tick loop or simply sleep until [`MockPlanner::ready_at`].
//!
//! Each submission gets a new generation number and replaces whatever was
//! pending, so only the most recent request can ever produce a result.

pub mod engine;
pub mod plan;

pub use engine::{CannedPlanEngine, PlanEngine};
pub use plan::{BudgetLine, PlanResult};

use std::time::{Duration, Instant};

/// Where the planner currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerState {
    Idle {
        result: Option<PlanResult>,
    },
    Submitting {
        generation: u64,
        request: String,
        ready_at: Instant,
    },
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::Idle { result: None }
    }
}

/// Delayed planner over a [`PlanEngine`]
#[derive(Debug)]
pub struct MockPlanner<E: PlanEngine = CannedPlanEngine> {
    engine: E,
    delay: Duration,
    state: PlannerState,
    generation: u64,
}

impl MockPlanner<CannedPlanEngine> {
    /// A planner returning the canned plan after `delay`
    pub fn new(delay: Duration) -> Self {
        Self::with_engine(CannedPlanEngine, delay)
    }
}

impl<E: PlanEngine> MockPlanner<E> {
    pub fn with_engine(engine: E, delay: Duration) -> Self {
        Self {
            engine,
            delay,
            state: PlannerState::default(),
            generation: 0,
        }
    }

    /// Start planning `text`
    ///
    /// Blank text is ignored and returns `None`. Otherwise any previous
    /// result or pending request is discarded and the new generation is
    /// returned.
    pub fn submit(&mut self, text: &str, now: Instant) -> Option<u64> {
        let request = text.trim();
        if request.is_empty() {
            return None;
        }

        self.generation += 1;
        self.state = PlannerState::Submitting {
            generation: self.generation,
            request: request.to_string(),
            ready_at: now + self.delay,
        };
        Some(self.generation)
    }

    /// Resolve the pending request if its delay has elapsed
    ///
    /// Returns the new result only on the call that resolves it.
    pub fn poll(&mut self, now: Instant) -> Option<&PlanResult> {
        let request = match &self.state {
            PlannerState::Submitting {
                request, ready_at, ..
            } if now >= *ready_at => request.clone(),
            _ => return None,
        };

        self.state = PlannerState::Idle {
            result: Some(self.engine.plan(&request)),
        };
        self.result()
    }

    /// Drop a pending request, leaving the planner idle with no result
    ///
    /// Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        if self.is_submitting() {
            self.state = PlannerState::default();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, PlannerState::Submitting { .. })
    }

    /// When the pending request will be ready
    pub fn ready_at(&self) -> Option<Instant> {
        match self.state {
            PlannerState::Submitting { ready_at, .. } => Some(ready_at),
            PlannerState::Idle { .. } => None,
        }
    }

    /// Generation of the pending request
    pub fn pending_generation(&self) -> Option<u64> {
        match self.state {
            PlannerState::Submitting { generation, .. } => Some(generation),
            PlannerState::Idle { .. } => None,
        }
    }

    /// The last finished plan, if idle
    pub fn result(&self) -> Option<&PlanResult> {
        match &self.state {
            PlannerState::Idle { result } => result.as_ref(),
            PlannerState::Submitting { .. } => None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const DELAY: Duration = Duration::from_millis(1500);

    #[test]
    fn test_blank_input_stays_idle() {
        let mut planner = MockPlanner::new(DELAY);
        let now = Instant::now();

        assert_eq!(planner.submit("", now), None);
        assert_eq!(planner.submit("   \n", now), None);
        assert_eq!(planner.state(), &PlannerState::Idle { result: None });
    }

    #[test]
    fn test_resolves_after_delay() {
        let mut planner = MockPlanner::new(DELAY);
        let start = Instant::now();

        assert_eq!(planner.submit("I earn 30000 a month", start), Some(1));
        assert!(planner.is_submitting());
        assert_eq!(planner.ready_at(), Some(start + DELAY));

        assert!(planner.poll(start + Duration::from_millis(1499)).is_none());
        assert!(planner.is_submitting());

        let plan = planner.poll(start + DELAY).unwrap();
        assert_eq!(plan.budget_breakdown.len(), 4);
        assert_eq!(plan.tips.len(), 3);
        assert!(!planner.is_submitting());

        // resolves exactly once
        assert!(planner.poll(start + DELAY * 2).is_none());
        assert!(planner.result().is_some());
    }

    #[test]
    fn test_any_text_yields_full_plan() {
        for text in ["x", "rent 10000, food 5000", "🙂 save for a bike"] {
            let mut planner = MockPlanner::new(Duration::ZERO);
            let now = Instant::now();
            planner.submit(text, now);

            let plan = planner.poll(now).unwrap();
            assert_eq!(plan.budget_breakdown.len(), 4);
            assert_eq!(plan.tips.len(), 3);
        }
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let mut planner = MockPlanner::new(DELAY);
        let start = Instant::now();
        planner.submit("first", start);
        planner.poll(start + DELAY);
        assert!(planner.result().is_some());

        planner.submit("second", start + DELAY);
        assert!(planner.result().is_none());
    }

    struct EchoEngine {
        seen: RefCell<Vec<String>>,
    }

    impl PlanEngine for EchoEngine {
        fn plan(&self, request: &str) -> PlanResult {
            self.seen.borrow_mut().push(request.to_string());
            CannedPlanEngine.plan(request)
        }
    }

    #[test]
    fn test_newer_submission_supersedes_pending() {
        let engine = EchoEngine {
            seen: RefCell::new(Vec::new()),
        };
        let mut planner = MockPlanner::with_engine(engine, DELAY);
        let start = Instant::now();

        assert_eq!(planner.submit("first", start), Some(1));
        assert_eq!(
            planner.submit("second", start + Duration::from_millis(500)),
            Some(2)
        );

        // the first request's deadline passes without resolving anything
        assert!(planner.poll(start + DELAY).is_none());
        assert_eq!(planner.pending_generation(), Some(2));

        assert!(planner.poll(start + Duration::from_millis(2000)).is_some());
        assert_eq!(*planner.engine.seen.borrow(), vec!["second".to_string()]);
    }

    #[test]
    fn test_cancel() {
        let mut planner = MockPlanner::new(DELAY);
        let start = Instant::now();

        assert!(!planner.cancel());
        planner.submit("plan please", start);
        assert!(planner.cancel());
        assert!(planner.poll(start + DELAY).is_none());
        assert_eq!(planner.state(), &PlannerState::Idle { result: None });
    }
}
