//! Pomodoro timer phase machine.
//!
//! Remaining time is always recomputed from the wall-clock instant the
//! current run started, never accumulated tick by tick.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local};

use crate::model::{Id, SessionTarget, TimerConfig};
use crate::ops::SessionRecord;

/// Source of "now" for the timer
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Hand-driven clock; clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock(Rc<Cell<DateTime<Local>>>);

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        ManualClock(Rc::new(Cell::new(start)))
    }

    pub fn advance(&self, seconds: i64) {
        self.0.set(self.0.get() + Duration::seconds(seconds));
    }

    pub fn set(&self, instant: DateTime<Local>) {
        self.0.set(instant);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Work,
    Break,
}

/// One-shot notifications, drained one per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    FiveMinutesLeft,
    WorkComplete,
    BreakComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("Time is up: finish (f) or reset (r) first")]
    TimeUp,
    #[error("Work length can only change while the timer is idle")]
    NotIdle,
    #[error("Break length is fixed")]
    BreakFixed,
    #[error("Work length must be between {MIN_WORK_MINUTES} and {MAX_WORK_MINUTES} minutes")]
    OutOfRange,
    #[error("No work session to finish")]
    NothingToFinish,
    #[error("No focus target: press f on a todo or project in Structure")]
    NoTarget,
}

pub const MIN_WORK_MINUTES: u32 = 1;
pub const MAX_WORK_MINUTES: u32 = 180;

/// Seconds left at which the warning fires
const WARNING_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy)]
struct Finishing {
    session_id: Id,
    via_time_up: bool,
}

#[derive(Debug)]
pub struct NowState {
    state: TimerState,
    phase: TimerPhase,
    work_secs: u64,
    break_secs: u64,
    remaining: u64,
    /// Remaining seconds when the current run started
    budget: u64,
    run_started_at: Option<DateTime<Local>>,
    session_started_at: Option<DateTime<Local>>,
    warned: bool,
    time_up: bool,
    target: Option<SessionTarget>,
    target_label: String,
    events: VecDeque<TimerEvent>,
    finishing: Option<Finishing>,
}

impl NowState {
    pub fn new(config: &TimerConfig) -> Self {
        let work_secs = u64::from(config.work_minutes.clamp(MIN_WORK_MINUTES, MAX_WORK_MINUTES)) * 60;
        NowState {
            state: TimerState::Idle,
            phase: TimerPhase::Work,
            work_secs,
            break_secs: u64::from(config.break_minutes.max(1)) * 60,
            remaining: work_secs,
            budget: work_secs,
            run_started_at: None,
            session_started_at: None,
            warned: false,
            time_up: false,
            target: None,
            target_label: String::new(),
            events: VecDeque::new(),
            finishing: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining
    }

    pub fn work_minutes(&self) -> u32 {
        (self.work_secs / 60) as u32
    }

    pub fn break_minutes(&self) -> u32 {
        (self.break_secs / 60) as u32
    }

    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    pub fn target(&self) -> Option<SessionTarget> {
        self.target
    }

    pub fn target_label(&self) -> &str {
        &self.target_label
    }

    /// Session being wrapped up by the finish flow
    pub fn finishing_session_id(&self) -> Option<Id> {
        self.finishing.map(|f| f.session_id)
    }

    /// "MM:SS"
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    fn check_adjustable(&self) -> Result<(), TimerError> {
        if self.time_up {
            return Err(TimerError::TimeUp);
        }
        if self.state != TimerState::Idle {
            return Err(TimerError::NotIdle);
        }
        if self.phase == TimerPhase::Break {
            return Err(TimerError::BreakFixed);
        }
        Ok(())
    }

    /// Change the work length by whole minutes
    pub fn adjust(&mut self, delta_minutes: i32) -> Result<u32, TimerError> {
        self.check_adjustable()?;
        let minutes = i64::from(self.work_minutes()) + i64::from(delta_minutes);
        let minutes = u32::try_from(minutes).map_err(|_| TimerError::OutOfRange)?;
        self.set_work_minutes(minutes)
    }

    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<u32, TimerError> {
        self.check_adjustable()?;
        if !(MIN_WORK_MINUTES..=MAX_WORK_MINUTES).contains(&minutes) {
            return Err(TimerError::OutOfRange);
        }
        self.work_secs = u64::from(minutes) * 60;
        self.remaining = self.work_secs;
        self.budget = self.work_secs;
        Ok(minutes)
    }

    pub fn set_target(&mut self, target: SessionTarget, label: impl Into<String>) {
        self.target = Some(target);
        self.target_label = label.into();
    }

    /// Space: start, pause or resume.
    pub fn start_or_pause(&mut self, now: DateTime<Local>) -> Result<TimerState, TimerError> {
        if self.time_up {
            return Err(TimerError::TimeUp);
        }
        match self.state {
            TimerState::Idle => {
                if self.phase == TimerPhase::Work {
                    self.session_started_at = Some(now);
                    self.warned = false;
                }
                self.run(now);
            }
            TimerState::Running => {
                self.remaining = self.compute_remaining(now);
                self.run_started_at = None;
                self.state = TimerState::Paused;
            }
            TimerState::Paused => self.run(now),
        }
        Ok(self.state)
    }

    fn run(&mut self, now: DateTime<Local>) {
        self.budget = self.remaining;
        self.run_started_at = Some(now);
        self.state = TimerState::Running;
    }

    fn compute_remaining(&self, now: DateTime<Local>) -> u64 {
        let Some(start) = self.run_started_at else {
            return self.remaining;
        };
        let elapsed_ms = (now - start).num_milliseconds().max(0);
        let elapsed = ((elapsed_ms as f64) / 1000.0).round() as u64;
        self.budget.saturating_sub(elapsed)
    }

    /// Recompute from the wall clock. Returns whether the display changed.
    pub fn update(&mut self, now: DateTime<Local>) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        let previous = self.remaining;
        let remaining = self.compute_remaining(now);
        self.remaining = remaining;

        if self.phase == TimerPhase::Work
            && !self.warned
            && previous > WARNING_SECONDS
            && remaining <= WARNING_SECONDS
            && remaining > 0
        {
            self.warned = true;
            self.events.push_back(TimerEvent::FiveMinutesLeft);
        }

        if remaining == 0 {
            self.run_started_at = None;
            self.state = TimerState::Idle;
            match self.phase {
                TimerPhase::Work => {
                    self.time_up = true;
                    self.events.push_back(TimerEvent::WorkComplete);
                }
                TimerPhase::Break => {
                    self.back_to_work();
                    self.events.push_back(TimerEvent::BreakComplete);
                }
            }
            return true;
        }
        remaining != previous
    }

    pub fn take_event(&mut self) -> Option<TimerEvent> {
        self.events.pop_front()
    }

    fn back_to_work(&mut self) {
        self.phase = TimerPhase::Work;
        self.state = TimerState::Idle;
        self.remaining = self.work_secs;
        self.budget = self.work_secs;
        self.run_started_at = None;
        self.session_started_at = None;
        self.warned = false;
        self.time_up = false;
        self.events.clear();
    }

    /// Back to a full, idle work run
    pub fn reset(&mut self) {
        self.back_to_work();
        self.finishing = None;
    }

    /// Build the session record for a finish at `now`
    pub fn prepare_finish(&mut self, now: DateTime<Local>) -> Result<SessionRecord, TimerError> {
        let target = self.target.ok_or(TimerError::NoTarget)?;
        let start = match (self.phase, self.session_started_at) {
            (TimerPhase::Work, Some(start)) => start,
            _ => return Err(TimerError::NothingToFinish),
        };
        if self.state == TimerState::Running {
            self.remaining = self.compute_remaining(now);
        }
        let duration_secs = self.work_secs.saturating_sub(self.remaining);
        if duration_secs == 0 {
            return Err(TimerError::NothingToFinish);
        }
        Ok(SessionRecord {
            start,
            end: now,
            duration_secs,
            target,
        })
    }

    /// The session was saved: stop the clock while the wrap-up forms run.
    pub fn begin_finish(&mut self, session_id: Id) {
        self.finishing = Some(Finishing {
            session_id,
            via_time_up: self.time_up,
        });
        self.state = TimerState::Idle;
        self.run_started_at = None;
        self.session_started_at = None;
    }

    /// Wrap-up done. A time-up finish arms the break; a manual finish
    /// returns to a full work run.
    pub fn complete_finish(&mut self) {
        let via_time_up = self.finishing.take().is_some_and(|f| f.via_time_up);
        self.back_to_work();
        if via_time_up {
            self.phase = TimerPhase::Break;
            self.remaining = self.break_secs;
            self.budget = self.break_secs;
        }
    }
}
