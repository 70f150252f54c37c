//! Registry of live operations and the tick loop that drives them

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use super::error::{Result, TrackerError};
use super::progress::{Payload, ProgressEvent};
use super::schedule::{render, ScheduleSet, Style};
use super::{Clock, Operation, OperationHandle, OperationKind, OperationState, Parameters};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&ProgressEvent)>;

/// Owns every live operation and advances them against a clock.
///
/// The tracker never spawns anything: callers drive it by calling
/// [`Tracker::poll`], either from a timer loop or, in tests, after moving a
/// [`ManualClock`](super::ManualClock) forward.
pub struct Tracker<C: Clock> {
    clock: C,
    schedules: ScheduleSet,
    entries: HashMap<String, Entry>,
    next_subscription: SubscriptionId,
}

struct Entry {
    operation: Operation,
    plan: Plan,
    timer: Option<Timer>,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// The per-operation schedule with parameters already substituted.
enum Plan {
    Log { lines: Vec<String>, cursor: usize },
    Percent { increment: u8 },
}

/// Each operation owns its timer; dropping it stops the operation's ticks.
struct Timer {
    period: TimeDelta,
    next_fire: DateTime<Utc>,
}

impl<C: Clock> Tracker<C> {
    pub fn new(clock: C, schedules: ScheduleSet) -> Self {
        Self {
            clock,
            schedules,
            entries: HashMap::new(),
            next_subscription: 0,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn schedules(&self) -> &ScheduleSet {
        &self.schedules
    }

    /// Start an operation by kind name. See [`Tracker::start_kind`].
    pub fn start(&mut self, kind: &str, parameters: Parameters) -> Result<OperationHandle> {
        let kind: OperationKind = kind.parse()?;
        self.start_kind(kind, parameters)
    }

    /// Create an operation, move it to `Running` and arm its timer.
    ///
    /// The first tick is due one period from now. Every placeholder in the
    /// kind's templates must have a parameter; nothing is registered when
    /// one is missing.
    pub fn start_kind(
        &mut self,
        kind: OperationKind,
        parameters: Parameters,
    ) -> Result<OperationHandle> {
        let schedule = self.schedules.for_kind(kind);
        let plan = match schedule.style() {
            Style::Log { templates } => {
                let lines = templates
                    .iter()
                    .map(|t| render(t, &parameters))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|name| TrackerError::MissingParameter {
                        kind: kind.to_string(),
                        name,
                    })?;
                Plan::Log { lines, cursor: 0 }
            }
            Style::Percent { increment } => Plan::Percent {
                increment: *increment,
            },
        };
        let period = schedule.period();

        let now = self.clock.now();
        let id = uuid::Uuid::new_v4().to_string();
        let mut operation = Operation {
            id: id.clone(),
            kind,
            state: OperationState::Pending,
            parameters,
            events: Vec::new(),
            progress_percent: 0,
            started_at: now,
        };
        operation.state = OperationState::Running;

        info!(operation = %id, %kind, "Operation started");

        self.entries.insert(
            id.clone(),
            Entry {
                operation,
                plan,
                timer: Some(Timer {
                    period,
                    next_fire: now + period,
                }),
                listeners: Vec::new(),
            },
        );

        Ok(OperationHandle::new(id))
    }

    /// Register a listener for events emitted from now on.
    ///
    /// Earlier events are not replayed. Subscribing to an operation that
    /// already finished succeeds but the listener is never called.
    pub fn subscribe<F>(&mut self, handle: &OperationHandle, listener: F) -> Result<SubscriptionId>
    where
        F: FnMut(&ProgressEvent) + 'static,
    {
        let entry = self.entry_mut(handle)?;
        let terminal = entry.operation.state.is_terminal();

        let id = self.next_subscription;
        self.next_subscription += 1;

        if !terminal {
            self.entry_mut(handle)?
                .listeners
                .push((id, Box::new(listener)));
        }
        Ok(id)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, handle: &OperationHandle, id: SubscriptionId) -> Result<bool> {
        let entry = self.entry_mut(handle)?;
        let before = entry.listeners.len();
        entry.listeners.retain(|(sid, _)| *sid != id);
        Ok(entry.listeners.len() != before)
    }

    /// Stop a running operation. No-op once the operation is terminal.
    ///
    /// Subscribers receive the terminal `Cancelled` event before this
    /// returns; nothing else fires for this operation afterwards, even if
    /// a tick was already due.
    pub fn cancel(&mut self, handle: &OperationHandle) -> Result<()> {
        let now = self.clock.now();
        let entry = self.entry_mut(handle)?;
        if entry.operation.state == OperationState::Running {
            warn!(operation = %handle, "Operation cancelled");
            entry.finish(OperationState::Cancelled, None, now);
        }
        Ok(())
    }

    /// Move a running operation to `Failed`. No-op once terminal.
    ///
    /// The simulated schedules never fail on their own; this is the hook a
    /// real backing task reports through.
    pub fn fail(&mut self, handle: &OperationHandle, reason: impl Into<String>) -> Result<()> {
        let now = self.clock.now();
        let entry = self.entry_mut(handle)?;
        if entry.operation.state == OperationState::Running {
            let reason = reason.into();
            warn!(operation = %handle, %reason, "Operation failed");
            entry.finish(OperationState::Failed, Some(reason), now);
        }
        Ok(())
    }

    /// Drop a finished operation and its listeners, returning the final
    /// snapshot. The handle is invalid afterwards.
    pub fn dispose(&mut self, handle: &OperationHandle) -> Result<Operation> {
        let state = self.entry_mut(handle)?.operation.state;
        if !state.is_terminal() {
            return Err(TrackerError::InvalidState {
                id: handle.id().to_string(),
                reason: format!("cannot dispose while {}", state),
            });
        }

        let entry = self
            .entries
            .remove(handle.id())
            .ok_or_else(|| TrackerError::unknown_handle(handle.id()))?;
        info!(operation = %handle, %state, "Operation disposed");
        Ok(entry.operation)
    }

    /// Fire every tick that is due, earliest deadline first.
    ///
    /// Overdue ticks of one operation are all delivered, in order. Returns
    /// the number of events emitted.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut emitted = 0;

        while let Some(id) = self.next_due(now) {
            if let Some(entry) = self.entries.get_mut(&id) {
                emitted += entry.tick(now);
            }
        }
        emitted
    }

    /// Earliest deadline among running operations.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.entries
            .values()
            .filter_map(|e| e.timer.as_ref().map(|t| t.next_fire))
            .min()
    }

    pub fn get(&self, handle: &OperationHandle) -> Option<&Operation> {
        self.entries.get(handle.id()).map(|e| &e.operation)
    }

    pub fn state(&self, handle: &OperationHandle) -> Result<OperationState> {
        self.get(handle)
            .map(|op| op.state)
            .ok_or_else(|| TrackerError::unknown_handle(handle.id()))
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.entries.values().map(|e| &e.operation)
    }

    /// Number of operations still running.
    pub fn active_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.operation.state == OperationState::Running)
            .count()
    }

    fn entry_mut(&mut self, handle: &OperationHandle) -> Result<&mut Entry> {
        self.entries
            .get_mut(handle.id())
            .ok_or_else(|| TrackerError::unknown_handle(handle.id()))
    }

    fn next_due(&self, now: DateTime<Utc>) -> Option<String> {
        self.entries
            .iter()
            .filter_map(|(id, e)| e.timer.as_ref().map(|t| (t.next_fire, id)))
            .filter(|(fire, _)| *fire <= now)
            .min()
            .map(|(_, id)| id.clone())
    }
}

impl Entry {
    /// Advance one tick. Returns the number of events emitted.
    fn tick(&mut self, now: DateTime<Utc>) -> usize {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        if self.operation.state != OperationState::Running {
            self.timer = None;
            return 0;
        }
        timer.next_fire += timer.period;

        match &mut self.plan {
            Plan::Log { lines, cursor } => {
                if let Some(line) = lines.get(*cursor) {
                    let payload = Payload::Log { line: line.clone() };
                    *cursor += 1;
                    debug!(operation = %self.operation.id, cursor = *cursor, "Tick");
                    self.emit(payload, now);
                    1
                } else {
                    self.finish(OperationState::Complete, None, now);
                    1
                }
            }
            Plan::Percent { increment } => {
                let previous = self.operation.progress_percent;
                let percent = previous.saturating_add(*increment).min(100);
                self.operation.progress_percent = percent;
                debug!(operation = %self.operation.id, percent, "Tick");
                self.emit(
                    Payload::Progress {
                        delta: percent - previous,
                        percent,
                    },
                    now,
                );
                if percent == 100 {
                    self.finish(OperationState::Complete, None, now);
                    2
                } else {
                    1
                }
            }
        }
    }

    fn finish(&mut self, state: OperationState, reason: Option<String>, now: DateTime<Utc>) {
        self.timer = None;
        self.operation.state = state;
        if state == OperationState::Complete {
            self.operation.progress_percent = 100;
        }
        debug!(operation = %self.operation.id, %state, "Operation finished");
        self.emit(Payload::Finished { state, reason }, now);
    }

    fn emit(&mut self, payload: Payload, now: DateTime<Utc>) {
        let event = ProgressEvent::new(self.operation.events.len() as u64, now, payload);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        self.operation.events.push(event);
    }
}
