//! Async driver that runs a tracker against real time

use std::future::Future;
use std::time::Duration;

use crate::operation::{Clock, OperationHandle, OperationState, Result, Tracker};

/// Poll `tracker` on its own deadlines until `handle` reaches a terminal
/// state, cancelling the operation if `interrupt` resolves first.
///
/// Runs on the caller's task; listeners fire from inside this loop.
pub async fn drive<C, F>(
    tracker: &mut Tracker<C>,
    handle: &OperationHandle,
    interrupt: F,
) -> Result<OperationState>
where
    C: Clock,
    F: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    let mut interrupted = false;

    loop {
        let state = tracker.state(handle)?;
        if state.is_terminal() {
            return Ok(state);
        }

        let Some(deadline) = tracker.next_deadline() else {
            return Ok(state);
        };
        let wait = (deadline - tracker.now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                tracker.poll();
            }
            _ = &mut interrupt, if !interrupted => {
                interrupted = true;
                tracing::info!(operation = %handle, "Interrupted, cancelling");
                tracker.cancel(handle)?;
            }
        }
    }
}
