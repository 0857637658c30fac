//! Task execution: groups commands into priority-tagged tasks and runs at
//! most one task at a time on a dedicated worker, preempting it when an
//! emergency arrives.

mod emergency;

pub use emergency::EmergencyRelay;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::{debug, info};

use crate::command::Command;

/// Cooperative cancellation flag shared between an executor and the task it
/// is running. Commands check it at their suspension points (tick
/// boundaries, poll-sleep wakeups) and unwind promptly; nothing is ever
/// terminated mid-computation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The priority class of a task. Ordering is by severity: an incoming task
/// preempts a running one of strictly lower priority, and emergencies also
/// preempt a running emergency of their own class (newest wins). A normal
/// task never preempts another normal task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskType {
    Normal,
    SecondOrderEmergency,
    FirstOrderEmergency,
}

/// An immutable, ordered group of commands submitted as a unit.
#[derive(Clone)]
pub struct Task {
    commands: Vec<Arc<dyn Command>>,
    task_type: TaskType,
}

impl Task {
    pub fn new(commands: Vec<Arc<dyn Command>>, task_type: TaskType) -> Self {
        Self {
            commands,
            task_type,
        }
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }
}

/// Whether a submission was accepted for execution or refused outright.
/// Refused tasks are never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected,
}

struct RunningTask {
    task_type: TaskType,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
    id: u64,
}

struct ExecutorState {
    current: Option<RunningTask>,
    next_id: u64,
}

/// Runs at most one [`Task`] at a time on a dedicated worker thread.
///
/// Submission is asynchronous: the caller never blocks on an in-flight
/// command. All state transitions are serialized by one lock, while
/// `execute` itself always runs outside it. When a submission preempts a
/// running task, the new worker first waits for the preempted worker to
/// observe cancellation and unwind, so two tasks' commands never interleave.
///
/// Cloning shares the executor, so an emergency source and the flight
/// application can submit to the same instance concurrently.
#[derive(Clone)]
pub struct TaskExecutor {
    state: Arc<Mutex<ExecutorState>>,
}

impl Default for TaskExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskExecutor {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ExecutorState {
                current: None,
                next_id: 0,
            })),
        }
    }

    /// Submits a task for execution.
    ///
    /// An idle executor starts it immediately. A running task of strictly
    /// higher priority causes a rejection; otherwise the running task is
    /// cancelled, its remaining commands are discarded, and the new task
    /// starts as soon as the old worker has unwound.
    pub fn submit_task(&self, task: Task) -> SubmitOutcome {
        let mut state = self.state.lock().unwrap();

        let previous = match state.current.take() {
            Some(mut current) => {
                // emergencies preempt their own priority class (newest
                // wins); normal tasks never preempt each other
                let preempts = task.task_type > current.task_type
                    || (task.task_type == current.task_type
                        && task.task_type != TaskType::Normal);
                if !preempts {
                    debug!(
                        "rejecting {:?} task: a {:?} task is running",
                        task.task_type, current.task_type
                    );
                    state.current = Some(current);
                    return SubmitOutcome::Rejected;
                }
                info!(
                    "preempting {:?} task with incoming {:?} task",
                    current.task_type, task.task_type
                );
                current.cancel.cancel();
                current.worker.take()
            }
            None => None,
        };

        let id = state.next_id;
        state.next_id += 1;

        let cancel = CancellationToken::new();
        let worker = self.spawn_worker(task.clone(), cancel.clone(), previous, id);
        state.current = Some(RunningTask {
            task_type: task.task_type,
            cancel,
            worker: Some(worker),
            id,
        });

        SubmitOutcome::Accepted
    }

    /// True when no task is running.
    pub fn is_idle(&self) -> bool {
        self.state.lock().unwrap().current.is_none()
    }

    /// Cancels the running task, if any, and waits for its worker to unwind.
    pub fn shutdown(&self) {
        let worker = {
            let mut state = self.state.lock().unwrap();
            state.current.take().and_then(|mut current| {
                current.cancel.cancel();
                current.worker.take()
            })
        };
        if let Some(worker) = worker {
            let _ = worker.join();
        }
    }

    fn spawn_worker(
        &self,
        task: Task,
        cancel: CancellationToken,
        previous: Option<JoinHandle<()>>,
        id: u64,
    ) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        std::thread::spawn(move || {
            // let the preempted worker reach its next safe point and unwind
            // before this task's first command starts
            if let Some(previous) = previous {
                let _ = previous.join();
            }

            for command in &task.commands {
                if cancel.is_cancelled() {
                    debug!("task cancelled, discarding remaining commands");
                    break;
                }
                command.execute(&cancel);
            }

            let mut state = state.lock().unwrap();
            if state.current.as_ref().map(|current| current.id) == Some(id) {
                state.current = None;
            }
        })
    }
}
