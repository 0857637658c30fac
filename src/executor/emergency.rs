use std::sync::Mutex;

use log::info;

use crate::error::ControlError;
use crate::executor::{Task, TaskExecutor, TaskType};

/// Relays an external emergency signal to task executors.
///
/// The relay holds an emergency task and a list of registered executors;
/// hooking [`EmergencyRelay::on_signal`] to any event source (a keypress
/// subscriber, a watchdog) submits a fresh clone of the task to every
/// executor, preempting whatever they are running.
pub struct EmergencyRelay {
    task: Task,
    executors: Mutex<Vec<TaskExecutor>>,
}

impl EmergencyRelay {
    /// Creates a relay for an emergency task. Normal tasks are refused: a
    /// relay that cannot preempt anything would silently drop the abort.
    pub fn new(task: Task) -> Result<Self, ControlError> {
        if task.task_type() == TaskType::Normal {
            return Err(ControlError::InvalidConfiguration(
                "an emergency relay needs an emergency task".into(),
            ));
        }
        Ok(Self {
            task,
            executors: Mutex::new(Vec::new()),
        })
    }

    pub fn register(&self, executor: TaskExecutor) {
        self.executors.lock().unwrap().push(executor);
    }

    /// Called by the external signal source. Submits the emergency task to
    /// every registered executor.
    pub fn on_signal(&self) {
        info!("emergency signal received");
        for executor in self.executors.lock().unwrap().iter() {
            executor.submit_task(self.task.clone());
        }
    }
}
