use std::process::ExitStatus;

use tokio::task::JoinHandle;

use crate::{error::ExecError, process_exec::Launched};

/// Background wait on a non-terminal pipeline stage.
///
/// Dropping the handle detaches the task; it still waits for the process and
/// still closes the stage's pipe write-end.
#[derive(Debug)]
pub struct Reaper {
    name: String,
    pid: Option<u32>,
    handle: JoinHandle<Option<ExitStatus>>,
}

impl Reaper {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Wait for the task. `None` if the wait itself failed.
    pub async fn join(self) -> Option<ExitStatus> {
        self.handle.await.ok().flatten()
    }
}

/// Hand a launched stage to a task that waits for it, then closes its
/// write-end so the next stage sees end-of-stream.
pub fn reap(launched: Launched) -> Reaper {
    let Launched {
        name,
        mut child,
        pipe_writer,
    } = launched;
    let pid = child.id();

    let handle = tokio::spawn(async move {
        let status = child.wait().await;
        drop(pipe_writer);
        match status {
            Ok(status) => Some(status),
            Err(e) => {
                eprintln!("{}", ExecError::Wait(e));
                None
            }
        }
    });

    Reaper { name, pid, handle }
}
