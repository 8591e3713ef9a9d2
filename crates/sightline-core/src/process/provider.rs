//! Process attach abstraction for testability.
//!
//! Resolution happens once: process id, then module base, then a read
//! handle. The trait lets tests drive the sequence without a live target.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::process::{ModuleBase, ProcessHandle, handle};

/// Default executable and module names.
pub const DEFAULT_PROCESS_NAME: &str = "cs2.exe";
pub const DEFAULT_MODULE_NAME: &str = "client.dll";

/// What to attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachTarget {
    /// Executable file name, matched exactly.
    pub process: String,
    /// Module file name, matched case-insensitively.
    pub module: String,
}

impl Default for AttachTarget {
    fn default() -> Self {
        Self {
            process: DEFAULT_PROCESS_NAME.to_string(),
            module: DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

/// Trait for finding and opening processes.
pub trait ProcessLocator {
    /// The read capability produced by `open_process`.
    type Handle;

    fn find_process_id(&self, name: &str) -> Result<u32>;

    fn module_base_address(&self, pid: u32, module: &str) -> Result<ModuleBase>;

    fn open_process(&self, pid: u32) -> Result<Self::Handle>;
}

/// Locator backed by the Toolhelp snapshot API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocator;

impl ProcessLocator for SystemLocator {
    type Handle = ProcessHandle;

    fn find_process_id(&self, name: &str) -> Result<u32> {
        handle::find_process_id(name)
    }

    fn module_base_address(&self, pid: u32, module: &str) -> Result<ModuleBase> {
        handle::module_base_address(pid, module)
    }

    fn open_process(&self, pid: u32) -> Result<Self::Handle> {
        ProcessHandle::open(pid)
    }
}

/// Result of a successful attach.
pub struct AttachedProcess<H> {
    pub pid: u32,
    pub module_base: ModuleBase,
    pub handle: H,
}

/// Resolve `target` once.
pub fn attach<L: ProcessLocator>(
    locator: &L,
    target: &AttachTarget,
) -> Result<AttachedProcess<L::Handle>> {
    let pid = locator.find_process_id(&target.process)?;
    debug!("Found {} with PID {}", target.process, pid);

    let module_base = locator.module_base_address(pid, &target.module)?;
    debug!("{} loaded at {}", target.module, module_base);

    let handle = locator.open_process(pid)?;
    info!(
        "Attached to {} (PID {}, {} at {})",
        target.process, pid, target.module, module_base
    );

    Ok(AttachedProcess {
        pid,
        module_base,
        handle,
    })
}
