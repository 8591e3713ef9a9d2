#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

#[cfg(target_os = "windows")]
use tracing::warn;

#[cfg(target_os = "windows")]
use windows::Win32::Foundation::{CloseHandle, HANDLE};
#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, Module32NextW, PROCESSENTRY32W,
    Process32FirstW, Process32NextW, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32, TH32CS_SNAPPROCESS,
};
#[cfg(target_os = "windows")]
use windows::Win32::System::Threading::{OpenProcess, PROCESS_VM_READ};

/// Load address of a module inside the remote process.
///
/// Never zero. Configured module-relative offsets are added to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleBase(u64);

impl ModuleBase {
    pub fn new(address: u64) -> Result<Self> {
        if address == 0 {
            return Err(Error::ModuleNotFound(
                "module resolved to a null base address".to_string(),
            ));
        }
        Ok(Self(address))
    }

    pub fn address(&self) -> u64 {
        self.0
    }

    /// Absolute address of a module-relative offset.
    pub fn at(&self, offset: u64) -> u64 {
        self.0.wrapping_add(offset)
    }
}

impl fmt::Display for ModuleBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Read-only access to one remote process, held for the lifetime of the attach.
#[cfg(target_os = "windows")]
pub struct ProcessHandle {
    handle: HANDLE,
    pub pid: u32,
}

#[cfg(not(target_os = "windows"))]
pub struct ProcessHandle {
    pub pid: u32,
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    /// Open `pid` with `PROCESS_VM_READ` and nothing else.
    pub fn open(pid: u32) -> Result<Self> {
        // SAFETY: OpenProcess is called with a plain access mask and a pid from a
        // Toolhelp snapshot. The returned handle is owned by this struct and closed in Drop.
        let handle = unsafe {
            OpenProcess(PROCESS_VM_READ, false, pid).map_err(|e| {
                tracing::debug!("OpenProcess failed for PID {}: {}", pid, e);
                Error::ProcessOpenFailed(format!("PID {}: {}", pid, e))
            })?
        };

        Ok(Self { handle, pid })
    }

    pub fn handle(&self) -> HANDLE {
        self.handle
    }
}

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn open(_pid: u32) -> Result<Self> {
        Err(Error::ProcessOpenFailed(
            "Windows only: process access not supported on this platform".to_string(),
        ))
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if !self.handle.is_invalid() {
            // SAFETY: self.handle came from OpenProcess and has not been closed yet.
            if let Err(e) = unsafe { CloseHandle(self.handle) } {
                warn!("Failed to close process handle: {}", e);
            }
        }
    }
}

/// Executable names compare exactly, including case.
pub(crate) fn process_name_matches(exe_name: &str, wanted: &str) -> bool {
    exe_name == wanted
}

/// Module names compare ASCII case-insensitively.
pub(crate) fn module_name_matches(module_name: &str, wanted: &str) -> bool {
    module_name.eq_ignore_ascii_case(wanted)
}

/// Decode a fixed-size, NUL-padded UTF-16 name field.
pub(crate) fn wide_name(raw: &[u16]) -> String {
    let len = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..len])
}

/// Find the first running process whose executable name is exactly `name`.
#[cfg(target_os = "windows")]
pub fn find_process_id(name: &str) -> Result<u32> {
    // SAFETY: CreateToolhelp32Snapshot with TH32CS_SNAPPROCESS is safe to call.
    // The returned handle is closed at the end of this function.
    let snapshot = unsafe {
        CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
            .map_err(|e| Error::ProcessNotFound(e.to_string()))?
    };

    let mut entry = PROCESSENTRY32W {
        dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    let mut found = None;
    // SAFETY: Process32FirstW and Process32NextW are called with a valid snapshot handle
    // and a PROCESSENTRY32W whose dwSize is initialised.
    unsafe {
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                if process_name_matches(&wide_name(&entry.szExeFile), name) {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }
    }

    // SAFETY: snapshot is a valid handle from CreateToolhelp32Snapshot
    let _ = unsafe { CloseHandle(snapshot) };

    found.ok_or_else(|| Error::ProcessNotFound(format!("Process '{}' not found", name)))
}

#[cfg(not(target_os = "windows"))]
pub fn find_process_id(name: &str) -> Result<u32> {
    Err(Error::ProcessNotFound(format!(
        "Windows only: cannot enumerate processes for '{}' on this platform",
        name
    )))
}

/// Find the load address of `module` inside process `pid`.
#[cfg(target_os = "windows")]
pub fn module_base_address(pid: u32, module: &str) -> Result<ModuleBase> {
    // SAFETY: CreateToolhelp32Snapshot with module flags and a pid is safe to call.
    // The returned handle is closed at the end of this function.
    let snapshot = unsafe {
        CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)
            .map_err(|e| Error::ModuleNotFound(format!("{} (PID {}): {}", module, pid, e)))?
    };

    let mut entry = MODULEENTRY32W {
        dwSize: std::mem::size_of::<MODULEENTRY32W>() as u32,
        ..Default::default()
    };

    let mut found = None;
    // SAFETY: Module32FirstW and Module32NextW are called with a valid snapshot handle
    // and a MODULEENTRY32W whose dwSize is initialised.
    unsafe {
        if Module32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                if module_name_matches(&wide_name(&entry.szModule), module) {
                    found = Some(entry.modBaseAddr as u64);
                    break;
                }
                if Module32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }
    }

    // SAFETY: snapshot is a valid handle from CreateToolhelp32Snapshot
    let _ = unsafe { CloseHandle(snapshot) };

    match found {
        Some(address) => ModuleBase::new(address),
        None => Err(Error::ModuleNotFound(format!(
            "Module '{}' not loaded in PID {}",
            module, pid
        ))),
    }
}

#[cfg(not(target_os = "windows"))]
pub fn module_base_address(pid: u32, module: &str) -> Result<ModuleBase> {
    Err(Error::ModuleNotFound(format!(
        "Windows only: cannot enumerate modules of PID {} for '{}' on this platform",
        pid, module
    )))
}
