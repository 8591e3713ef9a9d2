mod bytes;
pub mod handle;
mod pod;
pub mod provider;
mod reader;

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use bytes::ByteBuffer;
pub use handle::{ModuleBase, ProcessHandle, find_process_id, module_base_address};
pub use pod::Pod;
pub use provider::{AttachTarget, AttachedProcess, ProcessLocator, SystemLocator, attach};
pub use reader::{MAX_STRING_LEN, MemoryReader, ReadMemory};

// Re-export mock for convenient access in tests
#[doc(hidden)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
