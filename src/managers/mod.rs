//! # Package Manager Implementations
//!
//! Each backend implements the `PackageManager` trait: tag matching,
//! installed-checks, resolution, installation, and bootstrap of its own
//! prerequisite. Capabilities differ per backend and are declared in each
//! manager's `ManagerDescriptor`:
//!
//! - **rpm** (`rpm.rs`): native OS packages with real transitive
//!   resolution and `@`-prefixed group support
//! - **pip** (`pip.rs`): PyPI packages, identity resolution, bootstraps
//!   its own binary through the native manager
//!
//! The `ManagerRegistry` holds the ordered dispatch table built once at
//! startup; everything downstream receives it by reference.

pub mod pip;
pub mod registry;
pub mod rpm;
pub mod traits;

pub use pip::PipManager;
pub use registry::ManagerRegistry;
pub use rpm::RpmManager;
pub use traits::{ManagerDescriptor, PackageManager};
