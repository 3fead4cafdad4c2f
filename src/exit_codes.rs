//! Exit code constants for the domscribe CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing API key, nothing selected)
//! - 2: Template defect (unknown generator key)
//! - 3: Transport failure (chat API rejected the request or was unreachable)
//! - 4: Injection failure (page observer could not be installed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing credential, or no DOM selection.
pub const USER_ERROR: i32 = 1;

/// Unknown template key. Indicates a programming or configuration defect.
pub const TEMPLATE_FAILURE: i32 = 2;

/// Chat API call rejected or network failure.
pub const TRANSPORT_FAILURE: i32 = 3;

/// Observer script could not be injected into the page.
pub const INJECTION_FAILURE: i32 = 4;
