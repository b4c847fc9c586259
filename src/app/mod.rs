// Concrete collaborators: a recording delegate, fixed permissions, the
// stack-preview surface and the session script reader used by the binary.

pub mod delegate;
pub mod permissions;
pub mod script;
pub mod stack_preview;
