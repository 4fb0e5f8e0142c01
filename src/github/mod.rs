mod client;
mod review;

// Explicit re-exports - only export what is actually used
pub use client::{GhClient, ReviewClient};
pub use review::{DraftComment, ReviewAction, ReviewRequest, Side};
