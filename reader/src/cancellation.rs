use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared flag for cooperatively cancelling reads.
///
/// Clones share the same flag, so one clone can be handed to a reader while another is kept to call
/// [`cancel`](CancellationToken::cancel). Readers only look at the flag between two chunks.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token as cancelled. Returns `true` if this call cancelled it, and `false` if it had already been cancelled.
    pub fn cancel(&self) -> bool {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        assert!(token.cancel());
        assert!(clone.is_cancelled());
        assert!(!clone.cancel());
    }
}
