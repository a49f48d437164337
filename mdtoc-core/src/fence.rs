//! Code fence tracking shared by every line scanner

/// Returns true if the line opens or closes a fenced code block
pub fn is_fence(line: &str) -> bool {
    line.trim().starts_with("```")
}

/// Tracks whether a scan is currently inside a fenced code block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FenceTracker {
    in_fence: bool,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line. Returns true when the line is fence content or a fence
    /// delimiter, i.e. when callers must not interpret it.
    pub fn consume(&mut self, line: &str) -> bool {
        if is_fence(line) {
            self.in_fence = !self.in_fence;
            return true;
        }
        self.in_fence
    }

    pub fn in_fence(&self) -> bool {
        self.in_fence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fence() {
        assert!(is_fence("```"));
        assert!(is_fence("```rust"));
        assert!(is_fence("   ```"));
        assert!(!is_fence("``"));
        assert!(!is_fence("text ```"));
    }

    #[test]
    fn test_tracker_toggles() {
        let mut fence = FenceTracker::new();
        assert!(!fence.consume("# Heading"));
        assert!(fence.consume("```md"));
        assert!(fence.in_fence());
        assert!(fence.consume("# Not a heading"));
        assert!(fence.consume("```"));
        assert!(!fence.in_fence());
        assert!(!fence.consume("after"));
    }

    #[test]
    fn test_unclosed_fence_swallows_rest() {
        let mut fence = FenceTracker::new();
        fence.consume("```");
        assert!(fence.consume("# one"));
        assert!(fence.consume("# two"));
    }
}
