//! Platform frame callbacks

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Which callback a requested frame should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// The priming frame `start` asks for before the loop runs
    Prime,
    /// A regular tick of the frame loop
    Tick,
}

/// Platform hook that calls back on the next display frame
pub trait FrameSource {
    /// Ask for one callback of the given kind
    fn request_frame(&mut self, kind: FrameKind);
}

/// Frame source backed by a shared queue
///
/// Clones share the queue: hand one clone to the scheduler and keep another
/// to drain requests, feeding each one back into
/// [`SceneManager::on_frame`](super::SceneManager::on_frame).
#[derive(Debug, Clone, Default)]
pub struct QueuedFrameSource {
    queue: Rc<RefCell<VecDeque<FrameKind>>>,
}

impl QueuedFrameSource {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending request
    pub fn pop(&self) -> Option<FrameKind> {
        self.queue.borrow_mut().pop_front()
    }

    /// Number of pending requests
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// True if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl FrameSource for QueuedFrameSource {
    fn request_frame(&mut self, kind: FrameKind) {
        self.queue.borrow_mut().push_back(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue() {
        let driver = QueuedFrameSource::new();
        let mut source = driver.clone();

        source.request_frame(FrameKind::Prime);
        source.request_frame(FrameKind::Tick);

        assert_eq!(driver.pending(), 2);
        assert_eq!(driver.pop(), Some(FrameKind::Prime));
        assert_eq!(driver.pop(), Some(FrameKind::Tick));
        assert!(source.is_empty());
    }
}
