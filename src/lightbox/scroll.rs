use std::cell::Cell;
use std::rc::Rc;

/// Document-level scroll suppression while a lightbox is open.
pub trait ScrollLock {
    fn lock(&self);
    fn unlock(&self);
}

/// Holds the scroll lock for as long as it lives. Dropping the guard, on
/// any path, releases it.
pub struct ScrollGuard {
    lock: Rc<dyn ScrollLock>,
}

impl ScrollGuard {
    pub fn acquire(lock: Rc<dyn ScrollLock>) -> Self {
        lock.lock();
        Self { lock }
    }
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

impl std::fmt::Debug for ScrollGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ScrollGuard")
    }
}

/// For hosts with nothing to lock.
pub struct NoScrollLock;

impl ScrollLock for NoScrollLock {
    fn lock(&self) {}
    fn unlock(&self) {}
}

/// Reference-counted lock; the page is locked while the depth is non-zero.
#[derive(Debug, Default)]
pub struct CountingScrollLock {
    depth: Cell<usize>,
}

impl CountingScrollLock {
    pub fn is_locked(&self) -> bool {
        self.depth.get() > 0
    }

    pub fn depth(&self) -> usize {
        self.depth.get()
    }
}

impl ScrollLock for CountingScrollLock {
    fn lock(&self) {
        self.depth.set(self.depth.get() + 1);
    }

    fn unlock(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = Rc::new(CountingScrollLock::default());
        {
            let _guard = ScrollGuard::acquire(lock.clone());
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_nested_guards() {
        let lock = Rc::new(CountingScrollLock::default());
        let outer = ScrollGuard::acquire(lock.clone());
        let inner = ScrollGuard::acquire(lock.clone());
        assert_eq!(lock.depth(), 2);
        drop(inner);
        assert!(lock.is_locked());
        drop(outer);
        assert!(!lock.is_locked());
    }
}
