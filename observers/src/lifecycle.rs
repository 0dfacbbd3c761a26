use alloc::boxed::Box;

use crate::{Diagnostic, Primitive};

/// The active/suspended state machine around one primitive handle.
///
/// A fresh controller is suspended; the owning observer activates it as soon as it has a
/// target and options. Dropping an active controller disconnects the primitive.
pub(crate) struct Lifecycle<N, O> {
    primitive: Box<dyn Primitive<N, O>>,
    active: bool,
}

impl<N, O> Lifecycle<N, O> {
    pub(crate) fn new(primitive: Box<dyn Primitive<N, O>>) -> Self {
        Self {
            primitive,
            active: false,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn resume(&mut self, target: &N, options: &O) -> Result<(), Diagnostic> {
        if self.active {
            return Err(Diagnostic::AlreadyActive);
        }
        self.primitive.observe(target, options);
        self.active = true;
        Ok(())
    }

    pub(crate) fn suspend(&mut self) -> Result<(), Diagnostic> {
        if !self.active {
            return Err(Diagnostic::AlreadySuspended);
        }
        self.primitive.disconnect();
        self.active = false;
        Ok(())
    }

    pub(crate) fn toggle(&mut self, target: &N, options: &O) -> Result<(), Diagnostic> {
        if self.active {
            self.suspend()
        } else {
            self.resume(target, options)
        }
    }

    /// Disconnects regardless of state and consumes the controller.
    pub(crate) fn release(mut self) {
        self.primitive.disconnect();
        self.active = false;
    }
}

impl<N, O> Drop for Lifecycle<N, O> {
    fn drop(&mut self) {
        if self.active {
            self.primitive.disconnect();
        }
    }
}
