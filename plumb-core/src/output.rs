//! Output trait for stack renderings
//!
//! This module defines the Output trait the engine writes the filtered call
//! stack to before a failure reaches the sink. Stdout is the default
//! destination; [`BufferOutput`] captures writes in memory so tests can assert
//! on them.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Output trait for informational writes
///
/// Errors are reported back to the caller but never block a failure from
/// reaching the sink.
pub trait Output {
    /// Write bytes to the output
    fn write(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush any buffered output
    fn flush(&mut self) -> io::Result<()>;
}

impl<O: Output + ?Sized> Output for &mut O {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<O: Output + ?Sized> Output for Box<O> {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// RUST CONCEPT: Shared buffer with interior mutability
// Clones share one buffer: hand a clone to a Spec, keep one to inspect
#[derive(Clone, Debug, Default)]
pub struct BufferOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Output for BufferOutput {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.buffer.borrow_mut().extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOutput;

impl Output for NullOutput {
    fn write(&mut self, _data: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
