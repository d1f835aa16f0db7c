//! Serial intake staging between the receive path and the control loop.
//!
//! A bounded byte queue built on `critical-section` and `heapless::Deque`.
//! The serial collaborator pushes from interrupt or task context; the
//! control loop drains chunks into the decoder. When the queue is full,
//! excess bytes are dropped rather than blocking the receive path — the
//! resumable decoder tolerates the resulting gaps the same way it
//! tolerates any other corrupted input, through validation.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Default staging capacity in bytes.
pub const DEFAULT_INTAKE_CAPACITY: usize = 5120;

/// A bounded, interrupt-safe byte queue.
pub struct ByteIntake<const N: usize = DEFAULT_INTAKE_CAPACITY> {
    inner: Mutex<RefCell<Deque<u8, N>>>,
}

impl<const N: usize> ByteIntake<N> {
    /// Create a new empty intake. `const`, so it can back a `static`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a producer handle for the receive path.
    pub const fn writer(&self) -> IntakeWriter<'_, N> {
        IntakeWriter { intake: self }
    }

    /// Get a consumer handle for the control loop.
    pub const fn reader(&self) -> IntakeReader<'_, N> {
        IntakeReader { intake: self }
    }

    /// Push bytes, dropping whatever does not fit.
    ///
    /// Returns the number of bytes accepted; the caller may count drops
    /// but must not retry them.
    pub fn push_slice(&self, bytes: &[u8]) -> usize {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let mut accepted = 0;
            for &byte in bytes {
                if queue.push_back(byte).is_err() {
                    break;
                }
                accepted += 1;
            }
            accepted
        })
    }

    /// Drain up to `buf.len()` bytes into `buf` in arrival order.
    ///
    /// Returns how many bytes were read; zero means the queue was empty.
    pub fn pop_chunk(&self, buf: &mut [u8]) -> usize {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let mut read = 0;
            while read < buf.len() {
                let Some(byte) = queue.pop_front() else {
                    break;
                };
                buf[read] = byte;
                read += 1;
            }
            read
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for ByteIntake<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle for a [`ByteIntake`].
#[derive(Clone, Copy)]
pub struct IntakeWriter<'a, const N: usize = DEFAULT_INTAKE_CAPACITY> {
    intake: &'a ByteIntake<N>,
}

impl<const N: usize> IntakeWriter<'_, N> {
    /// Push bytes, dropping whatever does not fit. Returns bytes accepted.
    pub fn push_slice(&self, bytes: &[u8]) -> usize {
        self.intake.push_slice(bytes)
    }
}

/// Consumer handle for a [`ByteIntake`].
#[derive(Clone, Copy)]
pub struct IntakeReader<'a, const N: usize = DEFAULT_INTAKE_CAPACITY> {
    intake: &'a ByteIntake<N>,
}

impl<const N: usize> IntakeReader<'_, N> {
    /// Drain up to `buf.len()` staged bytes. Returns bytes read.
    pub fn pop_chunk(&self, buf: &mut [u8]) -> usize {
        self.intake.pop_chunk(buf)
    }

    pub fn len(&self) -> usize {
        self.intake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intake.is_empty()
    }
}
