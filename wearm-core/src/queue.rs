//! Fixed-capacity byte ring buffer
//!
//! Raw transport stage between the UART driver and the line intake. One
//! slot is always left empty so `front == rear` means empty and
//! `next(rear) == front` means full; the usable capacity is `N - 1`.

/// Errors returned by [`ByteQueue`] operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// No free slot for another byte
    Full,
    /// Nothing to dequeue
    Empty,
}

/// Circular byte queue with `N - 1` usable slots
#[derive(Debug, Clone)]
pub struct ByteQueue<const N: usize> {
    front: usize,
    rear: usize,
    buf: [u8; N],
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            front: 0,
            rear: 0,
            buf: [0; N],
        }
    }

    /// Discard all queued bytes
    pub fn init(&mut self) {
        self.front = 0;
        self.rear = 0;
    }

    #[inline]
    const fn next(pos: usize) -> usize {
        (pos + 1) % N
    }

    pub fn is_empty(&self) -> bool {
        self.front == self.rear
    }

    pub fn is_full(&self) -> bool {
        Self::next(self.rear) == self.front
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        (self.rear + N - self.front) % N
    }

    /// Usable capacity
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Append a byte
    pub fn enqueue(&mut self, byte: u8) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full);
        }
        self.buf[self.rear] = byte;
        self.rear = Self::next(self.rear);
        Ok(())
    }

    /// Remove and return the oldest byte
    pub fn dequeue(&mut self) -> Result<u8, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let byte = self.buf[self.front];
        self.front = Self::next(self.front);
        Ok(byte)
    }
}
