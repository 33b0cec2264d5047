use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static LINE_POOL: OnceLock<BufferPool> = OnceLock::new();

/// Pool shared by every logger in the process.
///
/// Keeps at most 64 idle buffers; buffers that grew past 64 KiB are dropped
/// instead of returned.
pub fn line_pool() -> &'static BufferPool {
    LINE_POOL.get_or_init(|| {
        const INITIAL_CAPACITY: usize = 256;
        const MAX_IDLE: usize = 64;
        const MAX_RETAINED_CAPACITY: usize = 64 * 1024;
        BufferPool::new(INITIAL_CAPACITY, MAX_IDLE, MAX_RETAINED_CAPACITY)
    })
}

/// A pool of reusable line buffers.
///
/// Safe to share between threads; each [`PooledBuffer`] is owned by exactly
/// one caller until it is dropped.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<Mutex<PoolInner>>,
}

struct PoolInner {
    idle: Vec<String>,
    initial_capacity: usize,
    max_idle: usize,
    max_retained_capacity: usize,
}

/// RAII handle for a pooled buffer. Returns the buffer to its pool on drop,
/// including when a panic unwinds through the owner.
pub struct PooledBuffer {
    buf: String,
    pool: Arc<Mutex<PoolInner>>,
}

impl BufferPool {
    /// Creates a pool.
    ///
    /// # Arguments
    /// * `initial_capacity` - Capacity of freshly allocated buffers
    /// * `max_idle` - Maximum number of buffers kept for reuse
    /// * `max_retained_capacity` - Buffers larger than this are not kept
    #[must_use]
    pub fn new(initial_capacity: usize, max_idle: usize, max_retained_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PoolInner {
                idle: Vec::with_capacity(max_idle),
                initial_capacity,
                max_idle,
                max_retained_capacity,
            })),
        }
    }

    /// Takes an empty buffer from the pool, allocating if none is idle.
    #[must_use]
    pub fn acquire(&self) -> PooledBuffer {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut buf = inner
            .idle
            .pop()
            .unwrap_or_else(|| String::with_capacity(inner.initial_capacity));
        buf.clear();
        PooledBuffer {
            buf,
            pool: Arc::clone(&self.inner),
        }
    }

    /// Number of idle buffers currently held.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .idle
            .len()
    }
}

impl Deref for PooledBuffer {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        let mut inner = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.idle.len() < inner.max_idle && buf.capacity() <= inner.max_retained_capacity {
            inner.idle.push(buf);
        }
    }
}
