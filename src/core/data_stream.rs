//! # Data stream module
//!
//! This module contains the [`DataStream`] struct which is used to deliver
//! transition snapshots to the consumer each time the engine commits a new
//! state.

use futures::Stream;
use spin::RwLock;
use std::{
    collections::VecDeque,
    ops::Deref,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll, Waker},
};

/// A generic data stream.
///
/// [`DataStream`] provides functionality which allows to `poll` any new data
/// which has been pushed into data queue.
#[derive(Debug, Default)]
pub struct DataStream<D> {
    inner: Arc<DataStreamRef<D>>,
}

impl<D> Deref for DataStream<D> {
    type Target = DataStreamRef<D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<D> Clone for DataStream<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// A generic data stream reference.
///
/// This struct contains the actual data stream state.
/// It is wrapped in an `Arc` by [`DataStream`] and uses interior mutability for
/// its internal state.
///
/// Not intended to be used directly. Use [`DataStream`] instead.
#[derive(Debug, Default)]
pub struct DataStreamRef<D> {
    /// Queue with data for stream listener.
    queue: RwLock<VecDeque<D>>,

    /// Maximum number of queued entries.
    capacity: usize,

    /// Data stream waker.
    ///
    /// Handler used each time when new data available for a stream listener.
    waker: RwLock<Option<Waker>>,

    /// Whether data stream still valid or not.
    is_valid: RwLock<bool>,
}

impl<D> DataStream<D> {
    /// Creates a new `DataStream` with a default queue size of 100.
    ///
    /// # Example
    ///
    /// ```
    /// use mount_transition::core::DataStream;
    ///
    /// let stream: DataStream<i32> = DataStream::new();
    /// ```
    pub fn new() -> DataStream<D> {
        Self::with_queue_size(100)
    }

    /// Creates a new `DataStream` with a specified queue size.
    ///
    /// When the queue is full the earliest entry is dropped to make room for
    /// the new one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mount_transition::core::DataStream;
    ///
    /// let data_stream = DataStream::<usize>::with_queue_size(10);
    /// ```
    pub fn with_queue_size(size: usize) -> DataStream<D> {
        Self {
            inner: Arc::new(DataStreamRef {
                queue: RwLock::new(VecDeque::with_capacity(size)),
                capacity: size.max(1),
                waker: RwLock::new(None),
                is_valid: RwLock::new(true),
            }),
        }
    }

    pub(crate) fn push_data(&self, data: D) {
        if !*self.is_valid.read() {
            return;
        }

        let mut queue_data_slot = self.queue.write();

        // Dropping the earliest entry to prevent the queue from growing too large.
        if queue_data_slot.len() >= self.capacity {
            queue_data_slot.pop_front();
        }

        queue_data_slot.push_back(data);
        drop(queue_data_slot);

        self.wake_stream();
    }

    pub(crate) fn invalidate(&self) {
        let mut is_valid = self.is_valid.write();
        *is_valid = false;
        drop(is_valid);

        self.wake_stream();
    }

    fn wake_stream(&self) {
        if let Some(waker) = self.waker.write().take() {
            waker.wake();
        }
    }
}

impl<D> Stream for DataStream<D> {
    type Item = D;

    fn poll_next(self: Pin<&mut Self>, ctx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut waker_slot = self.waker.write();
        *waker_slot = Some(ctx.waker().clone());
        drop(waker_slot);

        if let Some(data) = self.queue.write().pop_front() {
            Poll::Ready(Some(data))
        } else if !*self.is_valid.read() {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
