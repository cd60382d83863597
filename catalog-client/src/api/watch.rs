use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::{stream::BoxStream, Stream, StreamExt};

use crate::{core::WatchEvent, Result};

/// A live watch on a resource collection
///
/// Returned by [`Api::watch`](crate::Api::watch). Events are decoded one line at a time
/// as the stream is polled, nothing is read ahead.
///
/// The stream owns the connection. Calling [`stop`](WatchStream::stop) or dropping the
/// stream closes it, and once stopped every later poll yields `None`.
#[must_use = "streams do nothing unless polled"]
pub struct WatchStream<K> {
    inner: Option<BoxStream<'static, Result<WatchEvent<K>>>>,
}

impl<K> WatchStream<K> {
    pub(crate) fn new<S>(events: S) -> Self
    where
        S: Stream<Item = Result<WatchEvent<K>>> + Send + 'static,
    {
        Self {
            inner: Some(events.boxed()),
        }
    }

    /// Stop watching and release the connection
    ///
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!("watch stopped");
        }
    }

    /// Whether the watch has been stopped or has run to completion
    pub fn is_stopped(&self) -> bool {
        self.inner.is_none()
    }
}

impl<K> Stream for WatchStream<K> {
    type Item = Result<WatchEvent<K>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match inner.poll_next_unpin(cx) {
            Poll::Ready(None) => {
                // server closed the connection
                this.inner = None;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}

impl<K> std::fmt::Debug for WatchStream<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchStream")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::WatchStream;
    use crate::core::{Instance, InstanceSpec, WatchEvent};
    use futures::{channel::mpsc, StreamExt};

    #[tokio::test]
    async fn stop_releases_the_connection() {
        let (tx, rx) = mpsc::unbounded();
        let mut stream = WatchStream::new(rx);

        let inst = Instance::new("db", InstanceSpec::new("mysql", "free"));
        tx.unbounded_send(Ok(WatchEvent::Added(inst))).unwrap();
        assert!(matches!(stream.next().await, Some(Ok(WatchEvent::Added(_)))));

        stream.stop();
        assert!(stream.is_stopped());
        // receiver is gone with the inner stream
        assert!(tx.is_closed());
        assert!(stream.next().await.is_none());
        stream.stop();
    }

    #[tokio::test]
    async fn server_close_ends_the_stream() {
        let (tx, rx) = mpsc::unbounded::<crate::Result<WatchEvent<Instance>>>();
        let mut stream = WatchStream::new(rx);
        drop(tx);
        assert!(stream.next().await.is_none());
        assert!(stream.is_stopped());
        assert!(stream.next().await.is_none());
    }
}
