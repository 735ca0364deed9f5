//! Long-lived streams of decoded events.
//!
//! A stream owns one HTTP response body. A background task splits the body
//! into frames, decodes each non keep-alive frame, and publishes events and
//! errors in wire order on one bounded queue. [`EventStream::into_channels`]
//! splits that queue into an event channel and an error channel. The call
//! that opens a stream returns as soon as the task is running (after reading
//! the preamble, for streams that have one).
//!
//! # Lifecycle
//!
//! ```text
//! Opening ──preamble ok──▶ Streaming ──read error / end of body / cancel──▶ Closed
//!    │                      │    ▲
//!    └─preamble failed      └────┘ per frame: event, keep-alive or decode error
//! ```
//!
//! # Error Policy
//!
//! - A frame that fails to decode is reported as an error item and the
//!   stream keeps reading.
//! - A read failure, or the server ending the body, is reported once as the
//!   last item; then the task ends.
//! - Nothing is retried or reconnected.
//!
//! # Cancellation
//!
//! [`StreamHandle::cancel`], or dropping the handle, stops the task while it
//! waits for the network or for channel capacity, and drops the response
//! body immediately. Dropping the [`EventStream`], or the event receiver
//! returned by [`EventStream::into_channels`], stops it too.
//!
//! # Examples
//!
//! ```ignore
//! use twitter_stream::{AccessToken, ConsumerCredentials, TwitterClient};
//!
//! let client = TwitterClient::new(ConsumerCredentials::new("key", "secret"));
//! let token = AccessToken::new("token", "token-secret");
//! let (friends, mut stream) = client.user_stream(&token).await?;
//!
//! while let Some(item) = stream.next().await {
//!     match item {
//!         Ok(tweet) => println!("@{}: {}", tweet.author_screen_name(), tweet.text),
//!         Err(e) => eprintln!("stream error: {}", e),
//!     }
//! }
//! ```

use crate::client::parser::{Frame, FrameParser};
use crate::error::{Result, TwitterError};
use crate::types::Tweet;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

/// A boxed response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// A stream of tweets, as opened by the client.
pub type TweetStream = EventStream<Tweet>;

/// Settings for one stream reader.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Capacity of the event channel and of the error channel
    pub buffer: usize,
    /// Longest frame accepted before its delimiter arrives
    pub max_frame_bytes: usize,
    /// Log per-frame errors at `warn` level
    pub log_frame_errors: bool,
    /// Name used in log output
    pub label: String,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            buffer: 100,
            max_frame_bytes: 1024 * 1024,
            log_frame_errors: true,
            label: "stream".to_string(),
        }
    }
}

/// Reads whole frames out of a response body.
struct FrameReader {
    body: ByteStream,
    parser: FrameParser,
    ready: VecDeque<Result<Frame>>,
}

impl FrameReader {
    fn new(body: ByteStream, max_frame_bytes: usize) -> Self {
        Self {
            body,
            parser: FrameParser::new(max_frame_bytes),
            ready: VecDeque::new(),
        }
    }

    /// Next frame, per-frame error, or read error. `None` at end of body.
    async fn next_frame(&mut self) -> Option<Result<Frame>> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Some(frame);
            }
            match self.body.next().await? {
                Ok(chunk) => self.ready.extend(self.parser.feed(&chunk)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Observable state of a running stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// The reader task is running
    Streaming,
    /// The reader task has ended; the body has been released
    Closed,
}

/// Owns the reader task of one stream.
///
/// Dropping the handle cancels the stream.
#[derive(Debug)]
pub struct StreamHandle {
    cancel: Option<oneshot::Sender<()>>,
    reader: Option<JoinHandle<()>>,
    splitter: Option<JoinHandle<()>>,
}

impl StreamHandle {
    /// Ask the reader task to stop. It drops the response body at its next
    /// suspension point, which is immediate when it is waiting for data.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
        if let Some(splitter) = self.splitter.take() {
            splitter.abort();
        }
    }

    /// Whether the reader task is still running.
    pub fn state(&self) -> StreamState {
        match &self.reader {
            Some(task) if !task.is_finished() => StreamState::Streaming,
            _ => StreamState::Closed,
        }
    }

    /// Wait until the reader task has ended and released the body.
    pub async fn closed(&mut self) {
        if let Some(task) = self.reader.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "stream reader task failed");
            }
        }
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A running stream: one ordered queue of decoded events and errors, and
/// the handle that owns the reader task.
///
/// Items come out in exactly the order their frames arrived on the wire.
/// [`EventStream::into_channels`] splits the queue into an event channel and
/// an error channel for consumers that want them apart.
#[derive(Debug)]
pub struct EventStream<T> {
    items: mpsc::Receiver<Result<T>>,
    buffer: usize,
    /// Cancellation and state of the reader task
    pub handle: StreamHandle,
}

impl<T> EventStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Start reading `body` on a background task.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn<S>(body: S, options: StreamOptions) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        let reader = FrameReader::new(Box::pin(body), options.max_frame_bytes);
        Self::start(reader, options)
    }

    /// Read the first frame of `body` as a preamble of type `P`, then start
    /// streaming the rest.
    ///
    /// Failing to read or decode the preamble fails the whole call; no task
    /// is spawned and the body is dropped.
    pub async fn spawn_with_preamble<P, S>(body: S, options: StreamOptions) -> Result<(P, Self)>
    where
        P: DeserializeOwned,
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        let mut reader = FrameReader::new(Box::pin(body), options.max_frame_bytes);
        let frame = reader.next_frame().await.ok_or(TwitterError::StreamClosed)??;
        let preamble = frame.decode()?;
        debug!(stream = %options.label, bytes = frame.len(), "decoded stream preamble");
        Ok((preamble, Self::start(reader, options)))
    }

    fn start(reader: FrameReader, options: StreamOptions) -> Self {
        let buffer = options.buffer.max(1);
        let (item_tx, item_rx) = mpsc::channel(buffer);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        info!(stream = %options.label, "stream opened");
        let task = tokio::spawn(read_loop(reader, item_tx, cancel_rx, options));

        EventStream {
            items: item_rx,
            buffer,
            handle: StreamHandle {
                cancel: Some(cancel_tx),
                reader: Some(task),
                splitter: None,
            },
        }
    }

    /// Split into an event channel and an error channel.
    ///
    /// Each channel keeps wire order; the order between them is lost.
    /// Dropping the event receiver stops the stream. The handle must be kept
    /// alive for as long as the stream should run. Must be called within a
    /// Tokio runtime.
    pub fn into_channels(self) -> (mpsc::Receiver<T>, mpsc::Receiver<TwitterError>, StreamHandle) {
        let EventStream {
            items,
            buffer,
            mut handle,
        } = self;
        let (event_tx, event_rx) = mpsc::channel(buffer);
        let (error_tx, error_rx) = mpsc::channel(buffer);
        handle.splitter = Some(tokio::spawn(split_loop(items, event_tx, error_tx)));
        (event_rx, error_rx, handle)
    }

    /// Split into `Stream` adapters for use with `StreamExt` combinators.
    ///
    /// Same semantics as [`EventStream::into_channels`].
    pub fn into_streams(self) -> (ReceiverStream<T>, ReceiverStream<TwitterError>, StreamHandle) {
        let (events, errors, handle) = self.into_channels();
        (ReceiverStream::new(events), ReceiverStream::new(errors), handle)
    }
}

impl<T> EventStream<T> {
    /// Receive the next event or error, in wire order.
    ///
    /// Returns `None` once the reader has ended and the queue is drained.
    pub async fn next(&mut self) -> Option<Result<T>> {
        self.items.recv().await
    }

    /// Stop the stream and discard anything still queued, so no further
    /// item is delivered.
    pub fn cancel(&mut self) {
        self.handle.cancel();
        self.items.close();
        while self.items.try_recv().is_ok() {}
    }

    /// Whether the reader task is still running.
    pub fn state(&self) -> StreamState {
        self.handle.state()
    }
}

impl<T> Stream for EventStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.items.poll_recv(cx)
    }
}

/// Send `msg`, giving up if the stream is cancelled while waiting for capacity.
async fn deliver<M>(tx: &mpsc::Sender<M>, msg: M, cancel: &mut oneshot::Receiver<()>) -> Delivery {
    tokio::select! {
        biased;
        _ = cancel => Delivery::Cancelled,
        sent = tx.send(msg) => if sent.is_ok() { Delivery::Sent } else { Delivery::ReceiverGone },
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Delivery {
    Sent,
    ReceiverGone,
    Cancelled,
}

async fn read_loop<T>(
    mut reader: FrameReader,
    items: mpsc::Sender<Result<T>>,
    mut cancel: oneshot::Receiver<()>,
    options: StreamOptions,
) where
    T: DeserializeOwned + Send + 'static,
{
    let label = options.label.as_str();

    loop {
        let next = tokio::select! {
            biased;
            _ = &mut cancel => {
                info!(stream = %label, "stream cancelled");
                break;
            }
            _ = items.closed() => {
                info!(stream = %label, "stream receiver dropped, closing stream");
                break;
            }
            next = reader.next_frame() => next,
        };

        let item = match next {
            Some(Ok(frame)) if frame.is_keep_alive() => {
                debug!(stream = %label, "keep-alive");
                continue;
            }
            Some(Ok(frame)) => {
                let decoded = frame.decode::<T>();
                if let Err(e) = &decoded {
                    if options.log_frame_errors {
                        warn!(stream = %label, error = %e, frame = %String::from_utf8_lossy(frame.payload()), "failed to decode frame");
                    }
                }
                decoded
            }
            Some(Err(e)) => {
                if options.log_frame_errors && !e.is_fatal_to_stream() {
                    warn!(stream = %label, error = %e, "dropped stream frame");
                }
                Err(e)
            }
            None => {
                if let Some(rest) = reader.parser.finish() {
                    debug!(stream = %label, bytes = rest.len(), "discarding unterminated frame");
                }
                Err(TwitterError::StreamClosed)
            }
        };

        let fatal = match &item {
            Err(e) if e.is_fatal_to_stream() => {
                info!(stream = %label, error = %e, "stream ended");
                true
            }
            _ => false,
        };
        match deliver(&items, item, &mut cancel).await {
            Delivery::Sent if !fatal => {}
            Delivery::Sent => break,
            Delivery::ReceiverGone => {
                info!(stream = %label, "stream receiver dropped, closing stream");
                break;
            }
            Delivery::Cancelled => {
                info!(stream = %label, "stream cancelled");
                break;
            }
        }
    }

    // The body is released here, on every exit path.
    drop(reader);
    debug!(stream = %label, "stream body released");
}

/// Fan the ordered queue out to an event channel and an error channel.
///
/// Ends when the queue ends or the event receiver is dropped. A dropped
/// error receiver only discards errors.
async fn split_loop<T>(
    mut items: mpsc::Receiver<Result<T>>,
    events: mpsc::Sender<T>,
    errors: mpsc::Sender<TwitterError>,
) {
    loop {
        let item = tokio::select! {
            biased;
            _ = events.closed() => break,
            item = items.recv() => item,
        };
        match item {
            Some(Ok(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Some(Err(e)) => {
                let _ = errors.send(e).await;
            }
            None => break,
        }
    }
}
