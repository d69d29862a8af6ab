//! Staging pipeline: producers feed one consumer over an ordered queue.
//!
//! ```text
//!  stdin ──▶ line producer ──┐
//!                            ├──▶ queue ──▶ consumer ──▶ rasterizer
//!  window ─▶ event producer ─┘
//! ```
//!
//! [`Pipeline`] owns the queue and the producer threads. Running it hands
//! the queue to a [`Consumer`] on the calling thread and tears the producers
//! down once the consumer stops.

pub mod consumer;
pub mod producer;
pub mod shared;

use std::io::BufRead;
use std::thread::JoinHandle;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::error::{Error, ErrorPolicy, Result};
use crate::event::{EventSource, Message};
use crate::geometry::Size;
use crate::render::Rasterizer;

pub use consumer::{Click, Consumer, ConsumerState, Flow};
pub use producer::{spawn_event_producer, spawn_line_producer};
pub use shared::Shared;

/// A running producer thread.
struct Producer {
    role: &'static str,
    handle: JoinHandle<()>,
}

/// Queue, shared buffers and producer threads.
pub struct Pipeline {
    shared: Shared,
    sender: UnboundedSender<Message>,
    receiver: UnboundedReceiver<Message>,
    producers: Vec<Producer>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self { shared: Shared::new(), sender, receiver, producers: Vec::new() }
    }

    pub fn shared(&self) -> Shared {
        self.shared.clone()
    }

    /// A handle for posting messages onto the queue.
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.sender.clone()
    }

    /// Build a consumer wired to this pipeline's buffers and queue.
    pub fn consumer<R: Rasterizer>(&self, viewport: Size, rasterizer: R) -> Consumer<R> {
        Consumer::new(self.shared(), self.sender(), viewport, rasterizer)
    }

    /// Start reading markup lines from `reader`.
    pub fn spawn_lines<R>(&mut self, reader: R, policy: ErrorPolicy) -> Result<()>
    where
        R: BufRead + Send + 'static,
    {
        let handle = spawn_line_producer(reader, self.shared(), self.sender(), policy)?;
        self.producers.push(Producer { role: producer::LINE_ROLE, handle });
        Ok(())
    }

    /// Start forwarding windowing events from `source`.
    pub fn spawn_events(&mut self, source: Box<dyn EventSource>) -> Result<()> {
        let handle = spawn_event_producer(source, self.sender())?;
        self.producers.push(Producer { role: producer::EVENT_ROLE, handle });
        Ok(())
    }

    /// Run `consumer` on the calling thread until it stops, then tear down.
    ///
    /// The consumer keeps a sender for its own repaints, so the queue never
    /// closes under it: only a message ends the run. Every producer posts
    /// one when it ends ([`Message::InputClosed`] for a one-shot consumer,
    /// [`Message::Exit`] when the event source closes, [`Message::Abort`] on
    /// failure).
    ///
    /// The consumer's error, if any, wins over teardown errors.
    pub fn run<R: Rasterizer>(self, consumer: &mut Consumer<R>) -> Result<()> {
        let Pipeline { mut receiver, producers, .. } = self;
        let outcome = consumer.run(&mut receiver);
        drop(receiver);
        let teardown = teardown(producers);
        outcome.and(teardown)
    }
}

/// Join producers that have finished; detach those still blocked on input.
///
/// The queue must already be closed so that a producer which wakes up later
/// stops at its next send.
fn teardown(producers: Vec<Producer>) -> Result<()> {
    let mut result = Ok(());
    for Producer { role, handle } in producers {
        if !handle.is_finished() {
            log::debug!("{role} still blocked on input, detaching");
            continue;
        }
        if handle.join().is_err() {
            log::error!("{role} panicked");
            if result.is_ok() {
                result = Err(Error::Thread { role, message: "panicked".to_owned() });
            }
        }
    }
    result
}
