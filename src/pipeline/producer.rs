//! Producers: the line reader and the windowing-event reader.
//!
//! Each producer runs on its own thread, blocks on its input and posts
//! messages to the consumer's queue. A producer stops when its input ends,
//! when it hits a fatal error (posted as [`Message::Abort`]), or when the
//! queue has been closed.

use std::io::{BufRead, Read};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::UnboundedSender;

use crate::error::{Error, ErrorPolicy, Result};
use crate::event::{translate, EventSource, Message};
use crate::markup::{tokenize, MAX_LINE_LEN};

use super::shared::Shared;

pub const LINE_ROLE: &str = "line producer";
pub const EVENT_ROLE: &str = "event producer";

fn spawn(role: &'static str, body: impl FnOnce() + Send + 'static) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(role.replace(' ', "-"))
        .spawn(body)
        .map_err(|err| Error::Thread { role, message: err.to_string() })
}

// ---------------------------------------------------------------------------
// Line producer
// ---------------------------------------------------------------------------

/// Start the line producer on `reader`.
pub fn spawn_line_producer<R>(
    reader: R,
    shared: Shared,
    queue: UnboundedSender<Message>,
    policy: ErrorPolicy,
) -> Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    spawn(LINE_ROLE, move || {
        if let Err(err) = read_lines(reader, &shared, &queue, policy) {
            let _ = queue.send(Message::Abort(err));
        }
    })
}

/// Longest read for one line: the content plus "\r\n".
const READ_LIMIT: u64 = MAX_LINE_LEN as u64 + 2;

/// Read, tokenize and publish lines until end of input.
///
/// A line is never buffered past [`READ_LIMIT`] bytes; a longer one is an
/// [`Error::Overflow`]. Bytes that are not UTF-8 are an
/// [`Error::InvalidUtf8`]. Both are line errors, so under
/// [`ErrorPolicy::SkipLine`] the rest of the line is discarded and reading
/// goes on.
///
/// Returns early without error if the queue is closed.
pub fn read_lines<R: BufRead>(
    mut reader: R,
    shared: &Shared,
    queue: &UnboundedSender<Message>,
    policy: ErrorPolicy,
) -> Result<()> {
    let mut buf = Vec::new();
    let mut number = 0usize;
    loop {
        buf.clear();
        let read = reader.by_ref().take(READ_LIMIT).read_until(b'\n', &mut buf)?;
        if read == 0 {
            log::debug!("end of input after {number} lines");
            let _ = queue.send(Message::InputClosed);
            return Ok(());
        }
        number += 1;

        let overlong = read as u64 == READ_LIMIT && buf.last() != Some(&b'\n');
        let parsed = if overlong {
            Err(Error::Overflow { len: buf.len(), max: MAX_LINE_LEN })
        } else {
            std::str::from_utf8(&buf)
                .map_err(|err| Error::InvalidUtf8 { offset: err.valid_up_to() })
                .and_then(tokenize)
        };
        let tokens = match parsed {
            Ok(tokens) => tokens,
            Err(err) if policy == ErrorPolicy::SkipLine => {
                log::warn!("line {number} skipped: {err}");
                if overlong {
                    discard_line(&mut reader, &mut buf)?;
                }
                continue;
            }
            Err(err) => return Err(err),
        };
        log::trace!("line {number}: {} tokens", tokens.len());

        shared.replace_tokens(tokens)?;
        if queue.send(Message::OpsReady).is_err() {
            log::debug!("queue closed, {LINE_ROLE} stopping");
            return Ok(());
        }
    }
}

/// Consume input up to and including the next newline, in bounded reads.
fn discard_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<()> {
    loop {
        buf.clear();
        let read = reader.by_ref().take(READ_LIMIT).read_until(b'\n', buf)?;
        if read == 0 || buf.last() == Some(&b'\n') {
            return Ok(());
        }
    }
}

// ---------------------------------------------------------------------------
// Event producer
// ---------------------------------------------------------------------------

/// Start the event producer on `source`.
pub fn spawn_event_producer(
    source: Box<dyn EventSource>,
    queue: UnboundedSender<Message>,
) -> Result<JoinHandle<()>> {
    spawn(EVENT_ROLE, move || {
        if let Err(err) = forward_events(source, &queue) {
            let _ = queue.send(Message::Abort(err));
        }
    })
}

/// Forward windowing events as messages until the source closes or a quit
/// key has been forwarded.
///
/// A closed source means the window is gone, so it posts [`Message::Exit`].
pub fn forward_events(
    mut source: Box<dyn EventSource>,
    queue: &UnboundedSender<Message>,
) -> Result<()> {
    while let Some(event) = source.next_event()? {
        let Some(message) = translate(event) else {
            log::trace!("coalesced {event:?}");
            continue;
        };
        let quit = matches!(&message, Message::KeyPress(key) if key.is_quit());
        if queue.send(message).is_err() {
            log::debug!("queue closed, {EVENT_ROLE} stopping");
            return Ok(());
        }
        if quit {
            log::debug!("quit key forwarded, {EVENT_ROLE} stopping");
            return Ok(());
        }
    }
    log::debug!("event source closed, {EVENT_ROLE} posting exit");
    let _ = queue.send(Message::Exit);
    Ok(())
}
