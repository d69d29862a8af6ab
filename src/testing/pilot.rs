//! Pilot: programmatic interaction with a headless consumer.
//!
//! The `Pilot` owns a [`Consumer`] wired to an in-memory rasterizer and
//! drives it synchronously: feed markup lines, simulate clicks, key presses
//! and resizes, then inspect what was painted.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::error::{ErrorPolicy, Result};
use crate::event::{ButtonPress, Key, KeyEvent, Message, Modifiers};
use crate::geometry::Size;
use crate::markup::tokenize;
use crate::paint::{ActionList, ImageLoader};
use crate::pipeline::{Click, Consumer, Flow, Shared};
use crate::render::{render, Canvas, Rasterizer};

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Rasterizer that keeps the last painted canvas in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    last: Option<Canvas>,
    paints: usize,
}

impl Recorder {
    pub fn last(&self) -> Option<&Canvas> {
        self.last.as_ref()
    }

    pub fn paints(&self) -> usize {
        self.paints
    }
}

impl Rasterizer for Recorder {
    fn paint(&mut self, actions: &ActionList, viewport: Size) -> Result<()> {
        self.last = Some(render(actions, viewport));
        self.paints += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless bar driver for testing.
///
/// Every simulated input goes through the consumer's message handling, and
/// [`process`](Self::process) drains whatever the consumer posted back (the
/// repaints after a rebuild).
///
/// # Examples
///
/// ```
/// use flexbar::testing::Pilot;
///
/// let mut pilot = Pilot::new(20, 1);
/// pilot.feed("^ca{clock}12:00").unwrap();
/// assert_eq!(pilot.screen(), "12:00");
/// assert_eq!(pilot.click(2, 0).unwrap().unwrap().to_string(), "clock 1");
/// ```
pub struct Pilot {
    consumer: Consumer<Recorder>,
    queue: UnboundedReceiver<Message>,
    shared: Shared,
    running: bool,
}

impl Pilot {
    /// Create a pilot for a `width` x `height` bar.
    pub fn new(width: u16, height: u16) -> Self {
        let shared = Shared::new();
        let (sender, queue) = unbounded_channel();
        let viewport = Size::new(f32::from(width), f32::from(height));
        let consumer = Consumer::new(shared.clone(), sender, viewport, Recorder::default());
        Self { consumer, queue, shared, running: true }
    }

    /// Skip bad lines instead of failing on them.
    pub fn keep_going(mut self) -> Self {
        self.consumer = self.consumer.with_policy(ErrorPolicy::SkipLine);
        self
    }

    /// Decode `^img{}` paths with `images`.
    pub fn with_images(mut self, images: impl ImageLoader + 'static) -> Self {
        self.consumer = self.consumer.with_images(images);
        self
    }

    /// Tokenize `line` into the shared buffer and let the consumer rebuild
    /// and repaint.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.shared.replace_tokens(tokenize(line)?)?;
        self.send(Message::OpsReady)
    }

    /// Resize the bar.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        let size = Size::new(f32::from(width), f32::from(height));
        self.send(Message::Resize(size))
    }

    /// Left-click the center of cell (`x`, `y`).
    pub fn click(&mut self, x: u16, y: u16) -> Result<Option<Click>> {
        self.click_with(x, y, 1, Modifiers::NONE)
    }

    /// Click cell (`x`, `y`) with `button` and `modifiers` held.
    pub fn click_with(
        &mut self,
        x: u16,
        y: u16,
        button: u8,
        modifiers: Modifiers,
    ) -> Result<Option<Click>> {
        let press = ButtonPress {
            x: f32::from(x) + 0.5,
            y: f32::from(y) + 0.5,
            button,
            modifiers,
        };
        let click = self.consumer.click(press)?;
        self.send(Message::ButtonPress(press))?;
        Ok(click)
    }

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) -> Result<()> {
        self.send(Message::KeyPress(KeyEvent::new(key, Modifiers::NONE)))
    }

    /// Hand one message to the consumer, then drain its follow-ups.
    pub fn send(&mut self, message: Message) -> Result<()> {
        self.handle(message)?;
        self.process()
    }

    /// Handle every message waiting on the queue.
    pub fn process(&mut self) -> Result<()> {
        while let Ok(message) = self.queue.try_recv() {
            self.handle(message)?;
        }
        Ok(())
    }

    fn handle(&mut self, message: Message) -> Result<()> {
        if self.consumer.handle(message)? == Flow::Stop {
            self.running = false;
        }
        Ok(())
    }

    /// Whether the consumer is still running (has not quit).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The last painted canvas as text, or an empty string before the first
    /// paint.
    pub fn screen(&self) -> String {
        self.canvas().map(Canvas::to_text).unwrap_or_default()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.consumer.rasterizer().last()
    }

    pub fn paints(&self) -> usize {
        self.consumer.rasterizer().paints()
    }

    /// A copy of the current action list.
    pub fn actions(&self) -> Result<ActionList> {
        Ok(self.shared.actions()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::error::Error;

    #[test]
    fn feed_paints() {
        let mut pilot = Pilot::new(10, 1);
        assert_eq!(pilot.paints(), 0);
        pilot.feed("hello").unwrap();
        assert_eq!(pilot.screen(), "hello");
        assert_eq!(pilot.paints(), 1);
    }

    #[test]
    fn resize_repaints_at_new_size() {
        let mut pilot = Pilot::new(10, 1);
        pilot.feed("x").unwrap();
        pilot.resize(4, 2).unwrap();
        let canvas = pilot.canvas().unwrap();
        assert_eq!((canvas.width, canvas.height), (4, 2));
    }

    #[test]
    fn click_hits_and_misses() {
        let mut pilot = Pilot::new(10, 1);
        pilot.feed("^ca{a}AB^ca{b}C").unwrap();
        assert_eq!(pilot.click(1, 0).unwrap().map(|c| c.name), Some("a".to_owned()));
        assert_eq!(pilot.click(2, 0).unwrap().map(|c| c.name), Some("b".to_owned()));
        assert_eq!(pilot.click(8, 0).unwrap(), None);
    }

    #[test]
    fn background_reaches_the_canvas() {
        let mut pilot = Pilot::new(4, 1);
        pilot.feed("^bg{#ff0000}AB").unwrap();
        let cell = pilot.canvas().unwrap().get_cell(0, 0).unwrap();
        assert_eq!(cell.style.bg, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn quit_key_stops_running() {
        let mut pilot = Pilot::new(10, 1);
        pilot.press_key(Key::Char('q')).unwrap();
        assert!(!pilot.is_running());
    }

    #[test]
    fn errors_surface_unless_keep_going() {
        let mut strict = Pilot::new(10, 1);
        assert!(matches!(strict.feed("{"), Err(Error::UnbalancedBrace(_))));

        let mut lenient = Pilot::new(10, 1).keep_going();
        lenient.feed("ok").unwrap();
        lenient.feed("{").unwrap();
        assert_eq!(lenient.screen(), "ok");
    }
}
