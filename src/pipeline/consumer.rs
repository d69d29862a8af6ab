//! The consumer: the single role that owns layout, painting and the window
//! geometry.
//!
//! It pulls messages off the queue in order. Rebuilding (on `OpsReady` or
//! `Resize`) holds the token lock and then the action lock; painting and
//! hit testing hold only the action lock. Every rebuild posts a `Repaint`
//! back onto the queue.

use std::fmt;
use std::io::Write;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::error::{ErrorPolicy, Result};
use crate::eval::Evaluator;
use crate::event::{ButtonPress, Message, Modifiers};
use crate::geometry::Size;
use crate::layout::{LayoutSolver, TaffySolver};
use crate::markup::Token;
use crate::paint::{ActionList, FileImages, ImageLoader};
use crate::render::Rasterizer;
use crate::shape::{CellShaper, TextShaper};

use super::shared::Shared;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the consumer is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    /// Waiting on the queue.
    Idle,
    /// Handling the named message.
    Busy(&'static str),
}

/// Whether to keep consuming after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A click that landed on a clickable area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub name: String,
    pub button: u8,
    pub modifiers: Modifiers,
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.button)?;
        if !self.modifiers.is_empty() {
            write!(f, " {}", self.modifiers)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Consumer
// ---------------------------------------------------------------------------

/// Consumes pipeline messages, painting through `R`.
pub struct Consumer<R> {
    shared: Shared,
    queue: UnboundedSender<Message>,
    viewport: Size,
    shaper: Box<dyn TextShaper>,
    images: Box<dyn ImageLoader>,
    solver: Box<dyn LayoutSolver>,
    rasterizer: R,
    policy: ErrorPolicy,
    one_shot: bool,
    clicks: Option<Box<dyn Write>>,
    last_good: Option<Vec<Token>>,
    state: ConsumerState,
}

impl<R: Rasterizer> Consumer<R> {
    /// Create a consumer over `shared`, posting its own repaints on `queue`.
    ///
    /// Text is measured in cells, images are decoded from disk and layout is
    /// solved with taffy unless replaced with the `with_*` methods.
    pub fn new(
        shared: Shared,
        queue: UnboundedSender<Message>,
        viewport: Size,
        rasterizer: R,
    ) -> Self {
        Self {
            shared,
            queue,
            viewport,
            shaper: Box::new(CellShaper),
            images: Box::new(FileImages),
            solver: Box::new(TaffySolver::new()),
            rasterizer,
            policy: ErrorPolicy::default(),
            one_shot: false,
            clicks: None,
            last_good: None,
            state: ConsumerState::Idle,
        }
    }

    pub fn with_shaper(mut self, shaper: impl TextShaper + 'static) -> Self {
        self.shaper = Box::new(shaper);
        self
    }

    pub fn with_images(mut self, images: impl ImageLoader + 'static) -> Self {
        self.images = Box::new(images);
        self
    }

    pub fn with_solver(mut self, solver: impl LayoutSolver + 'static) -> Self {
        self.solver = Box::new(solver);
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Paint once and stop when input closes.
    pub fn one_shot(mut self, one_shot: bool) -> Self {
        self.one_shot = one_shot;
        self
    }

    /// Also write click reports, one per line, to `sink`.
    pub fn with_click_sink(mut self, sink: impl Write + 'static) -> Self {
        self.clicks = Some(Box::new(sink));
        self
    }

    pub fn state(&self) -> ConsumerState {
        self.state
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    pub fn into_rasterizer(self) -> R {
        self.rasterizer
    }

    /// Consume `queue` until a message asks to stop.
    ///
    /// The consumer holds a sender of its own, so an idle queue blocks
    /// instead of ending the run. Blocks the calling thread; must not be called from inside an async
    /// runtime.
    pub fn run(&mut self, queue: &mut UnboundedReceiver<Message>) -> Result<()> {
        while let Some(message) = queue.blocking_recv() {
            if self.handle(message)? == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Handle one message.
    ///
    /// # Errors
    ///
    /// A posted [`Message::Abort`] comes back as its error. Evaluation errors
    /// are returned unless the policy skips bad lines.
    pub fn handle(&mut self, message: Message) -> Result<Flow> {
        self.state = ConsumerState::Busy(message.name());
        log::trace!("handling {}", message.name());
        let flow = self.dispatch(message);
        self.state = ConsumerState::Idle;
        flow
    }

    fn dispatch(&mut self, message: Message) -> Result<Flow> {
        match message {
            Message::OpsReady => self.rebuild()?,
            Message::Resize(viewport) => {
                log::debug!("viewport {}x{}", viewport.width, viewport.height);
                self.viewport = viewport;
                self.rebuild()?;
            }
            Message::Repaint => self.repaint()?,
            Message::ButtonPress(press) => {
                if let Some(click) = self.click(press)? {
                    self.report(&click)?;
                }
            }
            Message::KeyPress(key) if key.is_quit() => {
                log::info!("quit requested");
                return Ok(Flow::Stop);
            }
            Message::KeyPress(key) => log::debug!("ignoring key {key:?}"),
            Message::InputClosed if self.one_shot => {
                self.repaint()?;
                return Ok(Flow::Stop);
            }
            Message::InputClosed => log::info!("input closed, keeping the last line"),
            Message::Abort(err) => return Err(err),
            Message::Exit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    // -----------------------------------------------------------------------
    // Rebuild
    // -----------------------------------------------------------------------

    /// Evaluate the token buffer, solve it and replace the action list.
    fn rebuild(&mut self) -> Result<()> {
        let evaluator = Evaluator::new(self.shaper.as_ref(), self.images.as_ref());
        let mut tokens = self.shared.tokens()?;
        let mut actions = self.shared.actions()?;

        let tree = match evaluator.evaluate(&tokens, self.viewport) {
            Ok(tree) => {
                if self.policy == ErrorPolicy::SkipLine {
                    self.last_good = Some(tokens.clone());
                }
                tree
            }
            Err(err) if self.policy == ErrorPolicy::SkipLine && err.is_line_error() => {
                log::warn!("line skipped: {err}");
                let good = self.last_good.clone().unwrap_or_default();
                let tree = evaluator.evaluate(&good, self.viewport)?;
                *tokens = good;
                tree
            }
            Err(err) => return Err(err),
        };

        let frames = self.solver.solve(&tree, self.viewport)?;
        *actions = ActionList::flatten(&tree, &frames);
        log::debug!("rebuilt {} nodes into {} actions", tree.len(), actions.len());
        drop(actions);
        drop(tokens);

        let _ = self.queue.send(Message::Repaint);
        Ok(())
    }

    fn repaint(&mut self) -> Result<()> {
        let actions = self.shared.actions()?;
        self.rasterizer.paint(&actions, self.viewport)
    }

    // -----------------------------------------------------------------------
    // Clicks
    // -----------------------------------------------------------------------

    /// Hit-test a button press against the current action list.
    pub fn click(&self, press: ButtonPress) -> Result<Option<Click>> {
        let actions = self.shared.actions()?;
        let click = actions.hit_test(press.x, press.y).and_then(|action| {
            action.clickable.as_ref().map(|name| Click {
                name: name.clone(),
                button: press.button,
                modifiers: press.modifiers,
            })
        });
        if click.is_none() {
            log::trace!("press at ({}, {}) hit nothing", press.x, press.y);
        }
        Ok(click)
    }

    fn report(&mut self, click: &Click) -> Result<()> {
        log::info!("click: {click}");
        if let Some(sink) = self.clicks.as_mut() {
            writeln!(sink, "{click}")?;
            sink.flush()?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
