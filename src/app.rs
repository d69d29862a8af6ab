//! App struct: wires configuration, pipeline and rasterizer together.
//!
//! [`App::run`] picks one of two modes. In terminal mode the bar takes over
//! the terminal, reads markup from stdin and terminal events from crossterm.
//! In headless mode (an output file is configured) there is no event
//! producer: every repaint rewrites the file and end of input ends the run.
//! A `.png` output gets a colored image, anything else a text dump.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::{AppConfig, HEADLESS_WIDTH};
use crate::error::Result;
use crate::event::{CrosstermEvents, Message};
use crate::geometry::Size;
use crate::pipeline::{Consumer, Pipeline};
use crate::render::driver::Driver;
use crate::render::{
    OutputFormat, PngRasterizer, Rasterizer, TerminalRasterizer, TextRasterizer,
};

/// The status bar application.
#[derive(Debug, Clone, Default)]
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run until quit, end of input in headless mode, or a fatal error.
    pub fn run(&self) -> Result<()> {
        let stdin = BufReader::new(std::io::stdin());
        match &self.config.output {
            Some(path) => {
                let paints = self.write_output(stdin, path)?;
                log::info!("wrote {} ({} paints)", path.display(), paints);
                Ok(())
            }
            None => self.run_terminal(stdin),
        }
    }

    /// Run headless into `path`, as a PNG image for `.png` paths and as text
    /// otherwise. Returns the number of paints.
    pub fn write_output<I>(&self, input: I, path: &Path) -> Result<usize>
    where
        I: BufRead + Send + 'static,
    {
        Ok(match OutputFormat::from_path(path) {
            OutputFormat::Png => self.run_headless(input, PngRasterizer::new(path))?.paints(),
            OutputFormat::Text => self.run_headless(input, TextRasterizer::new(path))?.paints(),
        })
    }

    /// Run without a terminal, painting through `rasterizer`, until `input`
    /// ends. Returns the rasterizer.
    pub fn run_headless<I, R>(&self, input: I, rasterizer: R) -> Result<R>
    where
        I: BufRead + Send + 'static,
        R: Rasterizer,
    {
        let width = self.config.width.unwrap_or(HEADLESS_WIDTH);
        let viewport = Size::new(f32::from(width), f32::from(self.config.height));

        let mut pipeline = Pipeline::new();
        let consumer = pipeline.consumer(viewport, rasterizer).one_shot(true);
        let mut consumer = self.wire(consumer)?;
        pipeline.spawn_lines(input, self.config.policy)?;
        pipeline.run(&mut consumer)?;
        Ok(consumer.into_rasterizer())
    }

    fn run_terminal<I>(&self, input: I) -> Result<()>
    where
        I: BufRead + Send + 'static,
    {
        let width = match self.config.width {
            Some(width) => width,
            None => Driver::terminal_size()?.0,
        };
        let viewport = Size::new(f32::from(width), f32::from(self.config.height));
        log::info!("bar {}x{} in terminal", width, self.config.height);

        let mut pipeline = Pipeline::new();
        let consumer = pipeline.consumer(viewport, TerminalRasterizer::new()?);
        let mut consumer = self.wire(consumer)?;
        pipeline.spawn_lines(input, self.config.policy)?;
        pipeline.spawn_events(Box::new(CrosstermEvents::new(Some(self.config.height))))?;
        let _ = pipeline.sender().send(Message::Repaint);

        let outcome = pipeline.run(&mut consumer);
        consumer.rasterizer_mut().restore()?;
        outcome
    }

    /// Apply the error policy and click sink to a consumer.
    fn wire<R: Rasterizer>(&self, consumer: Consumer<R>) -> Result<Consumer<R>> {
        let consumer = consumer.with_policy(self.config.policy);
        Ok(match self.click_sink()? {
            Some(file) => consumer.with_click_sink(file),
            None => consumer,
        })
    }

    fn click_sink(&self) -> Result<Option<File>> {
        let Some(path) = &self.config.clicks else {
            return Ok(None);
        };
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::debug!("click reports go to {}", path.display());
        Ok(Some(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorPolicy};
    use crate::render::rasterizer::{CELL_HEIGHT, CELL_WIDTH};
    use std::io::Cursor;

    #[test]
    fn headless_writes_final_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.txt");
        let app = App::new(AppConfig::new().with_width(12).with_output(&path));

        let raster = app
            .run_headless(Cursor::new("one\n^fg{red}two\n"), TextRasterizer::new(&path))
            .unwrap();
        assert!(raster.paints() >= 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two\n");
    }

    #[test]
    fn headless_error_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.txt");
        let app = App::new(AppConfig::new().with_output(&path));
        let result = app.run_headless(Cursor::new("^grow{x}A\n"), TextRasterizer::new(&path));
        assert!(matches!(result, Err(Error::InvalidNumber { .. })));
    }

    #[test]
    fn headless_keep_going_skips_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.txt");
        let config = AppConfig::new()
            .with_width(10)
            .with_output(&path)
            .with_policy(ErrorPolicy::SkipLine);
        App::new(config)
            .run_headless(Cursor::new("{oops\nfine\n"), TextRasterizer::new(&path))
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fine\n");
    }

    #[test]
    fn png_output_keeps_background_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.png");
        let app = App::new(AppConfig::new().with_width(4).with_output(&path));
        let paints = app.write_output(Cursor::new("^bg{#ff0000}AB\n"), &path).unwrap();
        assert!(paints >= 1);

        let png = image::open(&path).unwrap().to_rgba8();
        assert_eq!(png.dimensions(), (4 * CELL_WIDTH, CELL_HEIGHT));
        assert_eq!(png.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn other_extensions_get_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.out");
        let app = App::new(AppConfig::new().with_width(4).with_output(&path));
        app.write_output(Cursor::new("AB\n"), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "AB\n");
    }

    #[test]
    fn click_file_is_created_on_start() {
        let dir = tempfile::tempdir().unwrap();
        let clicks = dir.path().join("clicks.log");
        let out = dir.path().join("bar.txt");
        let app = App::new(AppConfig::new().with_output(&out).with_clicks(&clicks));
        app.run_headless(Cursor::new("x\n"), TextRasterizer::new(&out)).unwrap();
        assert!(clicks.exists());
    }
}
