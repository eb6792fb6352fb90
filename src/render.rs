use std::{
    io::{self, Write},
    mem,
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{debug, warn};

use crate::model::{Coord, Generation};

/// Clears the terminal and moves the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// What a renderer draws for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Border,
    Alive,
    Dead,
}

/// Characters used for each [`Symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub border: char,
    pub alive: char,
    pub dead: char,
}

impl Glyphs {
    pub const fn glyph(&self, symbol: Symbol) -> char {
        match symbol {
            Symbol::Border => self.border,
            Symbol::Alive => self.alive,
            Symbol::Dead => self.dead,
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            border: '#',
            alive: 'X',
            dead: '-',
        }
    }
}

/// Receives each generation as it is visited by [`Generation::tick`].
///
/// Only `cell` is required. The simulation calls `begin_generation`/`end_generation` around
/// every tick and consults `should_stop` between ticks.
pub trait Sink {
    fn begin_generation(&mut self, _index: usize) {}

    fn cell(&mut self, coord: Coord, symbol: Symbol);

    /// Called after the last column of every row.
    fn end_row(&mut self) {}

    fn end_generation(&mut self, _index: usize) {}

    fn should_stop(&self) -> bool {
        false
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn cell(&mut self, _coord: Coord, _symbol: Symbol) {}
}

/// Collects every rendered generation as a string.
#[derive(Debug, Default)]
pub struct FrameSink {
    glyphs: Glyphs,
    current: String,
    frames: Vec<String>,
}

impl FrameSink {
    pub fn new(glyphs: Glyphs) -> Self {
        Self {
            glyphs,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Returns the completed frames, plus any partially rendered one.
    pub fn into_frames(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.frames.push(mem::take(&mut self.current));
        }
        self.frames
    }
}

impl Sink for FrameSink {
    fn begin_generation(&mut self, _index: usize) {
        self.current.clear();
    }

    fn cell(&mut self, _coord: Coord, symbol: Symbol) {
        self.current.push(self.glyphs.glyph(symbol));
    }

    fn end_row(&mut self) {
        self.current.push('\n');
    }

    fn end_generation(&mut self, _index: usize) {
        self.frames.push(mem::take(&mut self.current));
    }
}

/// Renders a whole generation, one line per row.
pub fn render_to_string(generation: &Generation, glyphs: &Glyphs) -> String {
    let size = generation.size();
    let mut result = String::with_capacity(size.height * (size.width + 1));

    for (coord, cell) in generation.iter() {
        result.push(glyphs.glyph(cell.symbol()));
        if coord.col + 1 == size.width {
            result.push('\n');
        }
    }

    result
}

/// Writes every received message to `out` until all senders are dropped.
pub fn output<W: Write>(rx: Receiver<String>, mut out: W) -> io::Result<()> {
    for message in rx {
        out.write_all(message.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

/// Draws generations on a terminal through a dedicated output thread.
///
/// Rows are sent to the thread as soon as they are complete, so a generation appears
/// progressively while the next one is computed.
pub struct ConsoleSink {
    glyphs: Glyphs,
    delay: Duration,
    clear: bool,
    row: String,
    tx: Option<Sender<String>>,
    handle: Option<JoinHandle<io::Result<()>>>,
}

impl ConsoleSink {
    /// Spawns the output thread writing to stdout.
    pub fn spawn(glyphs: Glyphs, delay: Duration, clear: bool) -> Self {
        Self::with_writer(io::stdout(), glyphs, delay, clear)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        glyphs: Glyphs,
        delay: Duration,
        clear: bool,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<String>();
        let handle = thread::spawn(move || output(rx, writer));
        Self {
            glyphs,
            delay,
            clear,
            row: String::new(),
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Closes the channel and waits until everything sent so far has been written.
    pub fn finish(mut self) -> io::Result<()> {
        self.shutdown()
    }

    fn send(&mut self, message: String) {
        if let Some(tx) = &self.tx {
            if tx.send(message).is_err() {
                warn!("output thread stopped; dropping further output");
                self.tx = None;
            }
        }
    }

    fn shutdown(&mut self) -> io::Result<()> {
        if !self.row.is_empty() {
            let row = mem::take(&mut self.row);
            self.send(row);
        }
        self.tx = None;
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("output thread panicked"))),
            None => Ok(()),
        }
    }
}

impl Sink for ConsoleSink {
    fn begin_generation(&mut self, index: usize) {
        debug!(generation = index, "rendering");
        if self.clear {
            self.send(CLEAR_SCREEN.to_string());
        }
    }

    fn cell(&mut self, _coord: Coord, symbol: Symbol) {
        self.row.push(self.glyphs.glyph(symbol));
    }

    fn end_row(&mut self) {
        self.row.push('\n');
        let row = mem::take(&mut self.row);
        self.send(row);
    }

    fn end_generation(&mut self, _index: usize) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn should_stop(&self) -> bool {
        self.tx.is_none()
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!(%err, "failed to flush console output");
        }
    }
}
