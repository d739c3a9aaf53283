//! Render collaborators: the port the runners draw through, plus a terminal
//! front end and two headless implementations.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::array_model::SortKey;
use crate::config::MAX_VALUE;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Elements currently being compared or shifted.
    Comparing,
    /// Element written to its (intermediate or final) place.
    Placement,
}

/// Where frames and status banners go. Runners never draw implicitly: every
/// call here is an explicit step of the pacing contract.
pub trait RenderPort {
    fn draw_frame<T: SortKey>(&mut self, values: &[T], highlight: &[usize], kind: HighlightKind) -> Result<()>;

    /// Replaces the previous banner.
    fn draw_overlay(&mut self, status: &str, complexity: &str) -> Result<()>;

    fn clear_overlay(&mut self) -> Result<()>;

    /// Pushes anything buffered out before the runner sleeps.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: RenderPort + ?Sized> RenderPort for &mut R {
    fn draw_frame<T: SortKey>(&mut self, values: &[T], highlight: &[usize], kind: HighlightKind) -> Result<()> {
        (**self).draw_frame(values, highlight, kind)
    }

    fn draw_overlay(&mut self, status: &str, complexity: &str) -> Result<()> {
        (**self).draw_overlay(status, complexity)
    }

    fn clear_overlay(&mut self) -> Result<()> {
        (**self).clear_overlay()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderPort for NullRenderer {
    fn draw_frame<T: SortKey>(&mut self, _: &[T], _: &[usize], _: HighlightKind) -> Result<()> {
        Ok(())
    }

    fn draw_overlay(&mut self, _: &str, _: &str) -> Result<()> {
        Ok(())
    }

    fn clear_overlay(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Frame {
        keys: Vec<u32>,
        highlight: Vec<usize>,
        kind: HighlightKind,
    },
    Overlay {
        status: String,
        complexity: String,
    },
    ClearOverlay,
    Flush,
}

/// Keeps every event in order. Used by tests and headless verification.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> impl Iterator<Item = (&[u32], &[usize], HighlightKind)> {
        self.events.iter().filter_map(|e| match e {
            RenderEvent::Frame { keys, highlight, kind } => Some((keys.as_slice(), highlight.as_slice(), *kind)),
            _ => None,
        })
    }

    pub fn overlays(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            RenderEvent::Overlay { status, .. } => Some(status.as_str()),
            _ => None,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames().count()
    }
}

impl RenderPort for RecordingRenderer {
    fn draw_frame<T: SortKey>(&mut self, values: &[T], highlight: &[usize], kind: HighlightKind) -> Result<()> {
        self.events.push(RenderEvent::Frame {
            keys: values.iter().map(SortKey::key).collect(),
            highlight: highlight.to_vec(),
            kind,
        });
        Ok(())
    }

    fn draw_overlay(&mut self, status: &str, complexity: &str) -> Result<()> {
        self.events.push(RenderEvent::Overlay {
            status: status.to_owned(),
            complexity: complexity.to_owned(),
        });
        Ok(())
    }

    fn clear_overlay(&mut self) -> Result<()> {
        self.events.push(RenderEvent::ClearOverlay);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.events.push(RenderEvent::Flush);
        Ok(())
    }
}

const BANNER_LINES: usize = 2;

fn line(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Bar chart drawn with crossterm commands queued on `out`. The banner
/// occupies the top two lines and is repainted on every frame until
/// cleared.
pub struct TerminalRenderer<W: Write> {
    out: W,
    rows: usize,
    banner: Option<(String, String)>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(rows: usize) -> Self {
        TerminalRenderer::new(io::stdout(), rows)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, rows: usize) -> Self {
        TerminalRenderer {
            out,
            rows: rows.max(1),
            banner: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar_height(&self, key: u32, scale: u32) -> usize {
        if key == 0 {
            return 0;
        }
        let h = (key as u64 * self.rows as u64).div_ceil(scale as u64);
        h.min(self.rows as u64) as usize
    }

    /// Overwrites both banner lines in place.
    fn queue_banner(&mut self) -> io::Result<()> {
        let (status, complexity) = match &self.banner {
            Some((status, complexity)) => (status.as_str(), complexity.as_str()),
            None => ("", ""),
        };
        self.out
            .queue(MoveTo(0, 0))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(SetAttribute(Attribute::Bold))?
            .queue(Print(status))?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(MoveTo(0, 1))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(SetAttribute(Attribute::Dim))?
            .queue(Print(complexity))?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl<W: Write> RenderPort for TerminalRenderer<W> {
    fn draw_frame<T: SortKey>(&mut self, values: &[T], highlight: &[usize], kind: HighlightKind) -> Result<()> {
        let scale = values.iter().map(SortKey::key).max().unwrap_or(0).max(MAX_VALUE);
        let accent = match kind {
            HighlightKind::Comparing => Color::DarkYellow,
            HighlightKind::Placement => Color::Green,
        };

        self.out.queue(Clear(ClearType::All))?;
        self.queue_banner()?;
        for row in (1..=self.rows).rev() {
            self.out.queue(MoveTo(0, line(BANNER_LINES + self.rows - row)))?;
            for (i, v) in values.iter().enumerate() {
                if self.bar_height(v.key(), scale) >= row {
                    let color = if highlight.contains(&i) { accent } else { Color::Blue };
                    self.out
                        .queue(SetForegroundColor(color))?
                        .queue(Print("███"))?
                        .queue(ResetColor)?
                        .queue(Print(' '))?;
                } else {
                    self.out.queue(Print("    "))?;
                }
            }
        }
        self.out.queue(MoveTo(0, line(BANNER_LINES + self.rows)))?;
        for v in values {
            self.out.queue(Print(format!("{:<4}", v.key())))?;
        }
        self.out.queue(MoveTo(0, line(BANNER_LINES + self.rows + 1)))?;
        Ok(())
    }

    fn draw_overlay(&mut self, status: &str, complexity: &str) -> Result<()> {
        self.banner = Some((status.to_owned(), complexity.to_owned()));
        // repaint just the banner, the bars stay until the next frame
        self.queue_banner()?;
        Ok(())
    }

    fn clear_overlay(&mut self) -> Result<()> {
        self.banner = None;
        self.queue_banner()?;
        self.out.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
