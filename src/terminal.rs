// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::{Cell, Frame};

/// Style last sent to the terminal, so runs of equal cells skip escapes.
#[derive(Clone, Copy, Default)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

pub struct Terminal {
    stdout: Stdout,
    shown_size: Option<(u16, u16)>,
    order: Vec<usize>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(event::EnableMouseCapture)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore(&mut out);
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            shown_size: None,
            order: Vec::new(),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Writes the changed cells of `frame`, or all of them after a resize.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size = (frame.width, frame.height);
        let full = self.shown_size != Some(size) || frame.is_dirty_all();
        if self.shown_size != Some(size) {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            self.shown_size = Some(size);
        }

        self.order.clear();
        if full {
            self.order
                .extend(0..frame.width as usize * frame.height as usize);
        } else {
            self.order.extend_from_slice(frame.dirty_indices());
            self.order.sort_unstable();
        }

        let width = frame.width.max(1) as usize;
        let mut pen: Option<Pen> = None;
        let mut next_pos: Option<usize> = None;
        for &idx in &self.order {
            if next_pos != Some(idx) || idx % width == 0 {
                let (x, y) = ((idx % width) as u16, (idx / width) as u16);
                self.stdout.queue(cursor::MoveTo(x, y))?;
            }
            let cell = frame.cell_at_index(idx);
            pen = Some(apply_pen(&mut self.stdout, pen, &cell)?);
            self.stdout.queue(Print(cell.ch))?;
            next_pos = Some(idx + 1);
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

fn apply_pen(out: &mut Stdout, pen: Option<Pen>, cell: &Cell) -> Result<Pen> {
    let first = pen.is_none();
    let pen = pen.unwrap_or_default();
    if first || cell.fg != pen.fg {
        out.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
    }
    if first || cell.bg != pen.bg {
        out.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
    }
    if first || cell.bold != pen.bold {
        out.queue(SetAttribute(if cell.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        }))?;
    }
    Ok(Pen {
        fg: cell.fg,
        bg: cell.bg,
        bold: cell.bold,
    })
}

fn restore(out: &mut Stdout) {
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(event::DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.stdout);
    }
}

pub fn restore_terminal_best_effort() {
    restore(&mut stdout());
}
