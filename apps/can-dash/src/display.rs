use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::time::Duration;
use vehicle_frames::{DisplaySink, RenderRequest, Slot};

const LEFT_MARGIN: u16 = 1;

/// Full-screen terminal owned for the lifetime of the value.
///
/// Acquiring switches to the alternate screen in raw mode; dropping always restores the
/// terminal, whichever way the caller exits.
pub struct TerminalDisplay {
    out: Stdout,
    height: u16,
    // last text per slot, redrawn after a resize moves the bottom-anchored rows
    shown: HashMap<Slot, String>,
}

impl TerminalDisplay {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        // From here on Drop restores the terminal
        let mut display = Self {
            out,
            height: 0,
            shown: HashMap::new(),
        };
        display.height = terminal::size()?.1;
        Ok(display)
    }

    /// Drain pending terminal events without blocking. True once the operator asked to
    /// leave (`q`, Esc or Ctrl-C; raw mode turns the latter into a key press).
    pub fn quit_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => return Ok(true),
                Event::Resize(_, height) => self.redraw(height)?,
                _ => {}
            }
        }
        Ok(false)
    }

    fn redraw(&mut self, height: u16) -> io::Result<()> {
        self.height = height;
        queue!(self.out, Clear(ClearType::All))?;
        for slot in Slot::ALL {
            if let Some(text) = self.shown.get(&slot) {
                queue!(
                    self.out,
                    MoveTo(LEFT_MARGIN, slot.row(height)),
                    Print(text)
                )?;
            }
        }
        self.out.flush()
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl DisplaySink for TerminalDisplay {
    fn render(&mut self, request: &RenderRequest) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(LEFT_MARGIN, request.slot.row(self.height)),
            Clear(ClearType::UntilNewLine),
            Print(&request.text)
        )?;
        self.out.flush()?;
        self.shown.insert(request.slot, request.text.clone());
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut k = key(KeyCode::Char('q'), KeyModifiers::NONE);
        k.kind = KeyEventKind::Release;
        assert!(!is_quit(&k));
    }
}
