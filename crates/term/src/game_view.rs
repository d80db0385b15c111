//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom:
//!
//! - header: title, mark mode, auto-call countdown
//! - current number, its announcement, and the recent calls
//! - the 1-90 board with the band counts and stats beside it
//! - the player's tickets, wrapped to the viewport width
//! - a one-line message (last win, errors)
//!
//! Ticket cells are three columns wide. The first column carries the mark:
//! `*` for marked, blank otherwise, so the text alone shows the state.

use crate::announce::announcement;
use crate::core::{SessionSnapshot, TicketSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{
    band_for_number, CellPos, MarkMode, PatternKind, MAX_NUMBER, TICKET_COLS, TICKET_ROWS,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Interactive state that lives outside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudStatus<'a> {
    /// Selected ticket and the cursor cell on it.
    pub cursor: Option<(usize, CellPos)>,
    /// Milliseconds until the next automatic call; `None` when auto-call is off.
    pub auto_call_ms: Option<u32>,
    pub message: Option<&'a str>,
}

const BOARD_COLS: u16 = 10;
const BOARD_ROWS: u16 = 9;
const NUM_W: u16 = 3;
const BOARD_BOX_W: u16 = BOARD_COLS * NUM_W + 2;
const BOARD_BOX_H: u16 = BOARD_ROWS + 2;
const TICKET_BOX_W: u16 = TICKET_COLS as u16 * NUM_W + 2;
const TICKET_BOX_H: u16 = TICKET_ROWS as u16 + 2;
const TICKET_GAP: u16 = 2;

const BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(25, 25, 35);

fn text() -> CellStyle {
    CellStyle::new(Rgb::new(210, 210, 210), BG)
}

fn label() -> CellStyle {
    CellStyle::new(Rgb::new(235, 235, 235), BG).bold()
}

fn muted() -> CellStyle {
    CellStyle::new(Rgb::new(110, 110, 120), BG).dim()
}

fn border() -> CellStyle {
    CellStyle::new(Rgb::new(170, 170, 180), BG)
}

fn highlight() -> CellStyle {
    CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(245, 200, 70)).bold()
}

/// Terminal view of one Tambola session.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        hud: &HudStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let x = 1;
        self.draw_header(fb, snap, hud, x, 0);
        self.draw_current(fb, snap, x, 2);

        let board_y = 6;
        self.draw_board(fb, snap, x, board_y);
        self.draw_side_panel(fb, snap, x + BOARD_BOX_W + 2, board_y);

        self.draw_tickets(fb, snap, hud, viewport, x, board_y + BOARD_BOX_H + 1);

        if let Some(msg) = hud.message {
            fb.put_str(x, viewport.height.saturating_sub(1), msg, label());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, hud: &HudStatus<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_header(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        hud: &HudStatus<'_>,
        x: u16,
        y: u16,
    ) {
        let mut cx = fb.put_str(x, y, "TAMBOLA", label());
        cx = fb.put_str(cx + 2, y, mode_label(snap.mark_mode), text());

        cx = fb.put_str(cx + 2, y, "AUTO ", muted());
        match hud.auto_call_ms {
            Some(ms) => {
                let secs = ms.div_ceil(1000);
                cx = fb.put_u32(cx, y, secs, text());
                cx = fb.put_str(cx, y, "s", text());
            }
            None => cx = fb.put_str(cx, y, "off", muted()),
        }

        if !snap.is_active {
            fb.put_str(cx + 2, y, "ALL 90 CALLED", highlight());
        }
    }

    fn draw_current(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        let cx = fb.put_str(x, y, "NOW ", label());
        match snap.current {
            Some(n) => {
                fb.put_number2(cx, y, n, highlight());
                fb.put_str(cx + 3, y, &announcement(n), text());
            }
            None => {
                fb.put_str(cx, y, "--", muted());
                fb.put_str(cx + 3, y, "Press space to call the first number", muted());
            }
        }

        let mut cx = fb.put_str(x, y + 1, "RECENT", label());
        for &n in snap.recent.iter() {
            fb.put_number2(cx + 1, y + 1, n, text());
            cx += NUM_W;
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        fb.draw_box(x, y, BOARD_BOX_W, BOARD_BOX_H, border());

        let called = CellStyle::new(Rgb::new(120, 230, 140), PANEL_BG).bold();
        let uncalled = CellStyle::new(Rgb::new(90, 90, 100), PANEL_BG).dim();

        for n in 1..=MAX_NUMBER {
            let idx = (n - 1) as u16;
            let px = x + 1 + (idx % BOARD_COLS) * NUM_W;
            let py = y + 1 + idx / BOARD_COLS;
            let style = if snap.current == Some(n) {
                highlight()
            } else if snap.is_called(n) {
                called
            } else {
                uncalled
            };
            fb.put_char(px, py, ' ', style);
            fb.put_number2(px + 1, py, n, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        if x >= fb.width() {
            return;
        }

        let mut y = y;
        fb.put_str(x, y, "BANDS", label());
        y += 1;
        let current_band = snap.current.and_then(band_for_number);
        for (idx, band) in snap.bands.iter().enumerate() {
            let style = if current_band == Some(idx) {
                highlight()
            } else {
                muted()
            };
            let cx = fb.put_str(x, y, &band.label(), style);
            let cx = cx.max(x + 6);
            fb.put_u32(cx, y, band.numbers.len() as u32, text());
            y += 1;
        }

        y += 1;
        let cx = fb.put_str(x, y, "CALLED ", label());
        let cx = fb.put_u32(cx, y, snap.stats.total_called as u32, text());
        fb.put_str(cx, y, "/90", muted());
        y += 1;

        let cx = fb.put_str(x, y, "LEFT   ", label());
        fb.put_u32(cx, y, snap.stats.remaining as u32, text());
        y += 1;

        let cx = fb.put_str(x, y, "AVG    ", label());
        let avg = format!("{:.1}s", snap.stats.average_call_ms / 1000.0);
        fb.put_str(cx, y, &avg, text());
        y += 1;

        let cx = fb.put_str(x, y, "WON    ", label());
        fb.put_u32(cx, y, snap.total_winnings().min(u32::MAX as u64) as u32, text());
    }

    fn draw_tickets(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        hud: &HudStatus<'_>,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) {
        let slot_w = TICKET_BOX_W + TICKET_GAP;
        let per_row = (viewport.width.saturating_sub(x) / slot_w).max(1) as usize;
        let slot_h = TICKET_BOX_H + 2;

        for (idx, ticket) in snap.tickets.iter().enumerate() {
            let tx = x + (idx % per_row) as u16 * slot_w;
            let ty = y + (idx / per_row) as u16 * slot_h;
            if ty >= viewport.height {
                break;
            }
            let cursor = match hud.cursor {
                Some((t, pos)) if t == idx => Some(pos),
                _ => None,
            };
            self.draw_ticket(fb, idx, ticket, cursor, tx, ty);
        }
    }

    fn draw_ticket(
        &self,
        fb: &mut FrameBuffer,
        idx: usize,
        ticket: &TicketSnapshot,
        cursor: Option<CellPos>,
        x: u16,
        y: u16,
    ) {
        let selected = cursor.is_some();
        let title = if selected { label() } else { text() };
        let mut cx = fb.put_str(x, y, "TICKET ", title);
        cx = fb.put_u32(cx, y, idx as u32 + 1, title);
        for kind in ticket.completed.iter() {
            cx = fb.put_str(cx + 1, y, pattern_code(*kind), highlight());
        }

        let box_style = if selected {
            CellStyle::new(Rgb::new(120, 170, 255), BG).bold()
        } else {
            border()
        };
        fb.draw_box(x, y + 1, TICKET_BOX_W, TICKET_BOX_H, box_style);

        let marked = CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(120, 210, 130)).bold();
        let winning = highlight();
        let blank = CellStyle::new(Rgb::new(70, 70, 80), PANEL_BG).dim();
        let plain = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);

        for (row, cells) in ticket.ticket.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let pos = CellPos::new(row, col);
                let px = x + 1 + col as u16 * NUM_W;
                let py = y + 2 + row as u16;

                let mut style = match cell {
                    None => blank,
                    Some(_) if ticket.winning[row][col].is_some() => winning,
                    Some(_) if ticket.marks.is_marked(pos) => marked,
                    Some(_) => plain,
                };
                if cursor == Some(pos) {
                    style.bg = Rgb::new(70, 100, 200);
                }

                match cell {
                    Some(n) => {
                        let mark = if ticket.marks.is_marked(pos) { '*' } else { ' ' };
                        fb.put_char(px, py, mark, style);
                        fb.put_number2(px + 1, py, *n, style);
                    }
                    None => {
                        fb.put_str(px, py, " · ", style);
                    }
                }
            }
        }
    }
}

fn mode_label(mode: MarkMode) -> &'static str {
    match mode {
        MarkMode::Assist => "[ASSIST]",
        MarkMode::Manual => "[MANUAL]",
    }
}

/// Two-letter badge shown next to a ticket title.
pub fn pattern_code(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::EarlyFive => "E5",
        PatternKind::TopLine => "TL",
        PatternKind::MiddleLine => "ML",
        PatternKind::BottomLine => "BL",
        PatternKind::FullHouse => "FH",
    }
}
