//! Snapshot rendering through the diff renderer

use tambola::core::{GameSession, SessionOptions};
use tambola::term::{FrameBuffer, GameView, HudStatus, TerminalRenderer, Viewport};

#[test]
fn unchanged_frames_write_nothing() {
    let session = GameSession::with_seed(9, SessionOptions::default());
    let view = GameView::new();
    let viewport = Viewport::new(100, 40);
    let hud = HudStatus::default();

    let mut renderer = TerminalRenderer::with_writer(Vec::new());
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    view.render_into(&session.snapshot(), &hud, viewport, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let full = renderer.writer().len();
    assert!(full > 0);

    view.render_into(&session.snapshot(), &hud, viewport, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    assert_eq!(renderer.writer().len(), full);
}

#[test]
fn a_draw_only_sends_the_changes() {
    let mut session = GameSession::with_seed(9, SessionOptions::default());
    let view = GameView::new();
    let viewport = Viewport::new(100, 40);
    let hud = HudStatus::default();

    let mut renderer = TerminalRenderer::with_writer(Vec::new());
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    view.render_into(&session.snapshot(), &hud, viewport, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let full = renderer.writer().len();

    let number = session.draw().unwrap().number;
    let snap = session.snapshot();
    view.render_into(&snap, &hud, viewport, &mut fb);
    let text = fb.to_text();
    assert!(text.contains(&number.to_string()));

    renderer.draw_swap(&mut fb).unwrap();
    let diff = renderer.writer().len() - full;
    assert!(diff > 0);
    assert!(diff < full);
}

#[test]
fn resize_forces_a_full_redraw() {
    let session = GameSession::with_seed(9, SessionOptions::default());
    let view = GameView::new();
    let hud = HudStatus::default();
    let mut renderer = TerminalRenderer::with_writer(Vec::new());
    let mut fb = FrameBuffer::new(1, 1);

    view.render_into(&session.snapshot(), &hud, Viewport::new(80, 30), &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let first = renderer.writer().len();

    view.render_into(&session.snapshot(), &hud, Viewport::new(100, 40), &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let second = renderer.writer().len() - first;
    assert!(second >= first);
}
