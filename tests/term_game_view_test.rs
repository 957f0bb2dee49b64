use tui_blockfall::core::{GameState, Phase, Snapshot};
use tui_blockfall::term::{AnchorY, GameView, Viewport};
use tui_blockfall::types::{GameEvent, ShapeKind, BACKGROUND};

fn screen_text(fb: &tui_blockfall::term::FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = Snapshot::default();
    // A locked I block at bottom-left.
    snap.cells[19][0] = Some(ShapeKind::I);

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, ShapeKind::I.color());
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().style.bg, BACKGROUND);
}

#[test]
fn term_view_draws_falling_piece_in_shape_color() {
    let mut state = GameState::new(1);
    assert!(state.spawn_kind(ShapeKind::T));
    // A fresh T sits entirely in the hidden margin.
    assert_eq!(state.snapshot().occupied_count(), 0);
    state.handle(GameEvent::SoftDrop);
    state.handle(GameEvent::SoftDrop);
    let snap = state.snapshot();
    assert_eq!(snap.occupied_count(), 4);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let painted = fb
        .cells()
        .iter()
        .filter(|c| c.ch == '█' && c.style.fg == ShapeKind::T.color())
        .count();
    assert_eq!(painted, 8);
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = Snapshot::default();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!screen_text(&fb).contains("GAME OVER"));

    snap.phase = Phase::GameOver { wipe_row: 10 };
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = Snapshot::default();
    snap.episode_id = 4;

    let view = GameView::default();
    let narrow = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(!narrow.contains("GAME"));

    let wide = screen_text(&view.render(&snap, Viewport::new(60, 22)));
    assert!(wide.contains("GAME"));
    assert!(wide.contains("KEYS"));
    // Games are numbered from one.
    assert!(wide.contains('5'));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = Snapshot::default();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');

    let top = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = top.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
