use super::*;

use crate::surface::{RecordingSurface, SurfaceOp};

fn board_3x3() -> BoardModel {
    let mut board = BoardModel::new();
    board.apply_snapshot(&vec![vec![0u16; 3]; 3]);
    board
}

#[test]
fn steps_reveal_cells_in_order() {
    let board = board_3x3();
    let mut surface = RecordingSurface::new();
    let mut queue = AnimationQueue::new();

    queue.start([4, 1, 7]);
    assert!(queue.is_animating());

    assert!(queue.step(&board, &mut surface));
    assert!(queue.step(&board, &mut surface));
    assert!(!queue.step(&board, &mut surface));
    assert!(!queue.is_animating());
    assert_eq!(surface.painted_indices(), vec![4, 1, 7]);
}

#[test]
fn repeated_index_repaints_twice() {
    let board = board_3x3();
    let mut surface = RecordingSurface::new();
    let mut queue = AnimationQueue::new();

    queue.start([3, 3]);
    queue.step(&board, &mut surface);
    queue.step(&board, &mut surface);
    assert_eq!(surface.painted_indices(), vec![3, 3]);
}

#[test]
fn starting_a_new_queue_stops_the_old_one() {
    let board = board_3x3();
    let mut surface = RecordingSurface::new();
    let mut queue = AnimationQueue::new();

    queue.start([0, 1, 2, 3]);
    queue.step(&board, &mut surface);

    queue.start([8]);
    assert!(queue.is_animating());
    assert!(!queue.step(&board, &mut surface));
    assert_eq!(surface.painted_indices(), vec![0, 8]);
}

#[test]
fn cancel_stops_playback_immediately() {
    let board = board_3x3();
    let mut surface = RecordingSurface::new();
    let mut queue = AnimationQueue::new();

    queue.start([0, 1]);
    queue.cancel();
    assert!(!queue.is_animating());
    assert!(!queue.step(&board, &mut surface));
    assert_eq!(surface.cell_paints(), 0);
}

#[test]
fn empty_list_never_starts_animating() {
    let mut queue = AnimationQueue::new();
    queue.start([]);
    assert!(!queue.is_animating());
}

#[test]
fn out_of_board_index_is_skipped_without_painting() {
    let board = board_3x3();
    let mut surface = RecordingSurface::new();
    let mut queue = AnimationQueue::new();

    queue.start([20, 2]);
    assert!(queue.step(&board, &mut surface));
    assert!(!queue.step(&board, &mut surface));
    let paints: Vec<_> = surface
        .ops
        .iter()
        .filter(|op| matches!(op, SurfaceOp::PaintCell { .. }))
        .collect();
    assert_eq!(paints.len(), 1);
}
