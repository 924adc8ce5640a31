use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use block_grid::core::{GameConfig, Session};
use block_grid::term::{FrameBuffer, GridView, Viewport};
use block_grid::types::GridAction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn term_grid_view_render_is_allocation_free_after_warmup() {
    let view = GridView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let mut session = Session::new(GameConfig::default()).unwrap();
    let mut snap = session.snapshot();
    let moves = [
        GridAction::CursorRight,
        GridAction::CursorDown,
        GridAction::CursorLeft,
        GridAction::CursorUp,
    ];

    // Warm-up (initial resize and clears).
    session.snapshot_into(&mut snap);
    view.render_into(&snap, Some(session.cursor()), None, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            session.apply_action(moves[i % moves.len()]);
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Some(session.cursor()), None, viewport, &mut fb);
        }
    });

    assert!(allocs == 0);
}
