use desk_wm::geometry::{clamp_to_viewport, maximized_rect};
use desk_wm::window::{PointerEvent, ZOrderAllocator};
use desk_wm::{Rect, Size, Viewport, WindowManager, WmConfig};
use proptest::prelude::*;

fn viewport() -> impl Strategy<Value = Viewport> {
    (1u32..4000, 1u32..4000, 0u32..200).prop_map(|(w, h, bar)| Viewport::new(w, h, bar))
}

fn manager(viewport: Viewport, size: Size) -> WindowManager {
    WindowManager::new(
        WmConfig::default()
            .with_viewport(viewport)
            .with_default_size(size),
    )
}

proptest! {
    /// Clamped rectangles that fit stay inside the usable area.
    #[test]
    fn clamp_keeps_fitting_rects_inside(
        (vp, w, h) in viewport().prop_flat_map(|vp| (Just(vp), 0..=vp.width, 0..=vp.usable_height())),
        x in -10_000i32..10_000,
        y in -10_000i32..10_000,
    ) {
        let r = clamp_to_viewport(Rect::new(x, y, w, h), vp);
        prop_assert!(r.x >= 0 && r.y >= 0);
        prop_assert!(r.x as i64 <= vp.width as i64 - w as i64);
        prop_assert!(r.y as i64 <= vp.usable_height() as i64 - h as i64);
        prop_assert_eq!(r.size(), Size::new(w, h));
    }

    #[test]
    fn z_values_strictly_increase(base in 0u64..1_000_000, n in 1usize..200) {
        let mut z = ZOrderAllocator::new(base);
        let mut last = base;
        for _ in 0..n {
            let next = z.next();
            prop_assert!(next > last);
            last = next;
        }
    }

    /// Two toggles restore whatever rectangle the window had before.
    #[test]
    fn maximize_round_trip_for_any_position(
        vp in viewport(),
        w in 1u32..800,
        h in 1u32..600,
        dx in -500i32..500,
        dy in -500i32..500,
        inset in 0u32..50,
    ) {
        let mut wm = WindowManager::new(
            WmConfig::default()
                .with_viewport(vp)
                .with_default_size(Size::new(w, h))
                .with_maximize_inset(inset),
        );
        wm.open("w");
        wm.handle_pointer("w", PointerEvent::down(0, 0));
        wm.handle_global_pointer(PointerEvent::moved(dx, dy));
        wm.handle_global_pointer(PointerEvent::up(dx, dy));
        let before = wm.get_record("w").map(|r| r.rect());

        wm.toggle_maximize("w");
        prop_assert_eq!(
            wm.get_record("w").map(|r| r.rect()),
            Some(maximized_rect(vp, inset))
        );
        wm.toggle_maximize("w");
        prop_assert_eq!(wm.get_record("w").map(|r| r.rect()), before);
    }

    #[test]
    fn bring_to_front_keeps_geometry(vp in viewport(), picks in prop::collection::vec(0usize..4, 1..20)) {
        let ids = ["a", "b", "c", "d"];
        let mut wm = manager(vp, Size::new(300, 200));
        for id in ids {
            wm.open(id);
        }
        let before: Vec<Rect> = ids.iter().filter_map(|id| wm.get_record(id).map(|r| r.rect())).collect();
        for pick in picks {
            wm.bring_to_front(ids[pick]);
            prop_assert_eq!(wm.focused(), Some(ids[pick]));
        }
        let after: Vec<Rect> = ids.iter().filter_map(|id| wm.get_record(id).map(|r| r.rect())).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn open_twice_is_idempotent_but_raises(vp in viewport()) {
        let mut wm = manager(vp, Size::new(800, 600));
        wm.open("notes");
        let first = wm.get_record("notes").cloned();
        wm.open("notes");
        let second = wm.get_record("notes").cloned();
        prop_assert_eq!(wm.records().count(), 1);
        let (first, second) = (first.unwrap(), second.unwrap());
        prop_assert!(second.is_visible());
        prop_assert_eq!(first.rect(), second.rect());
        prop_assert!(second.z_index() > first.z_index());
    }
}
