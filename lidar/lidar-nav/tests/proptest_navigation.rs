//! Property-based tests for navigation invariants.
//!
//! Run with: cargo test -p lidar-nav -- proptest

#![allow(clippy::unwrap_used)]

use lidar_nav::{LabelMap, NavigationController};
use lidar_types::{FrameStore, InMemoryFrameStore, LidarFrame, NavDirection, PartitionLabel, View};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Op {
    Switch(View),
    Step(NavDirection),
}

fn arb_label() -> impl Strategy<Value = Option<PartitionLabel>> {
    prop_oneof![
        Just(None),
        Just(Some(PartitionLabel::Train)),
        Just(Some(PartitionLabel::Validation)),
        Just(Some(PartitionLabel::Test)),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::sample::select(View::ALL.to_vec()).prop_map(Op::Switch),
        Just(Op::Step(NavDirection::Prev)),
        Just(Op::Step(NavDirection::Next)),
        Just(Op::Step(NavDirection::Next)),
    ]
}

fn setup(labels: &[Option<PartitionLabel>]) -> (InMemoryFrameStore, NavigationController) {
    let frames = (0..labels.len() as u64)
        .map(|id| LidarFrame::new(id, Vec::new()))
        .collect();
    let mut store = InMemoryFrameStore::new(frames).unwrap();
    let map: LabelMap = labels
        .iter()
        .enumerate()
        .map(|(id, &label)| (id as u64, label))
        .collect();
    let nav = NavigationController::load(&mut store, &map).unwrap();
    (store, nav)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_buttons_follow_view_pointer(
        labels in prop::collection::vec(arb_label(), 1..40),
        ops in prop::collection::vec(arb_op(), 0..60),
    ) {
        let (mut store, mut nav) = setup(&labels);

        for op in ops {
            match op {
                Op::Switch(view) => {
                    nav.switch_view(&mut store, view).unwrap();
                }
                Op::Step(dir) => {
                    nav.advance(&mut store, dir).unwrap();
                }
            }

            let view = nav.active_view();
            let len = nav.index().len(view);
            match nav.pointer(view) {
                Some(p) => {
                    prop_assert!(p < len);
                    prop_assert_eq!(nav.can_go_prev(), p > 0);
                    prop_assert_eq!(nav.can_go_next(), p + 1 < len);
                    // The store always shows the frame the view points at.
                    prop_assert_eq!(store.current().map(|f| f.id), nav.current_id());
                }
                None => {
                    prop_assert_eq!(len, 0);
                    prop_assert!(!nav.can_go_prev());
                    prop_assert!(!nav.can_go_next());
                }
            }
        }
    }

    #[test]
    fn proptest_blocked_step_changes_nothing(
        labels in prop::collection::vec(arb_label(), 1..30),
        view in prop::sample::select(View::ALL.to_vec()),
        forward in any::<bool>(),
    ) {
        let (mut store, mut nav) = setup(&labels);
        nav.switch_view(&mut store, view).unwrap();

        let dir = if forward { NavDirection::Next } else { NavDirection::Prev };
        while nav.advance(&mut store, dir).unwrap() {}

        let pointer = nav.pointer(view);
        let shown = store.current().map(|f| f.id);
        prop_assert!(!nav.advance(&mut store, dir).unwrap());
        prop_assert_eq!(nav.pointer(view), pointer);
        prop_assert_eq!(store.current().map(|f| f.id), shown);
    }

    #[test]
    fn proptest_original_pointer_restored(
        labels in prop::collection::vec(arb_label(), 1..30),
        start in 0usize..30,
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let (mut store, mut nav) = setup(&labels);
        for _ in 0..start {
            nav.advance(&mut store, NavDirection::Next).unwrap();
        }
        let p = nav.pointer(View::Original);

        nav.switch_view(&mut store, View::Train).unwrap();
        for op in ops {
            match op {
                // Stay away from Original so only partition pointers move.
                Op::Switch(View::Original) => {}
                Op::Switch(view) => {
                    nav.switch_view(&mut store, view).unwrap();
                }
                Op::Step(dir) => {
                    nav.advance(&mut store, dir).unwrap();
                }
            }
        }
        nav.switch_view(&mut store, View::Original).unwrap();

        prop_assert_eq!(nav.pointer(View::Original), p);
    }
}
