mod common;

use common::{
    assert_lifecycle_paired, count, events, events_matching, frame_harness, harness, last_appearance, pages, position,
    Harness,
};
use npager_core::config::PagerConfig;
use npager_core::error::PagerError;
use npager_core::vg::kurbo::Size;
use npager_core::vg::peniko::Color;
use npager_theme::serde_color::to_hex;
use npager_theme::style::{FontWeight, SegmentState, TabStyle};
use npager_widgets::pager::{Pager, MAX_MOUNTED};
use npager_widgets::scroll::ObserverId;
use npager_widgets::segmented::{Icon, SegmentedControl};
use std::time::{Duration, Instant};

const LIFECYCLE: &[&str] = &["will_show", "did_show", "will_hide", "did_hide", "will_attach", "did_attach", "will_detach", "did_detach"];

#[test]
fn test_jump_to_last_page() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.set_selected_index(2, false).unwrap();

    assert!(position(&log, "will_change 2 0") < position(&log, "animate 0 -> 600"));
    assert!(position(&log, "mount 2") < position(&log, "unmount 0"));
    assert!(position(&log, "unmount 0") < position(&log, "did_change 2"));
    assert_eq!(pager.scroll_view().offset().x, 600.0);
    assert_eq!(pager.selected_index(), 2);
    assert_eq!(pager.previous_index(), 2);
    assert_eq!(pager.mounted_indexes(), vec![2]);
    assert_eq!(
        events_matching(&log, LIFECYCLE),
        vec![
            "will_hide 0",
            "will_show 2",
            "will_detach 0",
            "will_attach 2",
            "did_detach 0",
            "did_attach 2",
            "did_hide 0",
            "did_show 2",
        ]
    );
}

#[test]
fn test_repeated_selection_notifies_once() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.set_selected_index(1, false).unwrap();
    pager.set_selected_index(1, false).unwrap();

    assert_eq!(count(&log, "will_change"), 1);
    assert_eq!(count(&log, "did_change"), 1);
    assert_eq!(count(&log, "animate"), 1);
}

#[test]
fn test_selection_round_trip() {
    let Harness { mut pager, .. } = harness(4);

    for index in [3, 0, 2, 1, 1] {
        pager.set_selected_index(index, false).unwrap();
        assert_eq!(pager.selected_index(), index);
        assert_eq!(pager.mounted_indexes(), vec![index]);
    }
}

#[test]
fn test_did_change_waits_for_animation() {
    let Harness {
        mut pager,
        log,
        animator,
        ..
    } = harness(3);

    pager.set_selected_index(1, true).unwrap();

    assert!(pager.is_transitioning());
    assert_eq!(pager.selected_index(), 1);
    assert_eq!(pager.tab_strip().selected_index(), Some(1));
    assert_eq!(count(&log, "did_change"), 0);
    assert_eq!(count(&log, "did_show"), 0);

    animator.finish();
    pager.tick(Instant::now());

    assert!(!pager.is_transitioning());
    assert!(position(&log, "animation finished") < position(&log, "mount 1"));
    assert!(position(&log, "mount 1") < position(&log, "did_change 1"));
    assert!(position(&log, "did_change 1") < position(&log, "did_show 1"));
    assert_eq!(pager.mounted_indexes(), vec![1]);
}

#[test]
fn test_new_target_mid_flight_retargets() {
    let Harness {
        mut pager,
        log,
        animator,
        ..
    } = harness(3);

    pager.set_selected_index(1, true).unwrap();
    pager.set_selected_index(2, true).unwrap();

    assert_eq!(count(&log, "animate"), 1);
    assert!(position(&log, "will_change 2 0") < position(&log, "retarget 600"));
    assert_eq!(pager.selected_index(), 2);

    animator.finish();
    pager.tick(Instant::now());

    assert_eq!(events_matching(&log, &["did_change"]), vec!["did_change 2"]);
    assert_eq!(pager.previous_index(), 2);
    assert_eq!(pager.mounted_indexes(), vec![2]);
    assert_eq!(count(&log, "did_hide 1"), 1);
    assert_eq!(count(&log, "did_hide 0"), 1);
    assert_eq!(count(&log, "did_show 2"), 1);
    for name in ["0", "1", "2"] {
        assert_lifecycle_paired(&log, name);
    }
    assert_eq!(last_appearance(&log, "1").as_deref(), Some("did_hide 1"));
}

#[test]
fn test_redirect_back_to_origin() {
    let Harness {
        mut pager,
        log,
        animator,
        ..
    } = harness(3);

    pager.set_selected_index(2, true).unwrap();
    pager.set_selected_index(0, true).unwrap();

    assert_eq!(events_matching(&log, &["will_change"]), vec!["will_change 2 0"]);
    assert!(position(&log, "will_change 2 0") < position(&log, "retarget 0"));
    assert_eq!(pager.selected_index(), 0);
    assert_eq!(pager.tab_strip().selected_index(), Some(0));

    animator.finish();
    pager.tick(Instant::now());

    assert!(!pager.is_transitioning());
    assert_eq!(events_matching(&log, &["did_change"]), vec!["did_change 0"]);
    assert_eq!(pager.previous_index(), 0);
    assert_eq!(pager.mounted_indexes(), vec![0]);
    for name in ["0", "1", "2"] {
        assert_lifecycle_paired(&log, name);
    }
    assert_eq!(count(&log, "will_hide 0"), count(&log, "did_hide 0"));
    assert_eq!(last_appearance(&log, "0").as_deref(), Some("did_show 0"));
    assert_eq!(last_appearance(&log, "2").as_deref(), Some("did_hide 2"));
}

#[test]
fn test_same_target_mid_flight_is_ignored() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.set_selected_index(2, true).unwrap();
    pager.set_selected_index(2, false).unwrap();

    assert_eq!(count(&log, "will_change"), 1);
    assert_eq!(count(&log, "retarget"), 0);
    assert!(pager.is_transitioning());
}

#[test]
fn test_drag_straddles_until_settle() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.begin_drag();
    pager.scroll_did_change(320.0);
    assert_eq!(pager.mounted_indexes(), vec![1, 2]);
    assert_eq!(count(&log, "will_change"), 0);

    pager.end_drag(true);
    assert_eq!(pager.mounted_indexes(), vec![1, 2]);
    assert!(pager.scroll_state().decelerating);

    pager.end_deceleration();
    assert_eq!(events_matching(&log, &["will_change", "did_change"]), vec!["will_change 1 0", "did_change 1"]);
    assert_eq!(count(&log, "animate"), 0);
    assert_eq!(pager.scroll_view().offset().x, 300.0);
    assert_eq!(pager.mounted_indexes(), vec![1]);
    assert_eq!(pager.selected_index(), 1);
}

#[test]
fn test_tap_on_settled_page_after_drag() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.begin_drag();
    pager.scroll_did_change(200.0);
    assert_eq!(pager.tab_strip().selected_index(), Some(1));

    pager.tab_strip_mut().tap(0);
    pager.tick(Instant::now());

    assert_eq!(count(&log, "will_change"), 0);
    assert!(!pager.is_transitioning());
    assert_eq!(pager.scroll_view().offset().x, 0.0);
    assert_eq!(pager.tab_strip().selected_index(), Some(0));
    assert_eq!(pager.mounted_indexes(), vec![0]);
}

#[test]
fn test_drag_back_to_start_is_silent() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.begin_drag();
    pager.scroll_did_change(100.0);
    assert_eq!(pager.tab_strip().selected_index(), Some(0));
    pager.end_drag(false);

    assert_eq!(count(&log, "will_change"), 0);
    assert_eq!(pager.scroll_view().offset().x, 0.0);
    assert_eq!(pager.mounted_indexes(), vec![0]);
}

#[test]
fn test_drag_interrupts_animation() {
    let (mut pager, log) = frame_harness(3);

    pager.set_selected_index(2, true).unwrap();
    let start = Instant::now();
    pager.tick(start);
    pager.tick(start + Duration::from_millis(30));
    assert!(pager.is_transitioning());
    assert_eq!(pager.mounted_indexes(), vec![0, 1]);

    pager.begin_drag();

    assert!(!pager.is_transitioning());
    assert_eq!(pager.selected_index(), 0);
    assert_eq!(pager.previous_index(), 0);
    assert_eq!(pager.tab_strip().selected_index(), Some(0));
    assert_eq!(count(&log, "did_change 2"), 0);
    assert_eq!(
        events_matching(&log, &["will_change", "did_change"]),
        vec!["will_change 2 0", "did_change 0"]
    );
    assert!(!pager.is_mounted(2));
    for name in ["0", "1", "2"] {
        assert_lifecycle_paired(&log, name);
    }
    assert_eq!(last_appearance(&log, "0").as_deref(), Some("did_show 0"));
    assert_eq!(last_appearance(&log, "2").as_deref(), Some("did_hide 2"));

    pager.end_drag(false);
    assert_eq!(count(&log, "did_change"), 1);
    assert_eq!(pager.scroll_view().offset().x, 0.0);
    assert_eq!(pager.mounted_indexes(), vec![0]);
}

#[test]
fn test_drag_past_half_page_completes_on_reached_page() {
    let (mut pager, log) = frame_harness(3);

    pager.set_selected_index(2, true).unwrap();
    let start = Instant::now();
    pager.tick(start);
    pager.tick(start + Duration::from_millis(150));
    assert!(pager.scroll_view().offset().x > 150.0);
    assert!(pager.mounted_indexes().len() <= MAX_MOUNTED);

    pager.begin_drag();

    assert!(!pager.is_transitioning());
    assert_eq!(pager.previous_index(), 1);
    assert_eq!(
        events_matching(&log, &["will_change", "did_change"]),
        vec!["will_change 2 0", "will_change 1 0", "did_change 1"]
    );
    assert!(pager.is_mounted(1));
    for name in ["0", "1", "2"] {
        assert_lifecycle_paired(&log, name);
    }
    assert_eq!(last_appearance(&log, "1").as_deref(), Some("did_show 1"));
}

#[test]
fn test_single_page_hides_tab_strip() {
    let Harness { pager, .. } = harness(1);

    let geometry = pager.geometry();
    assert_eq!(geometry.tab_strip_height, 0.0);
    assert_eq!(geometry.indicator_height, 0.0);
    assert_eq!(geometry.scroll_frame.height(), 600.0);
    assert_eq!(pager.indicator_frame().height(), 0.0);
}

#[test]
fn test_replacing_pages_mid_transition() {
    let Harness { mut pager, log, .. } = harness(3);

    pager.set_selected_index(2, true).unwrap();
    log.borrow_mut().clear();

    pager.set_pages(pages("n", 4, &log));

    assert!(!pager.is_transitioning());
    assert_eq!(pager.previous_index(), 0);
    assert_eq!(pager.selected_index(), 0);
    assert_eq!(pager.page_count(), 4);
    assert!(pager.mounted_indexes().len() <= MAX_MOUNTED);
    assert_eq!(count(&log, "did_change"), 0);
    assert_eq!(count(&log, "stop"), 1);
    assert_eq!(count(&log, "unmount 0"), 1);
    assert_eq!(count(&log, "did_hide 2"), 1);
    assert_eq!(count(&log, "will_show n0"), 1);

    pager.layout();
    assert_eq!(pager.mounted_indexes(), vec![0]);
    assert_eq!(count(&log, "mount n0"), 1);
    assert_eq!(pager.tab_strip().segment_count(), 4);
    assert_eq!(pager.geometry().content_size.width, 1200.0);
}

#[test]
#[should_panic(expected = "may not replace it")]
fn test_foreign_scroll_observer_is_fatal() {
    let Harness { mut pager, .. } = harness(2);
    pager.scroll_view_mut().observe(ObserverId::next());
}

#[test]
fn test_lifecycle_propagation_off() {
    let Harness { mut pager, log, .. } = harness(3);
    pager.set_lifecycle_propagation(false);

    pager.set_selected_index(1, false).unwrap();

    assert!(events_matching(&log, LIFECYCLE).is_empty());
    assert_eq!(events_matching(&log, &["mount", "unmount"]), vec!["mount 1", "unmount 0"]);
    assert_eq!(count(&log, "did_change 1"), 1);
}

#[test]
fn test_lifecycle_propagation_off_from_construction() {
    let log = common::EventLog::default();
    let config = PagerConfig::new().with_lifecycle_propagation(false);
    let mut pager = Pager::from_config(config, pages("", 2, &log));
    pager.set_viewport_size(Size::new(300.0, 600.0));
    pager.layout();
    pager.set_selected_index(1, false).unwrap();
    drop(pager);

    assert!(events_matching(&log, LIFECYCLE).is_empty(), "{:?}", events(&log));
    assert_eq!(count(&log, "mount 1"), 1);
}

#[test]
fn test_invalid_construction_config_falls_back() {
    let log = common::EventLog::default();
    let config = PagerConfig::new().with_tab_strip_height(-4.0);
    let pager = Pager::from_config(config, pages("", 2, &log));

    assert_eq!(pager.config(), &PagerConfig::default());
    assert_eq!(count(&log, "will_show 0"), 1);
}

#[test]
fn test_tab_tap_selects_page() {
    let Harness {
        mut pager,
        log,
        animator,
        ..
    } = harness(3);

    pager.tab_strip_mut().tap(2);
    assert_eq!(count(&log, "will_change"), 0);

    pager.tick(Instant::now());
    assert_eq!(count(&log, "will_change 2 0"), 1);
    assert_eq!(count(&log, "animate 0 -> 600"), 1);

    animator.finish();
    pager.tick(Instant::now());
    assert_eq!(pager.selected_index(), 2);
    assert_eq!(count(&log, "did_change 2"), 1);
}

#[test]
fn test_tab_strip_setup_is_idempotent() {
    let Harness { mut pager, log, .. } = harness(2);

    pager.set_pages(pages("n", 2, &log));
    pager.set_pages(pages("m", 2, &log));
    pager.layout();
    log.borrow_mut().clear();

    pager.tab_strip_mut().tap(1);
    pager.process_pending_input();

    assert_eq!(count(&log, "will_change"), 1);
}

#[test]
fn test_style_is_deferred_until_layout() {
    let mut pager = Pager::new(pages("", 2, &Default::default()));
    let red = Color::from_rgb8(255, 0, 0);

    pager.set_text_color(SegmentState::Selected, red);
    assert_ne!(to_hex(pager.tab_strip().text_style_for(0).color), to_hex(red));

    pager.set_viewport_size(Size::new(300.0, 600.0));
    pager.layout();
    assert_eq!(to_hex(pager.tab_strip().text_style_for(0).color), to_hex(red));

    pager.set_font_weight(SegmentState::Normal, FontWeight::BOLD);
    assert_eq!(pager.tab_strip().text_style_for(1).weight, FontWeight::BOLD);
    assert_eq!(
        to_hex(pager.style().normal.color),
        to_hex(TabStyle::default().normal.color)
    );
}

#[test]
fn test_resize_keeps_selected_page() {
    let Harness { mut pager, log, .. } = harness(3);
    pager.set_selected_index(2, false).unwrap();
    log.borrow_mut().clear();

    pager.set_viewport_size(Size::new(400.0, 600.0));
    pager.layout();

    assert_eq!(pager.scroll_view().offset().x, 800.0);
    assert_eq!(pager.selected_index(), 2);
    assert_eq!(pager.mounted_indexes(), vec![2]);
    assert_eq!(events_matching(&log, &["frame"]), vec!["frame 2 800"]);
}

#[test]
fn test_resize_mid_transition_completes_it() {
    let Harness { mut pager, log, .. } = harness(3);
    pager.set_selected_index(1, true).unwrap();

    pager.set_viewport_size(Size::new(200.0, 600.0));
    pager.layout();

    assert!(!pager.is_transitioning());
    assert_eq!(pager.scroll_view().offset().x, 200.0);
    assert_eq!(count(&log, "did_change 1"), 1);
}

#[test]
fn test_scroll_updates_reach_observer() {
    let Harness {
        mut pager, scrolls, ..
    } = harness(3);

    pager.scroll_did_change(150.0);

    let last = *scrolls.borrow().last().unwrap();
    assert_eq!(last.offset.x, 150.0);
    assert_eq!(last.viewport_size.width, 300.0);
    assert!((pager.indicator_frame().center().x - 100.0).abs() < 1e-9);
}

#[test]
fn test_tab_setters_validate_index() {
    let Harness { mut pager, .. } = harness(2);

    pager.set_tab_title(1, "Archive").unwrap();
    pager.set_tab_icon(0, Some(Icon::named("inbox"))).unwrap();

    assert_eq!(pager.tab_strip().segments()[1].title.as_deref(), Some("Archive"));
    assert_eq!(
        pager.set_tab_icon(2, None),
        Err(PagerError::IndexOutOfRange { index: 2, count: 2 })
    );
}

#[test]
fn test_drop_unmounts_and_hides_pages() {
    let Harness { pager, log, .. } = harness(2);

    drop(pager);

    assert_eq!(events(&log), vec!["will_hide 0", "will_detach 0", "did_detach 0", "did_hide 0", "unmount 0"]);
}
