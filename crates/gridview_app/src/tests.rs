//! End-to-end tests for the grid runtime
//!
//! Every test drives a [`HeadlessHost`] on its virtual clock, so timings are
//! exact and runs are reproducible.

use crate::item::EntrancePhase;
use crate::prelude::*;
use crate::screen::{TITLE, TOP_BAR_HEIGHT};

/// Host with a fixed row height so visibility math is easy to follow
fn fixed_rows_host(row_height: f32) -> HeadlessHost {
    HeadlessHost::new(GridConfig {
        row_height: Some(row_height),
        ..Default::default()
    })
    .expect("failed to create host")
}

fn item(host: &HeadlessHost, index: usize) -> ItemSnapshot {
    host.snapshot()
        .item(index)
        .cloned()
        .unwrap_or_else(|| panic!("item {index} is not mounted"))
}

// ============================================================================
// Entrance sequence
// ============================================================================

#[test]
fn test_mounted_item_starts_offscreen_and_transparent() {
    let host = HeadlessHost::new(GridConfig::default()).unwrap();
    let first = item(&host, 0);
    assert_eq!(first.offset_x, -300.0);
    assert_eq!(first.opacity, 0.0);
    assert_eq!(first.phase, EntrancePhase::SlidingIn);
}

#[test]
fn test_slide_completes_before_fade_starts() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();

    host.advance_by(150.0).unwrap();
    let mid = item(&host, 0);
    assert!((mid.offset_x - -150.0).abs() < 1e-3, "offset = {}", mid.offset_x);
    assert_eq!(mid.opacity, 0.0);

    host.advance_by(150.0).unwrap();
    let slid = item(&host, 0);
    assert_eq!(host.now_ms(), 300.0);
    assert_eq!(slid.offset_x, 0.0);
    assert_eq!(slid.opacity, 0.0);
    assert_eq!(slid.phase, EntrancePhase::FadingIn);

    host.advance_by(600.0).unwrap();
    let settled = item(&host, 0);
    assert_eq!(host.now_ms(), 900.0);
    assert_eq!(settled.offset_x, 0.0);
    assert_eq!(settled.opacity, 1.0);
    assert_eq!(settled.phase, EntrancePhase::Settled);
}

#[test]
fn test_offset_is_linear_during_slide() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    let mut previous = -300.0;
    for step in 1..=10 {
        host.advance_by(30.0).unwrap();
        let offset = item(&host, 0).offset_x;
        let expected = -300.0 + 30.0 * step as f32;
        assert!((offset - expected).abs() < 1e-3, "step {step}: {offset}");
        assert!(offset > previous);
        previous = offset;
    }
}

#[test]
fn test_opacity_is_monotonic_during_fade() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    host.advance_by(300.0).unwrap();
    let mut previous = 0.0;
    for _ in 0..20 {
        host.advance_by(30.0).unwrap();
        let opacity = item(&host, 0).opacity;
        assert!(opacity >= previous);
        assert!((0.0..=1.0).contains(&opacity));
        previous = opacity;
    }
    assert_eq!(previous, 1.0);
}

#[test]
fn test_settled_items_release_all_work() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    host.advance_by(300.0).unwrap();
    host.advance_by(600.0).unwrap();
    assert!(host.snapshot().all_settled());
    assert_eq!(host.scheduler().tween_count(), 0);
    assert!(host.executor().is_idle());

    // Nothing changes once settled
    let before = host.snapshot().items;
    host.advance_by(5000.0).unwrap();
    assert_eq!(host.snapshot().items, before);
}

#[test]
fn test_long_advance_ends_on_exact_time() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    // Far past the point where f32 milliseconds can count 16ms frames
    assert_eq!(host.advance_by(6.0e8).unwrap(), ControlFlow::Continue);
    assert_eq!(host.now_ms(), 6.0e8);
    assert_eq!(host.scheduler().frame(), 37_500_000);
    assert!(host.snapshot().all_settled());
}

#[test]
fn test_advance_rejects_non_finite_duration() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    assert!(matches!(
        host.advance_by(f32::INFINITY),
        Err(AppError::Config(_))
    ));
    assert!(matches!(host.advance_by(f32::NAN), Err(AppError::Config(_))));
    assert_eq!(host.now_ms(), 0.0);
}

#[test]
fn test_all_thirty_items_animate_together() {
    let mut host = HeadlessHost::new(GridConfig {
        viewport_height: 5000.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(host.screen().mounted_indices(), (0..30).collect::<Vec<_>>());
    for sample in host.snapshot().items {
        assert_eq!(sample.offset_x, -300.0, "item {}", sample.index);
        assert_eq!(sample.opacity, 0.0, "item {}", sample.index);
        assert_eq!(sample.phase, EntrancePhase::SlidingIn);
    }

    host.advance_by(300.0).unwrap();
    assert!(host
        .snapshot()
        .items
        .iter()
        .all(|sample| sample.offset_x == 0.0 && sample.phase == EntrancePhase::FadingIn));

    host.advance_by(600.0).unwrap();
    let snapshot = host.snapshot();
    assert_eq!(snapshot.items.len(), 30);
    assert!(snapshot.all_settled());
    assert!(snapshot.items.iter().all(|sample| sample.opacity == 1.0));
}

#[test]
fn test_custom_durations() {
    let mut host = HeadlessHost::new(GridConfig {
        slide_duration_ms: 100,
        fade_duration_ms: 200,
        initial_offset_x: -50.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(item(&host, 0).offset_x, -50.0);
    host.advance_by(100.0).unwrap();
    assert_eq!(item(&host, 0).phase, EntrancePhase::FadingIn);
    host.advance_by(200.0).unwrap();
    assert_eq!(item(&host, 0).phase, EntrancePhase::Settled);
}

// ============================================================================
// Grid composition
// ============================================================================

#[test]
fn test_full_tree_has_thirty_items_in_two_columns() {
    let ui = grid_view_animation();
    let mut tree = RenderTree::from_element(&ui).unwrap();
    tree.compute_layout(360.0, 640.0).unwrap();
    let nodes = tree.nodes();

    let headings: Vec<&RenderNode> = nodes
        .iter()
        .filter(|n| {
            n.text
                .as_ref()
                .is_some_and(|t| t.content == StaticItemContent::HEADING)
        })
        .collect();
    assert_eq!(headings.len(), 30);

    // Row-major order: even indices on the left, odd on the right
    for pair in headings.chunks(2) {
        assert!(pair[0].bounds.x() < pair[1].bounds.x());
        assert!((pair[0].bounds.y() - pair[1].bounds.y()).abs() < 1e-3);
    }
    for rows in headings.chunks(2).collect::<Vec<_>>().windows(2) {
        assert!(rows[0][0].bounds.y() < rows[1][0].bounds.y());
    }
}

#[test]
fn test_title_bar() {
    let ui = grid_view_animation();
    let mut tree = RenderTree::from_element(&ui).unwrap();
    tree.compute_layout(360.0, 640.0).unwrap();
    let title = tree
        .nodes()
        .into_iter()
        .find_map(|n| n.text.filter(|t| t.content == TITLE))
        .unwrap();
    assert_eq!(title.align, TextAlign::Center);
    assert_eq!(title.color, Color::WHITE);
}

#[test]
fn test_every_item_shows_static_content() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    host.advance_by(1000.0).unwrap();
    let nodes = host.render_tree().unwrap().nodes();

    let subtitles: Vec<_> = nodes
        .iter()
        .filter_map(|n| n.text.as_ref())
        .filter(|t| t.content == StaticItemContent::SUBTITLE)
        .collect();
    assert_eq!(subtitles.len(), host.screen().mounted_indices().len());
    for subtitle in subtitles {
        assert_eq!(subtitle.lines, 1);
        assert!(subtitle.displayed.ends_with('\u{2026}'));
    }

    let images: Vec<_> = nodes.iter().filter_map(|n| n.image.as_ref()).collect();
    assert!(images
        .iter()
        .all(|i| i.source == StaticItemContent::IMAGE && i.clip == ClipShape::Circle));
}

#[test]
fn test_render_applies_animated_values() {
    let host = HeadlessHost::new(GridConfig::default()).unwrap();
    let nodes = host.render_tree().unwrap().nodes();
    let heading = nodes
        .iter()
        .find(|n| {
            n.text
                .as_ref()
                .is_some_and(|t| t.content == StaticItemContent::HEADING)
        })
        .unwrap();
    assert_eq!(heading.opacity, 0.0);
    // Slid 300px left of a column that starts inside the first card
    assert!(heading.bounds.x() < 0.0);
}

// ============================================================================
// Virtualization
// ============================================================================

#[test]
fn test_only_visible_rows_are_mounted() {
    let host = fixed_rows_host(180.0);
    // 640 - 56 = 584px of grid shows 4 rows
    assert_eq!(host.screen().mounted_indices(), (0..8).collect::<Vec<_>>());
}

#[test]
fn test_scroll_mounts_and_unmounts() {
    let mut host = fixed_rows_host(180.0);
    host.advance_by(1000.0).unwrap();
    assert!(host.snapshot().all_settled());

    host.scroll_by(720.0).unwrap();
    let snapshot = host.snapshot();
    assert_eq!(snapshot.scroll_offset, 720.0);
    let mounted = host.screen().mounted_indices();
    assert_eq!(mounted, (8..16).collect::<Vec<_>>());

    // Newly composed items start their own entrance
    let fresh = item(&host, 8);
    assert_eq!(fresh.offset_x, -300.0);
    assert_eq!(fresh.phase, EntrancePhase::SlidingIn);
}

#[test]
fn test_scroll_is_clamped_to_content() {
    let mut host = fixed_rows_host(180.0);
    host.scroll_by(100_000.0).unwrap();
    let max = 15.0 * 180.0 - (640.0 - TOP_BAR_HEIGHT);
    assert_eq!(host.screen().scroll_offset(), max);
    assert!(host.screen().mounted_indices().contains(&29));
}

#[test]
fn test_unmount_mid_animation_cancels_cleanly() {
    let mut host = fixed_rows_host(180.0);
    host.advance_by(100.0).unwrap();
    assert_eq!(host.scheduler().tween_count(), 8);

    host.scroll_by(720.0).unwrap();
    // Old items released their tweens; the 8 new items registered theirs
    assert_eq!(host.scheduler().tween_count(), 8);
    assert_eq!(host.executor().task_count(), 8);
}

#[test]
fn test_remount_replays_entrance() {
    let mut host = fixed_rows_host(180.0);
    host.advance_by(1000.0).unwrap();
    assert_eq!(item(&host, 0).phase, EntrancePhase::Settled);

    host.scroll_by(720.0).unwrap();
    host.scroll_by(-720.0).unwrap();
    let replayed = item(&host, 0);
    assert_eq!(replayed.offset_x, -300.0);
    assert_eq!(replayed.opacity, 0.0);
    assert_eq!(replayed.phase, EntrancePhase::SlidingIn);
}

#[test]
fn test_items_animate_independently() {
    let mut host = fixed_rows_host(180.0);
    host.advance_by(150.0).unwrap();
    // Row 4 comes into view halfway through the first rows' slide
    host.scroll_by(180.0).unwrap();
    host.advance_by(150.0).unwrap();

    assert_eq!(item(&host, 2).phase, EntrancePhase::FadingIn);
    let late = item(&host, 8);
    assert_eq!(late.phase, EntrancePhase::SlidingIn);
    assert!((late.offset_x - -150.0).abs() < 1e-3);
}

#[test]
fn test_beyond_bounds_rows_are_composed() {
    let host = HeadlessHost::new(GridConfig {
        row_height: Some(180.0),
        beyond_bounds_rows: 1,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(host.screen().mounted_indices(), (0..10).collect::<Vec<_>>());
}

// ============================================================================
// Host lifecycle
// ============================================================================

#[test]
fn test_suspend_pauses_animation() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    host.advance_by(100.0).unwrap();
    host.handle_event(Event::Lifecycle(LifecycleEvent::Suspended))
        .unwrap();
    host.advance_by(1000.0).unwrap();
    let paused = item(&host, 0);
    assert!((paused.offset_x - -200.0).abs() < 1e-3);
    assert!(host.snapshot().suspended);

    host.handle_event(Event::Lifecycle(LifecycleEvent::Resumed))
        .unwrap();
    host.advance_by(200.0).unwrap();
    assert_eq!(item(&host, 0).phase, EntrancePhase::FadingIn);
}

#[test]
fn test_destroy_unmounts_everything() {
    let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
    host.advance_by(100.0).unwrap();
    let flow = host
        .handle_event(Event::Lifecycle(LifecycleEvent::Destroyed))
        .unwrap();
    assert_eq!(flow, ControlFlow::Exit);
    assert!(host.is_destroyed());
    assert!(host.snapshot().items.is_empty());
    assert_eq!(host.scheduler().tween_count(), 0);
    assert!(host.executor().is_idle());

    // Further events are ignored
    assert_eq!(host.advance_by(100.0).unwrap(), ControlFlow::Exit);
    assert!(matches!(host.render_tree(), Err(AppError::HostDestroyed)));
}

#[test]
fn test_resize_recomposes() {
    let mut host = fixed_rows_host(180.0);
    host.handle_event(Event::Resized {
        width: 360.0,
        height: 1000.0,
    })
    .unwrap();
    // 944px of grid shows 6 rows
    assert_eq!(host.screen().mounted_indices().len(), 12);
}

#[test]
fn test_runs_are_reproducible() {
    let run = || {
        let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
        host.advance_by(437.0).unwrap();
        host.scroll_by(250.0).unwrap();
        host.advance_by(291.0).unwrap();
        host.snapshot().to_json().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_prepared_image_from_asset_dir() {
    use std::io::Cursor;

    let dir = std::env::temp_dir().join(format!("gridview-assets-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let img = ::image::RgbaImage::from_pixel(80, 60, ::image::Rgba([200, 100, 50, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ::image::ImageFormat::Png).unwrap();
    std::fs::write(dir.join(StaticItemContent::IMAGE), bytes.into_inner()).unwrap();

    let host = HeadlessHost::new(GridConfig {
        asset_dir: Some(dir.clone()),
        ..Default::default()
    })
    .unwrap();
    std::fs::remove_dir_all(&dir).ok();

    let prepared = host.prepared_image().unwrap();
    assert_eq!((prepared.width(), prepared.height()), (57, 57));
    assert_eq!(prepared.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(prepared.pixel(28, 28).unwrap()[3], 255);

    let nodes = host.render_tree().unwrap().nodes();
    let images: Vec<_> = nodes
        .iter()
        .filter(|node| node.kind == ElementTypeId::Image)
        .collect();
    assert!(!images.is_empty());
    for node in images {
        assert_eq!(
            node.decoded,
            Some(DecodedImage {
                width: 57,
                height: 57
            })
        );
    }
}

#[test]
fn test_image_nodes_without_asset_dir_are_undecoded() {
    let host = HeadlessHost::new(GridConfig::default()).unwrap();
    let nodes = host.render_tree().unwrap().nodes();
    assert!(nodes
        .iter()
        .filter(|node| node.kind == ElementTypeId::Image)
        .all(|node| node.decoded.is_none()));
}

#[test]
fn test_missing_asset_fails() {
    let result = HeadlessHost::new(GridConfig {
        asset_dir: Some("/nonexistent/gridview".into()),
        ..Default::default()
    });
    assert!(matches!(result, Err(AppError::Layout(_))));
}
