use super::carousel::{Carousel, ScrollOrigin};
use super::screen::{PlayerScreen, ScreenOptions};
use super::seek::{SeekState, SeekTranslator, bar_fraction, progress_fraction};
use super::sync::{ScrollTo, Synchronizer, candidate_index};
use super::time::{format_time, remaining};
use crate::library::{Playlist, Track};
use crate::player::fake::{Command, FakePlayer};
use crate::player::{PlaybackSnapshot, PlayerEvent, PlayerFacade, RepeatMode, TransportState};
use proptest::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const PAGE: f64 = 40.0;

fn t(i: usize) -> Track {
    Track {
        id: (i + 1).to_string(),
        title: format!("Song {i}"),
        artist: Some(format!("Artist {i}")),
        album: None,
        source: PathBuf::from(format!("/tmp/music/{i}.mp3")),
        artwork: Some(PathBuf::from(format!("/tmp/img/{i}.jpg"))),
        duration: Some(Duration::from_secs(180)),
    }
}

fn playlist(n: usize) -> Playlist {
    Playlist::new((0..n).map(t).collect()).unwrap()
}

/// A fake player that has already been set up and holds `n` tracks.
fn ready_player(n: usize) -> FakePlayer {
    let player = FakePlayer::with_tracks((0..n).map(t).collect());
    player.setup().unwrap();
    player.take_commands();
    player
}

/// Screen mounted on a fake player, viewport set, startup commands cleared.
fn mounted(n: usize) -> (FakePlayer, PlayerScreen) {
    let player = FakePlayer::new();
    let mut screen = PlayerScreen::mount(playlist(n), &player, ScreenOptions::default());
    screen.set_viewport(PAGE, 100.0, &player, Instant::now());
    player.take_commands();
    (player, screen)
}

fn later(now: Instant) -> Instant {
    now + Duration::from_secs(1)
}

// ----- candidate index -----

#[test]
fn candidate_index_rounds_and_clamps() {
    assert_eq!(candidate_index(0.0, PAGE, 3), Some(0));
    assert_eq!(candidate_index(19.0, PAGE, 3), Some(0));
    assert_eq!(candidate_index(21.0, PAGE, 3), Some(1));
    assert_eq!(candidate_index(80.0, PAGE, 3), Some(2));
    assert_eq!(candidate_index(400.0, PAGE, 3), Some(2));
    assert_eq!(candidate_index(-55.0, PAGE, 3), Some(0));
}

#[test]
fn candidate_index_without_geometry_is_none() {
    assert_eq!(candidate_index(10.0, 0.0, 3), None);
    assert_eq!(candidate_index(10.0, -4.0, 3), None);
    assert_eq!(candidate_index(f64::NAN, PAGE, 3), None);
    assert_eq!(candidate_index(10.0, PAGE, 0), None);
}

// ----- synchronizer -----

#[test]
fn swipe_to_page_two_issues_exactly_one_skip() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    assert_eq!(sync.on_scroll(2.0 * PAGE, PAGE, &player), None);

    assert_eq!(player.skips(), vec![2]);
    assert_eq!(sync.index(), 2);
    assert_eq!(sync.in_flight(), Some(2));
}

#[test]
fn repeated_candidate_does_not_reissue_skip() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    sync.on_scroll(PAGE, PAGE, &player);
    sync.on_scroll(PAGE, PAGE, &player);
    // Jitter within the same page.
    sync.on_scroll(PAGE + 3.0, PAGE, &player);

    assert_eq!(player.skips(), vec![1]);
}

#[test]
fn candidates_during_in_flight_skip_are_coalesced_to_latest() {
    let player = ready_player(5);
    let mut sync = Synchronizer::new(5);

    sync.on_scroll(PAGE, PAGE, &player);
    sync.on_scroll(2.0 * PAGE, PAGE, &player);
    sync.on_scroll(3.0 * PAGE, PAGE, &player);
    assert_eq!(player.skips(), vec![1]);
    assert_eq!(sync.index(), 3);

    // Acknowledgement of skip(1) releases the latest queued candidate only.
    assert_eq!(sync.on_track_changed(Some(1), &player), None);
    assert_eq!(player.skips(), vec![1, 3]);
    assert_eq!(sync.in_flight(), Some(3));

    assert_eq!(sync.on_track_changed(Some(3), &player), None);
    assert_eq!(sync.in_flight(), None);
    assert_eq!(sync.index(), 3);
    assert_eq!(sync.acknowledged(), 3);
}

#[test]
fn scrolling_back_while_in_flight_reissues_the_original_page() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    sync.on_scroll(PAGE, PAGE, &player);
    sync.on_scroll(0.0, PAGE, &player);
    sync.on_track_changed(Some(1), &player);

    assert_eq!(player.skips(), vec![1, 0]);
    assert_eq!(sync.index(), 0);
}

#[test]
fn rejected_skip_keeps_previous_valid_index() {
    let player = ready_player(3);
    player.reject_skips.borrow_mut().insert(2);
    let mut sync = Synchronizer::new(3);

    let scroll = sync.on_scroll(2.0 * PAGE, PAGE, &player);

    assert_eq!(scroll, Some(ScrollTo(0)));
    assert_eq!(sync.index(), 0);
    assert_eq!(sync.in_flight(), None);
    assert!(player.skips().is_empty());

    // Not stuck: the next swipe goes through.
    sync.on_scroll(PAGE, PAGE, &player);
    assert_eq!(player.skips(), vec![1]);
}

#[test]
fn skip_failed_event_restores_acknowledged_index() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    sync.on_scroll(PAGE, PAGE, &player);
    assert_eq!(sync.on_skip_failed(1, &player), Some(ScrollTo(0)));
    assert_eq!(sync.index(), 0);
    assert_eq!(sync.in_flight(), None);

    // Failures for skips we did not issue are ignored.
    assert_eq!(sync.on_skip_failed(2, &player), None);
}

#[test]
fn skip_failed_event_issues_queued_candidate() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    sync.on_scroll(PAGE, PAGE, &player);
    sync.on_scroll(2.0 * PAGE, PAGE, &player);
    assert_eq!(sync.on_skip_failed(1, &player), None);

    assert_eq!(player.skips(), vec![1, 2]);
    assert_eq!(sync.in_flight(), Some(2));
}

#[test]
fn external_track_change_scrolls_carousel() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    assert_eq!(sync.on_track_changed(Some(1), &player), Some(ScrollTo(1)));
    assert_eq!(sync.index(), 1);
    assert!(player.skips().is_empty());

    // Same track again: nothing to do.
    assert_eq!(sync.on_track_changed(Some(1), &player), None);
    assert_eq!(sync.on_track_changed(None, &player), None);
}

#[test]
fn foreign_track_change_while_skip_in_flight_waits_for_ack() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    sync.on_scroll(2.0 * PAGE, PAGE, &player);
    assert_eq!(sync.on_track_changed(Some(1), &player), None);
    assert_eq!(sync.index(), 2);
    assert_eq!(sync.acknowledged(), 1);
    assert_eq!(sync.in_flight(), Some(2));
}

#[test]
fn out_of_range_track_change_is_clamped() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);

    assert_eq!(sync.on_track_changed(Some(7), &player), Some(ScrollTo(2)));
    assert_eq!(sync.index(), 2);
}

#[test]
fn queue_end_on_last_track_wraps_to_first() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);
    sync.on_track_changed(Some(2), &player);

    assert_eq!(sync.on_queue_ended(2, &player), Some(ScrollTo(0)));
    assert_eq!(sync.index(), 0);
    assert_eq!(player.skips(), vec![0]);
}

#[test]
fn queue_end_does_not_override_a_newer_swipe() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);
    sync.on_track_changed(Some(2), &player);

    // The user swipes back to page 1 just as the last track runs out.
    sync.on_scroll(PAGE, PAGE, &player);
    assert_eq!(sync.on_queue_ended(2, &player), None);
    assert_eq!(sync.on_track_changed(Some(1), &player), None);

    assert_eq!(player.skips(), vec![1]);
    assert_eq!(sync.index(), 1);
    assert_eq!(sync.in_flight(), None);
}

#[test]
fn queue_end_for_a_track_no_longer_current_is_ignored() {
    let player = ready_player(3);
    let mut sync = Synchronizer::new(3);
    sync.on_track_changed(Some(1), &player);

    assert_eq!(sync.on_queue_ended(2, &player), None);
    assert_eq!(sync.index(), 1);
    assert!(player.skips().is_empty());
}

// ----- seek translator -----

#[test]
fn drag_to_half_and_release_seeks_once_to_half_duration() {
    let player = ready_player(1);
    let mut seek = SeekTranslator::new(100.0);

    seek.begin(0.0);
    seek.move_to(50.0);
    assert_eq!(seek.state(), SeekState::Seeking { pending: 50.0 });

    assert_eq!(seek.release(240.0, &player), Some(120.0));
    assert_eq!(player.seeks(), vec![120.0]);
    assert_eq!(seek.state(), SeekState::Idle);

    assert_eq!(seek.release(240.0, &player), None);
    assert_eq!(player.seeks().len(), 1);
}

#[test]
fn pending_position_is_clamped_to_bar() {
    let mut seek = SeekTranslator::new(100.0);
    let live = PlaybackSnapshot::default();

    seek.begin(150.0);
    assert_eq!(seek.displayed_fraction(&live), 1.0);
    seek.move_to(-20.0);
    assert_eq!(seek.displayed_fraction(&live), 0.0);

    seek.move_to(80.0);
    seek.set_bar_width(40.0);
    assert_eq!(seek.state(), SeekState::Seeking { pending: 40.0 });
}

#[test]
fn zero_width_bar_and_unknown_duration_show_no_progress() {
    let player = ready_player(1);
    let mut seek = SeekTranslator::new(0.0);
    let live = PlaybackSnapshot {
        position: 12.0,
        duration: 0.0,
        ..PlaybackSnapshot::default()
    };

    assert_eq!(seek.displayed_fraction(&live), 0.0);
    seek.begin(10.0);
    assert_eq!(seek.displayed_fraction(&live), 0.0);
    assert_eq!(seek.release(f64::NAN, &player), Some(0.0));
    assert_eq!(player.seeks(), vec![0.0]);
}

#[test]
fn seeking_ignores_live_position() {
    let mut seek = SeekTranslator::new(100.0);
    let mut live = PlaybackSnapshot {
        position: 30.0,
        duration: 120.0,
        ..PlaybackSnapshot::default()
    };
    assert_eq!(seek.displayed_fraction(&live), 0.25);

    seek.begin(75.0);
    live.position = 60.0;
    assert_eq!(seek.displayed_fraction(&live), 0.75);
    assert_eq!(seek.displayed_position(&live), 90.0);

    seek.cancel();
    assert_eq!(seek.displayed_fraction(&live), 0.5);
}

#[test]
fn move_without_active_drag_is_ignored() {
    let player = ready_player(1);
    let mut seek = SeekTranslator::new(100.0);
    seek.move_to(30.0);
    assert_eq!(seek.state(), SeekState::Idle);

    seek.begin(10.0);
    seek.cancel();
    assert_eq!(seek.release(100.0, &player), None);
    assert!(player.seeks().is_empty());
}

#[test]
fn progress_fraction_handles_degenerate_durations() {
    assert_eq!(progress_fraction(10.0, 0.0), 0.0);
    assert_eq!(progress_fraction(10.0, f64::NAN), 0.0);
    assert_eq!(progress_fraction(10.0, -5.0), 0.0);
    assert_eq!(progress_fraction(500.0, 100.0), 1.0);
}

// ----- time formatting -----

#[test]
fn format_time_is_minutes_and_padded_floored_seconds() {
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(5.0), "0:05");
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(59.9), "0:59");
    assert_eq!(format_time(3600.0), "60:00");
    assert_eq!(format_time(-3.0), "0:00");
    assert_eq!(format_time(f64::NAN), "0:00");
}

#[test]
fn remaining_never_goes_negative() {
    assert_eq!(remaining(30.0, 100.0), 70.0);
    assert_eq!(remaining(130.0, 100.0), 0.0);
    assert_eq!(remaining(1.0, f64::NAN), 0.0);
}

// ----- carousel -----

#[test]
fn carousel_resize_keeps_current_page() {
    let now = Instant::now();
    let mut c = Carousel::new(3);
    c.set_page_width(10.0);
    c.scroll_to_page(2, Duration::ZERO, ScrollOrigin::User, now);
    assert_eq!(c.offset(), 20.0);

    c.set_page_width(30.0);
    assert_eq!(c.offset(), 60.0);
    assert_eq!(c.current_page(), 2);
}

#[test]
fn carousel_animation_reaches_target_and_steps_do_not_wrap() {
    let now = Instant::now();
    let mut c = Carousel::new(3);
    c.set_page_width(10.0);

    c.step_pages(1, Duration::from_millis(200), now);
    assert!(c.is_animating());
    let mid = c.tick(now + Duration::from_millis(100)).unwrap();
    assert!(mid > 0.0 && mid < 10.0);
    assert_eq!(c.tick(later(now)), Some(10.0));
    assert!(!c.is_animating());

    c.step_pages(5, Duration::ZERO, now);
    assert_eq!(c.offset(), 20.0);
    c.step_pages(-9, Duration::ZERO, now);
    assert_eq!(c.offset(), 0.0);
}

#[test]
fn carousel_drag_clamps_and_snaps_on_release() {
    let now = Instant::now();
    let mut c = Carousel::new(3);
    c.set_page_width(10.0);

    c.begin_drag(50.0);
    assert_eq!(c.drag_to(60.0), None); // would go below zero
    assert_eq!(c.drag_to(36.0), Some(14.0));
    c.end_drag(Duration::ZERO, now);
    assert!(!c.is_dragging());
    assert_eq!(c.offset(), 10.0);

    c.begin_drag(0.0);
    assert_eq!(c.drag_to(-500.0), Some(20.0));
}

// ----- screen -----

#[test]
fn mount_sets_up_subscribes_and_queues_playlist() {
    let player = FakePlayer::new();
    let options = ScreenOptions {
        repeat: RepeatMode::Queue,
        ..ScreenOptions::default()
    };
    let screen = PlayerScreen::mount(playlist(3), &player, options);

    assert_eq!(
        player.take_commands(),
        vec![
            Command::Setup,
            Command::AddTracks(3),
            Command::SetRepeat(RepeatMode::Queue)
        ]
    );
    assert!(screen.is_subscribed());
    assert_eq!(player.subscriber_count(), 1);
    assert_eq!(screen.now_playing.as_ref().map(|n| n.title.as_str()), Some("Song 0"));
    assert_eq!(screen.repeat, RepeatMode::Queue);
}

#[test]
fn mount_with_autoplay_starts_playback() {
    let player = FakePlayer::new();
    let options = ScreenOptions {
        autoplay: true,
        ..ScreenOptions::default()
    };
    let _screen = PlayerScreen::mount(playlist(2), &player, options);
    assert_eq!(player.take_commands().last(), Some(&Command::Play));
}

#[test]
fn mount_survives_setup_failure() {
    let player = FakePlayer::new();
    player.fail_setup.set(true);

    let screen = PlayerScreen::mount(playlist(3), &player, ScreenOptions::default());

    assert!(!screen.is_subscribed());
    assert!(screen.status.as_deref().unwrap().contains("audio unavailable"));
    assert!(player.take_commands().is_empty());
}

#[test]
fn swipe_on_screen_skips_player() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    screen.begin_swipe(100.0);
    screen.swipe_to(20.0, &player, now);
    screen.end_swipe(now);

    assert_eq!(player.skips(), vec![2]);
    assert_eq!(screen.sync.index(), 2);
}

#[test]
fn next_button_scroll_issues_skip_when_animation_lands() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    screen.next_page(now);
    screen.tick(&player, later(now));

    assert_eq!(player.skips(), vec![1]);
    assert_eq!(screen.carousel.current_page(), 1);
}

#[test]
fn resize_during_page_scroll_still_skips_player() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    screen.next_page(now);
    screen.tick(&player, now + Duration::from_millis(5));
    assert!(player.skips().is_empty());

    // The resize lands the scroll on page 1 without any further tick.
    screen.set_viewport(2.0 * PAGE, 100.0, &player, now + Duration::from_millis(6));
    screen.tick(&player, later(now));

    assert_eq!(screen.carousel.current_page(), 1);
    assert_eq!(screen.sync.index(), 1);
    assert_eq!(player.skips(), vec![1]);
}

#[test]
fn resize_during_follow_scroll_does_not_skip() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    player.emit(PlayerEvent::TrackChanged {
        previous: Some(0),
        next: Some(2),
    });
    screen.pump_events(&player, now);
    screen.tick(&player, now + Duration::from_millis(5));
    screen.set_viewport(2.0 * PAGE, 100.0, &player, now + Duration::from_millis(6));

    assert_eq!(screen.carousel.current_page(), 2);
    assert!(player.skips().is_empty());
}

#[test]
fn player_auto_advance_moves_carousel_without_skipping() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    player.emit(PlayerEvent::TrackChanged {
        previous: Some(0),
        next: Some(1),
    });
    screen.pump_events(&player, now);

    assert_eq!(screen.now_playing.as_ref().map(|n| n.index), Some(1));
    assert!(screen.carousel.is_following());

    screen.tick(&player, later(now));
    assert_eq!(screen.carousel.offset(), PAGE);
    assert!(player.skips().is_empty());
}

#[test]
fn queue_ended_wraps_screen_to_first_track() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    player.emit(PlayerEvent::TrackChanged {
        previous: Some(1),
        next: Some(2),
    });
    screen.pump_events(&player, now);
    screen.tick(&player, later(now));
    assert_eq!(screen.carousel.current_page(), 2);

    let now = later(now);
    player.emit(PlayerEvent::QueueEnded { track: 2 });
    screen.pump_events(&player, now);
    screen.tick(&player, later(now));

    assert_eq!(player.skips(), vec![0]);
    assert_eq!(screen.sync.index(), 0);
    assert_eq!(screen.carousel.offset(), 0.0);
}

#[test]
fn late_queue_end_keeps_the_swiped_to_track() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    screen.begin_swipe(100.0);
    screen.swipe_to(60.0, &player, now);
    screen.end_swipe(now);
    assert_eq!(player.skips(), vec![1]);

    player.emit(PlayerEvent::QueueEnded { track: 0 });
    player.emit(PlayerEvent::TrackChanged {
        previous: Some(0),
        next: Some(1),
    });
    screen.pump_events(&player, now);
    screen.tick(&player, later(now));

    assert_eq!(player.skips(), vec![1]);
    assert_eq!(screen.sync.index(), 1);
    assert_eq!(screen.carousel.current_page(), 1);
}

#[test]
fn skip_failure_reports_status_and_scrolls_back() {
    let now = Instant::now();
    let (player, mut screen) = mounted(3);

    screen.begin_swipe(100.0);
    screen.swipe_to(60.0, &player, now);
    screen.end_swipe(now);
    assert_eq!(player.skips(), vec![1]);

    player.emit(PlayerEvent::SkipFailed {
        index: 1,
        reason: "file missing".into(),
    });
    screen.pump_events(&player, now);
    screen.tick(&player, later(now));

    assert!(screen.status.as_deref().unwrap().contains("file missing"));
    assert_eq!(screen.sync.index(), 0);
    assert_eq!(screen.carousel.offset(), 0.0);
    assert_eq!(player.skips(), vec![1]);
}

#[test]
fn seek_gesture_on_screen_previews_then_seeks() {
    let now = Instant::now();
    let (player, mut screen) = mounted(1);
    *player.snapshot.borrow_mut() = PlaybackSnapshot {
        track_index: Some(0),
        state: TransportState::Playing,
        position: 10.0,
        duration: 200.0,
        ..PlaybackSnapshot::default()
    };
    screen.tick(&player, now);
    assert_eq!(screen.elapsed_label(), "0:10");
    assert_eq!(screen.remaining_label(), "-3:10");

    screen.begin_seek(0.0);
    screen.seek_move(50.0);
    assert_eq!(screen.displayed_fraction(), 0.5);
    assert_eq!(screen.elapsed_label(), "1:40");
    assert_eq!(screen.remaining_label(), "-1:40");

    assert_eq!(screen.end_seek(&player), Some(100.0));
    assert_eq!(player.seeks(), vec![100.0]);
    assert!(!screen.seek.is_seeking());
}

#[test]
fn toggle_playback_follows_transport_state() {
    let (player, mut screen) = mounted(2);

    // No current track yet: nothing happens.
    screen.toggle_playback(&player);
    assert!(player.take_commands().is_empty());

    player.snapshot.borrow_mut().track_index = Some(0);
    player.snapshot.borrow_mut().state = TransportState::Ready;
    screen.toggle_playback(&player);
    player.snapshot.borrow_mut().state = TransportState::Playing;
    screen.toggle_playback(&player);
    player.snapshot.borrow_mut().state = TransportState::Paused;
    screen.toggle_playback(&player);

    assert_eq!(
        player.take_commands(),
        vec![Command::Play, Command::Pause, Command::Play]
    );
}

#[test]
fn repeat_button_cycles_modes() {
    let (player, mut screen) = mounted(2);
    screen.cycle_repeat(&player);
    screen.cycle_repeat(&player);
    screen.cycle_repeat(&player);

    assert_eq!(
        player.take_commands(),
        vec![
            Command::SetRepeat(RepeatMode::Track),
            Command::SetRepeat(RepeatMode::Queue),
            Command::SetRepeat(RepeatMode::Off),
        ]
    );
    assert_eq!(screen.repeat, RepeatMode::Off);
}

#[test]
fn scrub_is_clamped_to_track() {
    let (player, mut screen) = mounted(1);
    *player.snapshot.borrow_mut() = PlaybackSnapshot {
        track_index: Some(0),
        position: 3.0,
        duration: 100.0,
        ..PlaybackSnapshot::default()
    };
    screen.scrub(-5, &player);
    player.snapshot.borrow_mut().position = 98.0;
    screen.scrub(5, &player);

    assert_eq!(player.seeks(), vec![0.0, 100.0]);
}

#[test]
fn unmount_releases_subscription_and_stops_player() {
    let (player, mut screen) = mounted(3);
    screen.begin_seek(20.0);
    assert_eq!(player.subscriber_count(), 1);

    screen.unmount(&player);

    assert_eq!(player.subscriber_count(), 0);
    assert_eq!(player.take_commands(), vec![Command::Stop, Command::Reset]);
    assert!(player.seeks().is_empty());
}

// ----- properties -----

proptest! {
    #[test]
    fn candidate_index_is_rounded_and_in_range(
        offset in -1_000.0f64..10_000.0,
        width in 1.0f64..500.0,
        len in 1usize..50,
    ) {
        let idx = candidate_index(offset, width, len).unwrap();
        let expected = (offset / width).round().max(0.0).min((len - 1) as f64) as usize;
        prop_assert_eq!(idx, expected);
        prop_assert!(idx < len);
    }

    #[test]
    fn bar_fraction_is_always_a_fraction(
        pending in -1_000.0f64..1_000.0,
        width in 0.0f64..500.0,
    ) {
        let f = bar_fraction(pending, width);
        prop_assert!((0.0..=1.0).contains(&f));
        if width == 0.0 {
            prop_assert_eq!(f, 0.0);
        }
    }

    #[test]
    fn same_offset_twice_issues_one_skip(page in 0usize..8) {
        let player = ready_player(8);
        let mut sync = Synchronizer::new(8);
        let offset = page as f64 * PAGE;
        sync.on_scroll(offset, PAGE, &player);
        sync.on_scroll(offset, PAGE, &player);
        let expected = if page == 0 { 0 } else { 1 };
        prop_assert_eq!(player.skips().len(), expected);
    }
}
