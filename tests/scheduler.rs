// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Uploads follow playback: once per tick while playing, never while paused.
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

mod support;

use moving_images::ScaleMode;
use moving_images::media::{MediaEvent, ReadyState};
use support::{FakeVideo, Harness};

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn uploads_once_per_tick_while_playing() {
    let harness = Harness::new();
    let video = FakeVideo::decodable(640, 480);
    let texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");
    assert!(!texture.auto_update());
    assert_eq!(harness.ticks.pending(), 0);

    video.fire(MediaEvent::Play);
    assert!(texture.auto_update());
    assert_eq!(harness.ticks.pending(), 1);

    harness.ticks.tick();
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 2);

    video.fire(MediaEvent::Pause);
    assert!(!texture.auto_update());
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 2);
    assert_eq!(harness.ticks.pending(), 0);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn repeated_play_keeps_one_request() {
    let harness = Harness::new();
    let video = FakeVideo::decodable(16, 16);
    let _texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    video.fire(MediaEvent::Play);
    video.fire(MediaEvent::Play);
    video.fire(MediaEvent::Play);
    assert_eq!(harness.ticks.pending(), 1);

    harness.ticks.tick();
    assert_eq!(harness.uploads(), 1);
    assert_eq!(harness.ticks.pending(), 1);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn play_pause_play_leaves_one_live_request() {
    let harness = Harness::new();
    let video = FakeVideo::decodable(16, 16);
    let _texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    video.fire(MediaEvent::Play);
    video.fire(MediaEvent::Pause);
    video.fire(MediaEvent::Play);

    //the first request is stale and drops itself on delivery
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 1);
    assert_eq!(harness.ticks.pending(), 1);

    harness.ticks.tick();
    assert_eq!(harness.uploads(), 2);
    assert_eq!(harness.ticks.pending(), 1);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn pause_without_play_is_harmless() {
    let harness = Harness::new();
    let video = FakeVideo::decodable(16, 16);
    let texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    video.fire(MediaEvent::Pause);
    assert!(!texture.auto_update());
    assert_eq!(harness.ticks.pending(), 0);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn ticks_before_ready_do_not_upload() {
    let harness = Harness::new();
    let video = FakeVideo::buffering();
    let texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    //the engine may report play before it has buffered anything
    video.fire(MediaEvent::Play);
    harness.ticks.tick();
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 0);
    assert_eq!(harness.ticks.pending(), 1);

    video.set_buffered(ReadyState::HaveEnoughData, 32, 32);
    video.fire(MediaEvent::CanPlay);
    assert!(texture.is_ready());
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 1);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn synchronous_play_starts_updates() {
    let harness = Harness::new();
    let video = FakeVideo::decodable(16, 16);
    video.dispatch_on_play(true);
    let texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    assert!(texture.auto_update());
    assert_eq!(harness.ticks.pending(), 1);
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 1);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn manual_update_only_when_ready() {
    let harness = Harness::new();
    let video = FakeVideo::buffering();
    let texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    texture.update();
    assert_eq!(harness.uploads(), 0);

    video.set_buffered(ReadyState::HaveFutureData, 8, 8);
    video.fire(MediaEvent::CanPlay);
    texture.update();
    assert_eq!(harness.uploads(), 1);

    texture.destroy();
    texture.update();
    assert_eq!(harness.uploads(), 1);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn destroy_stops_ticking() {
    let harness = Harness::new();
    let video = FakeVideo::decodable(16, 16);
    let texture = harness
        .textures
        .from_source(video.clone(), ScaleMode::Linear)
        .expect("texture");

    video.fire(MediaEvent::Play);
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 1);

    texture.destroy();
    harness.ticks.tick();
    assert_eq!(harness.uploads(), 1);
    assert_eq!(harness.ticks.pending(), 0);
}
