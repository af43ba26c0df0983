use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twinzone_touch::core::input::{
    ManualClock, ScriptedTouchSource, SwipeTracker, TouchGestureHandler, TouchSample,
};
use twinzone_touch::core::settings::GestureSettings;
use twinzone_touch::InputManager;

/// 左右それぞれで指を動かし続けるフレーム列
fn create_frames(count: usize) -> Vec<Vec<TouchSample>> {
    (0..count)
        .map(|i| {
            let step = (i % 40) as i32;
            vec![
                TouchSample::new(1, 50 + step * 3, 200),
                TouchSample::new(2, 100, 300 - step * 2),
                TouchSample::new(3, 480 + step, 300 + step),
                TouchSample::new(4, 600, 100),
            ]
        })
        .collect()
}

fn benchmark_touch_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_update");
    let frames = create_frames(240);

    group.bench_function("swipe_tracker", |b| {
        b.iter(|| {
            let mut tracker = SwipeTracker::new();
            for (i, frame) in frames.iter().enumerate() {
                tracker.update(black_box(&frame[..2]), i as u64 * 16);
            }
            black_box(tracker.swipe_info())
        })
    });

    group.bench_function("touch_gesture_handler", |b| {
        b.iter(|| {
            let mut handler = TouchGestureHandler::new(&GestureSettings::default());
            for (i, frame) in frames.iter().enumerate() {
                handler.update(black_box(frame), i as u64 * 16);
            }
            black_box(handler.fire_joystick_position())
        })
    });

    group.bench_function("input_manager", |b| {
        b.iter(|| {
            let clock = ManualClock::new(0);
            let mut manager = InputManager::default()
                .with_touch_source(Box::new(ScriptedTouchSource::from_frames(frames.clone())))
                .with_clock(Box::new(clock.clone()));
            for _ in 0..frames.len() {
                manager.update();
                clock.advance(16);
            }
            black_box(manager.movement_direction())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_touch_update);
criterion_main!(benches);
