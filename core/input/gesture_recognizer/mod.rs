// TwinzoneTouch ジェスチャー認識モジュール
// 接触点をゾーンごとの認識器に振り分け、スワイプとジョイスティックの状態を提供する

//! ジェスチャー認識モジュール
//!
//! 接触点は最初に観測されたフレームのゾーンで所有者が決まり、
//! 離されるまで同じ認識器が処理します。
//! 左ゾーンは [`SwipeTracker`]、右ゾーンは [`VirtualJoystick`] が担当します。

pub mod gesture_recognizer;
pub mod joystick_recognizer;
pub mod swipe_recognizer;
pub mod zone_router;

// 主要な型の再エクスポート
pub use gesture_recognizer::{
    Direction, DirectionFlags, GestureRecognizer, SwipeInfo, TouchId, TouchSample,
};
pub use joystick_recognizer::{JoystickState, VirtualJoystick};
pub use swipe_recognizer::{SwipeTouchState, SwipeTracker};
pub use zone_router::{Zone, ZoneRouter};

use glam::Vec2;
use log::trace;

use crate::core::settings::GestureSettings;

/// スワイプ認識とジョイスティックを束ねたタッチハンドラ
pub struct TouchGestureHandler {
    router: ZoneRouter,
    swipe: SwipeTracker,
    joystick: VirtualJoystick,
}

impl Default for TouchGestureHandler {
    fn default() -> Self {
        Self::new(&GestureSettings::default())
    }
}

impl TouchGestureHandler {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            router: ZoneRouter::new(settings.screen_width),
            swipe: SwipeTracker::from_settings(settings),
            joystick: VirtualJoystick::from_settings(settings),
        }
    }

    /// フレームごとの更新
    ///
    /// 既に所有者がいる接触はその認識器へ、新しい接触は現在の画面幅でゾーン判定して振り分けます。
    pub fn update(&mut self, contacts: &[TouchSample], now_ms: u64) {
        let mut left = Vec::with_capacity(contacts.len());
        let mut right = Vec::with_capacity(contacts.len());

        for contact in contacts {
            if self.swipe.is_tracking(contact.id) {
                left.push(*contact);
            } else if self.joystick.is_tracking(contact.id) {
                right.push(*contact);
            } else {
                let zone = self.router.zone_of(contact);
                trace!("新しい接触 {} を{:?}ゾーンに割り当て", contact.id, zone);
                match zone {
                    Zone::Left => left.push(*contact),
                    Zone::Right => right.push(*contact),
                }
            }
        }

        self.swipe.update(&left, now_ms);
        self.joystick.update(&right, now_ms);
    }

    /// 画面寸法を反映（ゾーン境界とジョイスティックの待機位置）
    pub fn set_screen_dimensions(&mut self, width: u32, height: u32) {
        self.router.set_screen_width(width);
        self.joystick.set_screen_dimensions(width, height);
    }

    /// すべての認識器をリセット
    pub fn reset_all(&mut self) {
        let recognizers: [&mut dyn GestureRecognizer; 2] = [&mut self.swipe, &mut self.joystick];
        for recognizer in recognizers {
            trace!("{} をリセット", recognizer.name());
            recognizer.reset();
        }
    }

    /// アクティブな接触があるかどうか
    pub fn has_active_touches(&self) -> bool {
        self.swipe.is_active() || self.joystick.is_active()
    }

    pub fn is_swipe_detected(&self, direction: Direction) -> bool {
        self.swipe.is_swipe_detected(direction)
    }

    pub fn is_holding(&self) -> bool {
        self.swipe.is_holding()
    }

    pub fn swipe_info(&self) -> SwipeInfo {
        self.swipe.swipe_info()
    }

    pub fn fire_joystick_position(&self) -> Vec2 {
        self.joystick.fire_joystick_position()
    }

    pub fn is_fire_triggered(&self) -> bool {
        self.joystick.is_fire_triggered()
    }

    pub fn is_firing(&self) -> bool {
        self.joystick.is_firing()
    }

    pub fn fire_direction(&self) -> Option<Vec2> {
        self.joystick.fire_direction()
    }

    pub fn router(&self) -> &ZoneRouter {
        &self.router
    }

    pub fn swipe(&self) -> &SwipeTracker {
        &self.swipe
    }

    pub fn joystick(&self) -> &VirtualJoystick {
        &self.joystick
    }
}
