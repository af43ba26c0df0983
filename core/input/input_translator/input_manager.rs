// TwinzoneTouch 入力マネージャー
// フレームごとの入力更新と、ゲームロジック向けの問い合わせを担当するシステム

use glam::Vec2;
use log::{debug, info};

use crate::core::input::gesture_recognizer::{Direction, SwipeInfo, TouchGestureHandler};
use crate::core::settings::GestureSettings;
use super::clock::{Clock, MonotonicClock};
use super::keyboard_handler::{KeyStateHandler, KeyboardHandler};
use super::touch_source::{ScriptedTouchSource, TouchSource};

/// 入力マネージャー
///
/// ホストが一つだけ生成し、参照で各コンシューマに渡します。
/// [`update`](Self::update) はフレームごとに一度、同じフレームの問い合わせより前に呼び出してください。
/// 同時に複数スレッドから `update` を呼ぶことはサポートしません。
pub struct InputManager {
    // ハンドラ
    keyboard: Box<dyn KeyboardHandler>,
    touch: TouchGestureHandler,

    // 外部入力源
    touch_source: Box<dyn TouchSource>,
    clock: Box<dyn Clock>,

    // 画面寸法も含めた現在の設定
    settings: GestureSettings,

    frame_count: u64,
    last_update_ms: Option<u64>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

impl InputManager {
    /// 新しい入力マネージャーを作成
    ///
    /// タッチ入力源は空、キーボードは何も押されていない状態、時計は単調時計で初期化されます。
    /// 実際の入力源は `with_*` で差し替えてください。
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            keyboard: Box::new(KeyStateHandler::default()),
            touch: TouchGestureHandler::new(&settings),
            touch_source: Box::new(ScriptedTouchSource::new()),
            clock: Box::new(MonotonicClock::new()),
            settings,
            frame_count: 0,
            last_update_ms: None,
        }
    }

    pub fn with_touch_source(mut self, source: Box<dyn TouchSource>) -> Self {
        self.touch_source = source;
        self
    }

    pub fn with_keyboard_handler(mut self, keyboard: Box<dyn KeyboardHandler>) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// フレームごとの更新
    pub fn update(&mut self) {
        // 時刻はフレームにつき一度だけ読む
        let now_ms = self.clock.now_ms();
        if let Some(last) = self.last_update_ms {
            if now_ms < last {
                debug!("時計が逆行しました: {} -> {} ms", last, now_ms);
            }
        }

        let contacts = self.touch_source.poll();
        self.touch.update(&contacts, now_ms);
        self.keyboard.update();

        self.last_update_ms = Some(now_ms);
        self.frame_count += 1;
    }

    /// 画面寸法を設定（ゾーン境界とジョイスティックの待機位置に反映）
    pub fn set_screen_dimensions(&mut self, width: u32, height: u32) {
        if (width, height) != self.screen_dimensions() {
            info!(
                "画面寸法を変更しました: {}x{} -> {}x{}",
                self.settings.screen_width, self.settings.screen_height, width, height
            );
        }
        self.settings.screen_width = width;
        self.settings.screen_height = height;
        self.touch.set_screen_dimensions(width, height);
    }

    pub fn screen_dimensions(&self) -> (u32, u32) {
        (self.settings.screen_width, self.settings.screen_height)
    }

    /// このフレームで指定方向のスワイプ（フリック）が検出されたか
    pub fn is_swipe_detected(&self, direction: Direction) -> bool {
        self.touch.is_swipe_detected(direction)
    }

    /// 左ゾーンでスワイプが継続中か
    pub fn is_holding(&self) -> bool {
        self.touch.is_holding()
    }

    pub fn swipe_info(&self) -> SwipeInfo {
        self.touch.swipe_info()
    }

    /// 射撃ジョイスティックの位置（非操作時は待機位置）
    pub fn fire_joystick_position(&self) -> Vec2 {
        self.touch.fire_joystick_position()
    }

    pub fn is_fire_triggered(&self) -> bool {
        self.touch.is_fire_triggered()
    }

    pub fn is_firing(&self) -> bool {
        self.touch.is_firing()
    }

    pub fn fire_direction(&self) -> Option<Vec2> {
        self.touch.fire_direction()
    }

    /// 移動方向
    ///
    /// スワイプのホールド方向を優先し、なければキーボードで押されている方向を返します。
    pub fn movement_direction(&self) -> Direction {
        match self.touch.swipe_info().direction {
            Direction::None => self.keyboard.held_direction(),
            direction => direction,
        }
    }

    /// 移動方向の単位ベクトル（画面座標、移動なしはゼロ）
    pub fn movement_vector(&self) -> Vec2 {
        self.movement_direction().unit_vector()
    }

    /// このフレームで移動操作が発生したか（フリックまたはキー押下）
    pub fn is_move_triggered(&self, direction: Direction) -> bool {
        self.touch.is_swipe_detected(direction) || self.keyboard.is_direction_pressed(direction)
    }

    pub fn touch(&self) -> &TouchGestureHandler {
        &self.touch
    }

    pub fn keyboard(&self) -> &dyn KeyboardHandler {
        self.keyboard.as_ref()
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
