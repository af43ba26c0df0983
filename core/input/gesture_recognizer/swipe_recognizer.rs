// TwinzoneTouch スワイプ認識器
// 左ゾーンの接触ごとに方向スワイプを検出し、フリックと継続ホールドを提供する

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use log::{debug, trace};

use crate::core::settings::GestureSettings;
use super::gesture_recognizer::{
    angle_delta, Direction, DirectionFlags, GestureRecognizer, SwipeInfo, TouchId, TouchSample,
};

/// 左ゾーンの接触ごとの追跡状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTouchState {
    /// 接触開始位置
    pub start_pos: Vec2,
    /// 変位の基準点（ヒステリシスでのみ更新）
    pub last_significant_pos: Vec2,
    /// 最新の位置
    pub current_pos: Vec2,
    /// 接触開始時刻 (ミリ秒)
    pub start_time_ms: u64,
    /// 最後に判定された方向
    pub last_direction: Direction,
    /// 最後に閾値を超えたフレームの角度
    pub last_angle: Option<f32>,
}

impl SwipeTouchState {
    fn new(position: Vec2, now_ms: u64) -> Self {
        Self {
            start_pos: position,
            last_significant_pos: position,
            current_pos: position,
            start_time_ms: now_ms,
            last_direction: Direction::None,
            last_angle: None,
        }
    }
}

/// スワイプ追跡器
///
/// 各接触の基準点からの変位を毎フレーム測定し、閾値以上であれば方向を判定します。
/// 接触開始から `max_swipe_duration_ms` 以内ならそのフレームだけ
/// [`is_swipe_detected`](Self::is_swipe_detected) が真になり、
/// 時間に関係なく離すまで [`is_holding`](Self::is_holding) が真になります。
pub struct SwipeTracker {
    touches: HashMap<TouchId, SwipeTouchState>,
    detected: DirectionFlags,
    holding_direction: DirectionFlags,
    is_holding: bool,
    active_touch: Option<TouchId>,
    info: SwipeInfo,
    swipe_threshold: f32,
    max_swipe_duration_ms: u64,
    hysteresis_distance: f32,
    hysteresis_angle: f32,
    min_elapsed_secs: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::from_settings(&GestureSettings::default())
    }

    pub fn from_settings(settings: &GestureSettings) -> Self {
        Self {
            touches: HashMap::new(),
            detected: DirectionFlags::default(),
            holding_direction: DirectionFlags::default(),
            is_holding: false,
            active_touch: None,
            info: SwipeInfo::default(),
            swipe_threshold: settings.swipe_threshold_px,
            max_swipe_duration_ms: settings.max_swipe_duration_ms,
            hysteresis_distance: settings.hysteresis_distance_px,
            hysteresis_angle: settings.hysteresis_angle_rad,
            min_elapsed_secs: settings.min_elapsed_secs,
        }
    }

    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    pub fn with_max_swipe_duration_ms(mut self, duration_ms: u64) -> Self {
        self.max_swipe_duration_ms = duration_ms;
        self
    }

    /// フレームごとの更新
    ///
    /// `contacts` はこの追跡器に割り当てられた接触の全集合です。
    /// 前フレームにあって今回ない接触は離されたものとして扱います。
    pub fn update(&mut self, contacts: &[TouchSample], now_ms: u64) {
        // 一回限りのフラグは1フレームだけ有効
        self.detected.clear();

        let present: HashSet<TouchId> = contacts.iter().map(|c| c.id).collect();

        // 新しい接触の登録
        let mut started = HashSet::new();
        for contact in contacts {
            if !self.touches.contains_key(&contact.id) {
                trace!("スワイプ接触開始: {} ({}, {})", contact.id, contact.x, contact.y);
                self.touches
                    .insert(contact.id, SwipeTouchState::new(contact.position(), now_ms));
                started.insert(contact.id);
            }
        }

        // 離された接触の削除
        let released: Vec<TouchId> = self
            .touches
            .keys()
            .filter(|id| !present.contains(id))
            .copied()
            .collect();
        for id in released {
            self.release(id);
        }

        // 継続中の接触の測定（開始フレームはスワイプを報告しない）
        for contact in contacts {
            if !started.contains(&contact.id) {
                self.track(contact, now_ms);
            }
        }
    }

    fn release(&mut self, id: TouchId) {
        self.touches.remove(&id);
        self.holding_direction.clear();
        self.is_holding = false;

        // どの接触が離されてもホールド解除と同じく測定値を消す
        self.active_touch = None;
        self.info = SwipeInfo::default();

        trace!("スワイプ接触終了: {}", id);
    }

    fn track(&mut self, contact: &TouchSample, now_ms: u64) {
        let Some(state) = self.touches.get_mut(&contact.id) else {
            return;
        };

        state.current_pos = contact.position();

        let delta = state.current_pos - state.last_significant_pos;
        let distance = delta.length();
        let angle = delta.y.atan2(delta.x);
        let elapsed_ms = now_ms.saturating_sub(state.start_time_ms);
        let elapsed_secs = elapsed_ms as f32 / 1000.0;
        let speed = distance / elapsed_secs.max(self.min_elapsed_secs);

        // 閾値未満の揺れは基準点も含めて何も変更しない
        if distance < self.swipe_threshold {
            return;
        }

        let direction = Direction::from_angle(angle);

        let angle_changed = state
            .last_angle
            .map_or(true, |previous| angle_delta(angle, previous).abs() > self.hysteresis_angle);
        if distance > self.hysteresis_distance || angle_changed {
            state.last_significant_pos = state.current_pos;
        }
        state.last_direction = direction;
        state.last_angle = Some(angle);

        self.active_touch = Some(contact.id);
        self.info = SwipeInfo {
            angle_radians: angle,
            direction,
            distance_px: distance,
            speed_px_per_sec: speed,
        };
        self.is_holding = true;

        if elapsed_ms <= self.max_swipe_duration_ms {
            self.detected.set(direction);
            debug!(
                "スワイプ検出: {} {:?} 距離={:.1} 速度={:.1}",
                contact.id, direction, distance, speed
            );
        }
        self.holding_direction.set(direction);
    }

    /// このフレームで指定方向のフリックが検出されたか
    pub fn is_swipe_detected(&self, direction: Direction) -> bool {
        self.detected.get(direction)
    }

    /// いずれかの接触がスワイプを継続中か
    pub fn is_holding(&self) -> bool {
        self.is_holding
    }

    pub fn is_holding_direction(&self, direction: Direction) -> bool {
        self.holding_direction.get(direction)
    }

    /// 現在アクティブなスワイプの情報
    ///
    /// 方向はアクティブな接触（最後に閾値を超えた接触）の方向がまだホールド中ならそれを、
    /// そうでなければ上・下・左・右の順で最初にホールド中の方向を報告します。
    pub fn swipe_info(&self) -> SwipeInfo {
        let active_direction = self
            .active_touch
            .and_then(|id| self.touches.get(&id))
            .map(|state| state.last_direction)
            .filter(|direction| self.holding_direction.get(*direction));

        SwipeInfo {
            direction: active_direction.unwrap_or_else(|| self.holding_direction.first_set()),
            ..self.info
        }
    }

    pub fn touch_state(&self, id: TouchId) -> Option<&SwipeTouchState> {
        self.touches.get(&id)
    }

    pub fn tracked_count(&self) -> usize {
        self.touches.len()
    }
}

impl GestureRecognizer for SwipeTracker {
    fn name(&self) -> &'static str {
        "Swipe Tracker"
    }

    fn update(&mut self, contacts: &[TouchSample], now_ms: u64) {
        SwipeTracker::update(self, contacts, now_ms);
    }

    fn is_tracking(&self, id: TouchId) -> bool {
        self.touches.contains_key(&id)
    }

    fn reset(&mut self) {
        self.touches.clear();
        self.detected.clear();
        self.holding_direction.clear();
        self.is_holding = false;
        self.active_touch = None;
        self.info = SwipeInfo::default();
    }

    fn is_active(&self) -> bool {
        !self.touches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, x: i32, y: i32) -> Vec<TouchSample> {
        vec![TouchSample::new(id, x, y)]
    }

    #[test]
    fn test_new_contact_reports_nothing() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);

        assert_eq!(tracker.tracked_count(), 1);
        assert!(!tracker.is_holding());
        assert!(Direction::CARDINALS.iter().all(|d| !tracker.is_swipe_detected(*d)));
        assert_eq!(tracker.swipe_info(), SwipeInfo::default());
    }

    #[test]
    fn test_flick_fires_once_then_holds() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);

        tracker.update(&touch(1, 50, 10), 16);
        assert!(tracker.is_swipe_detected(Direction::Right));
        assert!(!tracker.is_swipe_detected(Direction::Left));
        assert!(tracker.is_holding());
        assert!(tracker.is_holding_direction(Direction::Right));

        let info = tracker.swipe_info();
        assert_eq!(info.direction, Direction::Right);
        assert_eq!(info.distance_px, 40.0);
        assert_eq!(info.angle_radians, 0.0);

        // 指を止めても検出は1フレームのみ、ホールドは継続
        tracker.update(&touch(1, 50, 10), 32);
        assert!(!tracker.is_swipe_detected(Direction::Right));
        assert!(tracker.is_holding());

        tracker.update(&touch(1, 52, 11), 48);
        assert!(!tracker.is_swipe_detected(Direction::Right));
        assert!(tracker.is_holding());
        assert_eq!(tracker.swipe_info().direction, Direction::Right);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 100, 100), 0);
        tracker.update(&touch(1, 100, 130), 16);

        assert!(tracker.is_swipe_detected(Direction::Down));
        assert!(tracker.is_holding());
    }

    #[test]
    fn test_slow_swipe_holds_without_flick() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 100, 100), 0);
        tracker.update(&touch(1, 100, 100), 400);
        tracker.update(&touch(1, 100, 60), 500);

        assert!(!tracker.is_swipe_detected(Direction::Up));
        assert!(tracker.is_holding());
        assert!(tracker.is_holding_direction(Direction::Up));
        assert_eq!(tracker.swipe_info().direction, Direction::Up);
    }

    #[test]
    fn test_speed_uses_elapsed_since_start() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 1_000);
        tracker.update(&touch(1, 50, 10), 1_100);

        let info = tracker.swipe_info();
        assert!((info.speed_px_per_sec - 400.0).abs() < 0.01);
    }

    #[test]
    fn test_backwards_clock_is_clamped() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 500);
        tracker.update(&touch(1, 50, 10), 100);

        let info = tracker.swipe_info();
        assert!(info.speed_px_per_sec.is_finite());
        assert!((info.speed_px_per_sec - 40_000.0).abs() < 1.0);
        assert!(tracker.is_swipe_detected(Direction::Right));
    }

    #[test]
    fn test_sub_threshold_jitter_has_no_effect() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);

        let mut now = 0;
        for step in 1..=5 {
            now += 16;
            tracker.update(&touch(1, 10 + step * 5, 10), now);
            assert!(!tracker.is_holding());
            assert!(Direction::CARDINALS.iter().all(|d| !tracker.is_swipe_detected(*d)));
            assert!(Direction::CARDINALS.iter().all(|d| !tracker.is_holding_direction(*d)));
        }

        for x in [12, 7, 13, 9, 14, 10] {
            now += 16;
            tracker.update(&touch(1, x, 12), now);
            assert!(!tracker.is_holding());
        }

        let state = tracker.touch_state(TouchId(1)).copied();
        assert_eq!(state.map(|s| s.last_significant_pos), Some(Vec2::new(10.0, 10.0)));
        assert_eq!(state.map(|s| s.last_direction), Some(Direction::None));
    }

    #[test]
    fn test_hysteresis_keeps_anchor_for_small_straight_moves() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);

        // 初回の閾値超えは基準点を更新する
        tracker.update(&touch(1, 50, 10), 16);
        let anchor = tracker.touch_state(TouchId(1)).map(|s| s.last_significant_pos);
        assert_eq!(anchor, Some(Vec2::new(50.0, 10.0)));

        // 同じ角度で60px以下の移動は基準点を動かさない
        tracker.update(&touch(1, 90, 10), 32);
        let anchor = tracker.touch_state(TouchId(1)).map(|s| s.last_significant_pos);
        assert_eq!(anchor, Some(Vec2::new(50.0, 10.0)));
        assert!(tracker.is_swipe_detected(Direction::Right));

        // 60pxを超えると更新
        tracker.update(&touch(1, 130, 10), 48);
        let anchor = tracker.touch_state(TouchId(1)).map(|s| s.last_significant_pos);
        assert_eq!(anchor, Some(Vec2::new(130.0, 10.0)));
    }

    #[test]
    fn test_hysteresis_follows_direction_change() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);
        tracker.update(&touch(1, 50, 10), 16);

        // 角度が0.2rad以上変わると距離が小さくても基準点を更新
        tracker.update(&touch(1, 50, 50), 32);
        let state = tracker.touch_state(TouchId(1)).copied();
        assert_eq!(state.map(|s| s.last_significant_pos), Some(Vec2::new(50.0, 50.0)));
        assert_eq!(state.map(|s| s.last_direction), Some(Direction::Down));
        assert!(tracker.is_swipe_detected(Direction::Down));
        assert!(!tracker.is_swipe_detected(Direction::Right));

        // ホールドフラグは離すまで累積する
        assert!(tracker.is_holding_direction(Direction::Right));
        assert!(tracker.is_holding_direction(Direction::Down));
        assert_eq!(tracker.swipe_info().direction, Direction::Down);
    }

    #[test]
    fn test_release_clears_holding_and_info() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);
        tracker.update(&touch(1, 50, 10), 16);
        assert!(tracker.is_holding());

        tracker.update(&[], 32);
        assert_eq!(tracker.tracked_count(), 0);
        assert!(!tracker.is_holding());
        assert!(!tracker.is_swipe_detected(Direction::Right));
        assert!(!tracker.is_holding_direction(Direction::Right));

        let info = tracker.swipe_info();
        assert_eq!(info.distance_px, 0.0);
        assert_eq!(info.speed_px_per_sec, 0.0);
        assert_eq!(info.direction, Direction::None);
    }

    #[test]
    fn test_release_of_other_contact_clears_all_holding() {
        let mut tracker = SwipeTracker::new();
        tracker.update(
            &[TouchSample::new(1, 10, 10), TouchSample::new(2, 100, 100)],
            0,
        );
        tracker.update(
            &[TouchSample::new(1, 50, 10), TouchSample::new(2, 100, 140)],
            16,
        );
        assert!(tracker.is_swipe_detected(Direction::Right));
        assert!(tracker.is_swipe_detected(Direction::Down));
        // 最後に閾値を超えた接触がアクティブ
        assert_eq!(tracker.swipe_info().direction, Direction::Down);

        // 非アクティブな接触を離しても全方向のホールドが解除される
        tracker.update(&[TouchSample::new(2, 100, 140)], 32);
        assert!(!tracker.is_holding());
        assert!(!tracker.is_holding_direction(Direction::Down));
        assert_eq!(tracker.swipe_info(), SwipeInfo::default());
        assert!(tracker.is_tracking(TouchId(2)));
    }

    #[test]
    fn test_release_of_inactive_contact_resets_info() {
        let mut tracker = SwipeTracker::new();
        tracker.update(
            &[TouchSample::new(1, 10, 10), TouchSample::new(2, 100, 100)],
            0,
        );
        tracker.update(
            &[TouchSample::new(1, 50, 10), TouchSample::new(2, 100, 140)],
            16,
        );
        assert_eq!(tracker.swipe_info().distance_px, 40.0);

        // アクティブでない接触1を離す
        tracker.update(&[TouchSample::new(2, 100, 140)], 32);
        let info = tracker.swipe_info();
        assert!(!tracker.is_holding());
        assert_eq!(info.direction, Direction::None);
        assert_eq!(info.distance_px, 0.0);
        assert_eq!(info.speed_px_per_sec, 0.0);
        assert_eq!(info.angle_radians, 0.0);

        // 残った接触が再び閾値を超えると測定値が戻る
        tracker.update(&[TouchSample::new(2, 60, 140)], 48);
        assert!(tracker.is_holding());
        assert_eq!(tracker.swipe_info().direction, Direction::Left);
        assert_eq!(tracker.swipe_info().distance_px, 40.0);
    }

    #[test]
    fn test_zero_threshold_degrades() {
        let mut tracker = SwipeTracker::new().with_swipe_threshold(0.0);
        tracker.update(&touch(1, 10, 10), 0);
        tracker.update(&touch(1, 10, 10), 16);

        // 変位0でも候補になり、atan2(0, 0) = 0 は右
        assert!(tracker.is_holding());
        assert!(tracker.is_swipe_detected(Direction::Right));
    }

    #[test]
    fn test_reset() {
        let mut tracker = SwipeTracker::new();
        tracker.update(&touch(1, 10, 10), 0);
        tracker.update(&touch(1, 50, 10), 16);

        GestureRecognizer::reset(&mut tracker);
        assert!(!tracker.is_active());
        assert!(!tracker.is_holding());
        assert!(!tracker.is_swipe_detected(Direction::Right));
        assert_eq!(tracker.swipe_info(), SwipeInfo::default());
    }
}
