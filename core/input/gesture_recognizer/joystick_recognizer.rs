// TwinzoneTouch 仮想ジョイスティック
// 右ゾーンの単一接触を追跡し、初期位置からの変位と発射トリガーを提供する

use std::collections::HashSet;

use glam::Vec2;
use log::{debug, trace};

use crate::core::settings::GestureSettings;
use super::gesture_recognizer::{GestureRecognizer, TouchId, TouchSample};

/// ジョイスティックの状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickState {
    /// 操作中の接触（同時に一つだけ）
    pub active_id: Option<TouchId>,
    /// 接触開始位置（スティックの中心）
    pub initial_pos: Vec2,
    /// 最新の接触位置
    pub current_pos: Vec2,
    /// 接触開始時刻 (ミリ秒)
    pub start_time_ms: u64,
    /// 報告するスティック位置
    pub joystick_pos: Vec2,
    /// 非操作時の待機位置（画面右下隅からの固定オフセット）
    pub default_anchor: Vec2,
    /// 閾値以上の変位が続いているか
    pub holding: bool,
    /// このフレームで発射がトリガーされたか
    pub just_triggered: bool,
}

/// 仮想ジョイスティック
pub struct VirtualJoystick {
    state: JoystickState,
    ignored: HashSet<TouchId>,
    swipe_threshold: f32,
    max_swipe_duration_ms: u64,
    anchor_offset: Vec2,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualJoystick {
    pub fn new() -> Self {
        Self::from_settings(&GestureSettings::default())
    }

    pub fn from_settings(settings: &GestureSettings) -> Self {
        let anchor_offset = Vec2::new(
            settings.joystick_anchor_offset.0,
            settings.joystick_anchor_offset.1,
        );
        let default_anchor =
            Self::anchor_for(settings.screen_width, settings.screen_height, anchor_offset);

        Self {
            state: JoystickState {
                active_id: None,
                initial_pos: default_anchor,
                current_pos: default_anchor,
                start_time_ms: 0,
                joystick_pos: default_anchor,
                default_anchor,
                holding: false,
                just_triggered: false,
            },
            ignored: HashSet::new(),
            swipe_threshold: settings.swipe_threshold_px,
            max_swipe_duration_ms: settings.max_swipe_duration_ms,
            anchor_offset,
        }
    }

    fn anchor_for(width: u32, height: u32, offset: Vec2) -> Vec2 {
        Vec2::new(width as f32, height as f32) - offset
    }

    /// 画面寸法の変更に合わせて待機位置を再計算
    pub fn set_screen_dimensions(&mut self, width: u32, height: u32) {
        self.state.default_anchor = Self::anchor_for(width, height, self.anchor_offset);
        if self.state.active_id.is_none() {
            self.state.joystick_pos = self.state.default_anchor;
        }
    }

    /// フレームごとの更新
    ///
    /// スロットが空いているときに現れた最初の新しい接触だけを採用し、
    /// それ以外の新しい接触は離されるまで無視します（順番待ちはしません）。
    pub fn update(&mut self, contacts: &[TouchSample], now_ms: u64) {
        self.state.just_triggered = false;
        self.ignored
            .retain(|id| contacts.iter().any(|contact| contact.id == *id));

        if let Some(active) = self.state.active_id {
            match contacts.iter().find(|contact| contact.id == active) {
                Some(contact) => self.track(contact, now_ms),
                None => self.release(),
            }
        }

        for contact in contacts {
            if self.state.active_id == Some(contact.id) || self.ignored.contains(&contact.id) {
                continue;
            }

            if self.state.active_id.is_none() {
                self.activate(contact, now_ms);
            } else {
                trace!("ジョイスティック使用中のため接触を無視: {}", contact.id);
                self.ignored.insert(contact.id);
            }
        }
    }

    fn activate(&mut self, contact: &TouchSample, now_ms: u64) {
        let position = contact.position();
        self.state.active_id = Some(contact.id);
        self.state.initial_pos = position;
        self.state.current_pos = position;
        self.state.start_time_ms = now_ms;
        self.state.joystick_pos = position;
        self.state.holding = false;

        trace!("ジョイスティック開始: {} ({}, {})", contact.id, contact.x, contact.y);
    }

    fn track(&mut self, contact: &TouchSample, now_ms: u64) {
        self.state.current_pos = contact.position();
        self.state.joystick_pos = self.state.current_pos;

        let distance = (self.state.current_pos - self.state.initial_pos).length();
        if distance >= self.swipe_threshold && !self.state.holding {
            let elapsed_ms = now_ms.saturating_sub(self.state.start_time_ms);
            if elapsed_ms <= self.max_swipe_duration_ms {
                self.state.just_triggered = true;
                debug!("発射トリガー: {} 距離={:.1}", contact.id, distance);
            }
            self.state.holding = true;
        }
    }

    fn release(&mut self) {
        if let Some(id) = self.state.active_id.take() {
            trace!("ジョイスティック終了: {}", id);
        }
        self.state.holding = false;
        self.state.joystick_pos = self.state.default_anchor;
    }

    /// 現在のスティック位置（非操作時は待機位置）
    pub fn fire_joystick_position(&self) -> Vec2 {
        if self.state.active_id.is_some() {
            self.state.joystick_pos
        } else {
            self.state.default_anchor
        }
    }

    /// 中心からの変位（非操作時はゼロ）
    pub fn displacement(&self) -> Vec2 {
        if self.state.active_id.is_some() {
            self.state.joystick_pos - self.state.initial_pos
        } else {
            Vec2::ZERO
        }
    }

    /// 射撃方向の単位ベクトル（閾値以上の変位が続いている間のみ）
    pub fn fire_direction(&self) -> Option<Vec2> {
        if self.state.holding {
            self.displacement().try_normalize()
        } else {
            None
        }
    }

    pub fn is_fire_triggered(&self) -> bool {
        self.state.just_triggered
    }

    pub fn is_firing(&self) -> bool {
        self.state.holding
    }

    pub fn active_id(&self) -> Option<TouchId> {
        self.state.active_id
    }

    pub fn default_anchor(&self) -> Vec2 {
        self.state.default_anchor
    }

    pub fn state(&self) -> &JoystickState {
        &self.state
    }
}

impl GestureRecognizer for VirtualJoystick {
    fn name(&self) -> &'static str {
        "Virtual Joystick"
    }

    fn update(&mut self, contacts: &[TouchSample], now_ms: u64) {
        VirtualJoystick::update(self, contacts, now_ms);
    }

    fn is_tracking(&self, id: TouchId) -> bool {
        self.state.active_id == Some(id) || self.ignored.contains(&id)
    }

    fn reset(&mut self) {
        self.release();
        self.state.just_triggered = false;
        self.ignored.clear();
    }

    fn is_active(&self) -> bool {
        self.state.active_id.is_some()
    }
}
