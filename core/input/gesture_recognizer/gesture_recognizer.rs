// TwinzoneTouch ジェスチャー共通定義
// 接触点・方向・スワイプ情報と認識器の基底トレイト

use std::f32::consts::{FRAC_PI_4, PI, TAU};
use std::fmt;

use glam::Vec2;

/// タッチID
///
/// 一つの物理的な接触が続いている間は変わらず、接触中に再利用されることはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// フレームごとに供給される接触点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSample {
    pub id: TouchId,
    pub x: i32,
    pub y: i32,
}

impl TouchSample {
    pub fn new(id: u64, x: i32, y: i32) -> Self {
        Self {
            id: TouchId(id),
            x,
            y,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// スワイプ方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// 判定対象の4方向（問い合わせ時の優先順）
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// 角度（ラジアン、画面座標でy軸は下向き）を4方向に分類
    ///
    /// 各軸を中心とした90°の半開区間で判定します：
    /// `[-45°,45°)` 右、`[45°,135°)` 下、`[135°,225°)` 左、`[225°,315°)` 上。
    /// 有限でない角度は `Direction::None` になります。
    pub fn from_angle(angle: f32) -> Direction {
        if !angle.is_finite() {
            return Direction::None;
        }

        let angle = normalize_angle(angle);
        let three_quarters = 3.0 * FRAC_PI_4;

        if (-FRAC_PI_4..FRAC_PI_4).contains(&angle) {
            Direction::Right
        } else if (FRAC_PI_4..three_quarters).contains(&angle) {
            Direction::Down
        } else if (-three_quarters..-FRAC_PI_4).contains(&angle) {
            Direction::Up
        } else {
            Direction::Left
        }
    }

    /// 画面座標での単位ベクトル
    pub fn unit_vector(self) -> Vec2 {
        match self {
            Direction::None => Vec2::ZERO,
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    fn index(self) -> Option<usize> {
        match self {
            Direction::None => None,
            Direction::Up => Some(0),
            Direction::Down => Some(1),
            Direction::Left => Some(2),
            Direction::Right => Some(3),
        }
    }
}

/// 角度を `(-π, π]` の範囲に正規化
pub fn normalize_angle(angle: f32) -> f32 {
    if angle > -PI && angle <= PI {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

/// 二つの角度の最短差分（ラジアン）
pub fn angle_delta(a: f32, b: f32) -> f32 {
    normalize_angle(a - b)
}

/// 方向ごとのフラグ集合
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags([bool; 4]);

impl DirectionFlags {
    pub fn set(&mut self, direction: Direction) {
        if let Some(i) = direction.index() {
            self.0[i] = true;
        }
    }

    pub fn get(&self, direction: Direction) -> bool {
        direction.index().map_or(false, |i| self.0[i])
    }

    pub fn clear(&mut self) {
        self.0 = [false; 4];
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|flag| *flag)
    }

    /// 優先順で最初に立っている方向
    pub fn first_set(&self) -> Direction {
        Direction::CARDINALS
            .into_iter()
            .find(|d| self.get(*d))
            .unwrap_or(Direction::None)
    }
}

/// 現在アクティブなスワイプのスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeInfo {
    pub angle_radians: f32,
    pub direction: Direction,
    pub distance_px: f32,
    pub speed_px_per_sec: f32,
}

/// ゾーン別認識器の基底トレイト
pub trait GestureRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// このフレームで割り当てられた接触点で状態を更新
    fn update(&mut self, contacts: &[TouchSample], now_ms: u64);

    /// 追跡中（または無視対象として記録済み）の接触か
    fn is_tracking(&self, id: TouchId) -> bool;

    fn reset(&mut self);

    fn is_active(&self) -> bool;
}
