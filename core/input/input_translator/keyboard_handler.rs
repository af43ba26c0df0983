// TwinzoneTouch キーボードハンドラ
// 押されているキーを移動・射撃の操作に変換する

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use log::trace;

use crate::core::input::gesture_recognizer::Direction;

/// キーボードのキーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const S: KeyCode = KeyCode(83);
    pub const W: KeyCode = KeyCode(87);
}

/// キーに割り当てる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Fire,
}

/// キー割り当て
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, KeyAction>,
}

impl Default for KeyBindings {
    /// 矢印キーとWASDで移動、スペースで射撃
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (key, direction) in [
            (KeyCode::UP, Direction::Up),
            (KeyCode::DOWN, Direction::Down),
            (KeyCode::LEFT, Direction::Left),
            (KeyCode::RIGHT, Direction::Right),
            (KeyCode::W, Direction::Up),
            (KeyCode::S, Direction::Down),
            (KeyCode::A, Direction::Left),
            (KeyCode::D, Direction::Right),
        ] {
            bindings.bind(key, KeyAction::Move(direction));
        }
        bindings.bind(KeyCode::SPACE, KeyAction::Fire);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: KeyCode, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<KeyAction> {
        self.bindings.remove(&key)
    }

    pub fn action_for(&self, key: KeyCode) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

/// キー入力源（現在押されているキーの集合を返す）
pub trait KeySource: Send + Sync {
    fn pressed_keys(&mut self) -> Vec<KeyCode>;
}

/// 何も押されていない入力源
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKeySource;

impl KeySource for NullKeySource {
    fn pressed_keys(&mut self) -> Vec<KeyCode> {
        Vec::new()
    }
}

/// 手動でキーを押下・解放する入力源
///
/// クローンは同じキー状態を共有します。
#[derive(Debug, Clone, Default)]
pub struct ManualKeySource {
    keys: Arc<Mutex<HashSet<KeyCode>>>,
}

impl ManualKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: KeyCode) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key);
    }

    pub fn release(&self, key: KeyCode) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
    }
}

impl KeySource for ManualKeySource {
    fn pressed_keys(&mut self) -> Vec<KeyCode> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}

/// キーボードハンドラ
pub trait KeyboardHandler: Send + Sync {
    /// フレームごとに一度呼ばれる
    fn update(&mut self);

    fn is_direction_held(&self, direction: Direction) -> bool;

    /// このフレームで押され始めたか
    fn is_direction_pressed(&self, direction: Direction) -> bool;

    fn is_fire_held(&self) -> bool;

    fn is_fire_pressed(&self) -> bool;

    /// 押されている方向（上・下・左・右の順で最初のもの）
    fn held_direction(&self) -> Direction {
        Direction::CARDINALS
            .into_iter()
            .find(|direction| self.is_direction_held(*direction))
            .unwrap_or(Direction::None)
    }
}

/// キー状態の差分から押下エッジを求める標準のキーボードハンドラ
pub struct KeyStateHandler {
    source: Box<dyn KeySource>,
    bindings: KeyBindings,
    pressed: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl Default for KeyStateHandler {
    fn default() -> Self {
        Self::new(Box::new(NullKeySource))
    }
}

impl KeyStateHandler {
    pub fn new(source: Box<dyn KeySource>) -> Self {
        Self {
            source,
            bindings: KeyBindings::default(),
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    fn any_bound(&self, keys: &HashSet<KeyCode>, action: KeyAction) -> bool {
        keys.iter()
            .any(|key| self.bindings.action_for(*key) == Some(action))
    }
}

impl KeyboardHandler for KeyStateHandler {
    fn update(&mut self) {
        let current: HashSet<KeyCode> = self.source.pressed_keys().into_iter().collect();
        self.just_pressed = current.difference(&self.pressed).copied().collect();
        if !self.just_pressed.is_empty() {
            trace!("キー押下: {:?}", self.just_pressed);
        }
        self.pressed = current;
    }

    fn is_direction_held(&self, direction: Direction) -> bool {
        self.any_bound(&self.pressed, KeyAction::Move(direction))
    }

    fn is_direction_pressed(&self, direction: Direction) -> bool {
        self.any_bound(&self.just_pressed, KeyAction::Move(direction))
    }

    fn is_fire_held(&self) -> bool {
        self.any_bound(&self.pressed, KeyAction::Fire)
    }

    fn is_fire_pressed(&self) -> bool {
        self.any_bound(&self.just_pressed, KeyAction::Fire)
    }
}
