// TwinzoneTouch 入力変換モジュール
// 外部の入力源・時計とフレームごとの入力マネージャー

pub mod clock;
pub mod input_manager;
pub mod keyboard_handler;
pub mod touch_source;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use input_manager::InputManager;
pub use keyboard_handler::{
    KeyAction, KeyBindings, KeyCode, KeySource, KeyStateHandler, KeyboardHandler,
    ManualKeySource, NullKeySource,
};
pub use touch_source::{ScriptedTouchSource, TouchSource};
