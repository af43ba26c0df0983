// TwinzoneTouch 入力処理
// タッチとキーボードの入力を移動・射撃の操作信号に変換する

//! 入力モジュール
//!
//! 画面を左右二つのゾーンに分け、次の機能を統合しています：
//!
//! - ゾーン振り分け: 接触点のx座標で左右を判定
//! - スワイプ認識: 左ゾーンの方向スワイプ（一回限りのフリックと継続ホールド）
//! - 仮想ジョイスティック: 右ゾーンの単一接触による照準・射撃
//! - 入力マネージャー: フレームごとの更新と問い合わせAPI

pub mod gesture_recognizer;
pub mod input_translator;

// 主要コンポーネントの再エクスポート
pub use gesture_recognizer::{
    Direction, GestureRecognizer, JoystickState, SwipeInfo, SwipeTouchState, SwipeTracker,
    TouchGestureHandler, TouchId, TouchSample, VirtualJoystick, Zone, ZoneRouter,
};
pub use input_translator::input_manager::InputManager;
pub use input_translator::{
    Clock, KeyAction, KeyBindings, KeyCode, KeySource, KeyStateHandler, KeyboardHandler,
    ManualClock, ManualKeySource, MonotonicClock, NullKeySource, ScriptedTouchSource,
    TouchSource,
};
