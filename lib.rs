// TwinzoneTouch
// 二分割タッチ操作のジェスチャー認識ライブラリ

//! 画面左半分をスワイプ（移動）、右半分を仮想ジョイスティック（照準・射撃）として
//! 扱うタッチ操作のコアです。ホストはフレームごとに一度
//! [`InputManager::update`](core::input::InputManager::update) を呼び出し、
//! その後ゲームロジックから各種状態を問い合わせます。

pub mod core;

pub use crate::core::input::{
    Direction, InputManager, SwipeInfo, TouchGestureHandler, TouchId, TouchSample,
};
pub use crate::core::settings::{GestureSettings, SettingsError};
