// TwinzoneTouch タッチ入力源
// フレームごとに現在押されている接触点の全集合を供給する

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::input::gesture_recognizer::TouchSample;

/// タッチ入力源
///
/// 1フレームに一度呼ばれ、押されている接触をすべて返します。
/// 接触がなければ空のベクタを返します（エラーではありません）。
pub trait TouchSource: Send + Sync {
    fn poll(&mut self) -> Vec<TouchSample>;
}

/// 事前に用意したフレーム列を順に返す入力源
///
/// クローンは同じキューを共有するため、マネージャーに渡した後もフレームを追加できます。
/// キューが空になると接触なしを返します。
#[derive(Debug, Clone, Default)]
pub struct ScriptedTouchSource {
    frames: Arc<Mutex<VecDeque<Vec<TouchSample>>>>,
}

impl ScriptedTouchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<TouchSample>>,
    {
        Self {
            frames: Arc::new(Mutex::new(frames.into_iter().collect())),
        }
    }

    pub fn push_frame(&self, frame: Vec<TouchSample>) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl TouchSource for ScriptedTouchSource {
    fn poll(&mut self) -> Vec<TouchSample> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default()
    }
}
