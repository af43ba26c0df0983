// TwinzoneTouch ゾーン振り分け
// 接触点を画面の左半分（移動）と右半分（射撃）に分類する

use super::gesture_recognizer::TouchSample;

/// 画面ゾーン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Left,
    Right,
}

/// ゾーン振り分け器
///
/// 現在の画面幅だけを保持し、判定自体は純粋関数です。
/// 画面幅0の場合はすべての接触が右ゾーンになります。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRouter {
    screen_width: u32,
}

impl ZoneRouter {
    pub fn new(screen_width: u32) -> Self {
        Self { screen_width }
    }

    /// x座標と画面幅からゾーンを判定
    pub fn classify(x: i32, screen_width: u32) -> Zone {
        if screen_width == 0 {
            return Zone::Right;
        }

        if x as f32 >= screen_width as f32 / 2.0 {
            Zone::Right
        } else {
            Zone::Left
        }
    }

    pub fn zone_of(&self, sample: &TouchSample) -> Zone {
        Self::classify(sample.x, self.screen_width)
    }

    pub fn set_screen_width(&mut self, screen_width: u32) {
        self.screen_width = screen_width;
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }
}
