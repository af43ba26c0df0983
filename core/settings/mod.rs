// TwinzoneTouch 設定モジュール
// ジェスチャー認識の閾値と画面寸法の管理と永続化を担当

//! # 設定モジュール
//!
//! スワイプ閾値、フリック判定時間、ヒステリシス、ジョイスティックの待機位置など
//! ジェスチャー認識で使用する調整値を提供します。
//!
//! 設定はJSONファイルとして保存・読み込みでき、欠けている項目はデフォルト値で補われます。

pub mod error;

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use error::{SettingsError, SettingsResult};

/// ジェスチャー認識の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// 初期画面幅 (ピクセル)
    pub screen_width: u32,

    /// 初期画面高さ (ピクセル)
    pub screen_height: u32,

    /// スワイプ・ジョイスティック発火とみなす最小距離 (ピクセル)
    pub swipe_threshold_px: f32,

    /// フリック（一回限りのイベント）として扱う最大経過時間 (ミリ秒)
    pub max_swipe_duration_ms: u64,

    /// 基準点を更新する距離 (ピクセル)
    pub hysteresis_distance_px: f32,

    /// 基準点を更新する角度変化 (ラジアン)
    pub hysteresis_angle_rad: f32,

    /// 速度計算で使う経過時間の下限 (秒)
    pub min_elapsed_secs: f32,

    /// 画面右下隅からのジョイスティック待機位置のオフセット (ピクセル)
    pub joystick_anchor_offset: (f32, f32),
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            swipe_threshold_px: 30.0,
            max_swipe_duration_ms: 300,
            hysteresis_distance_px: 60.0,
            hysteresis_angle_rad: 0.2,
            min_elapsed_secs: 0.001,
            joystick_anchor_offset: (150.0, 150.0),
        }
    }
}

impl GestureSettings {
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold_px = threshold;
        self
    }

    pub fn with_max_swipe_duration_ms(mut self, duration_ms: u64) -> Self {
        self.max_swipe_duration_ms = duration_ms;
        self
    }

    pub fn with_joystick_anchor_offset(mut self, x: f32, y: f32) -> Self {
        self.joystick_anchor_offset = (x, y);
        self
    }

    /// 設定値を検証
    ///
    /// 閾値0や画面サイズ0は許容します（認識が縮退するだけで失敗ではありません）。
    pub fn validate(&self) -> SettingsResult<()> {
        let non_negative = [
            ("swipe_threshold_px", self.swipe_threshold_px),
            ("hysteresis_distance_px", self.hysteresis_distance_px),
            ("hysteresis_angle_rad", self.hysteresis_angle_rad),
            ("joystick_anchor_offset.0", self.joystick_anchor_offset.0),
            ("joystick_anchor_offset.1", self.joystick_anchor_offset.1),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Validation(format!(
                    "{} は0以上の有限値である必要があります: {}",
                    name, value
                )));
            }
        }

        if !self.min_elapsed_secs.is_finite() || self.min_elapsed_secs <= 0.0 {
            return Err(SettingsError::Validation(format!(
                "min_elapsed_secs は正の値である必要があります: {}",
                self.min_elapsed_secs
            )));
        }

        Ok(())
    }

    /// JSONファイルから設定を読み込む
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SettingsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings: GestureSettings = serde_json::from_str(&content)?;

        if let Err(e) = settings.validate() {
            warn!("無効なジェスチャー設定です: {}: {}", path.display(), e);
            return Err(e);
        }

        debug!("ジェスチャー設定を読み込みました: {}", path.display());
        Ok(settings)
    }

    /// JSONファイルに設定を保存
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> SettingsResult<()> {
        self.validate()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        debug!("ジェスチャー設定を保存しました: {}", path.display());
        Ok(())
    }
}
