// TwinzoneTouch コアモジュール

pub mod input;
pub mod settings;
