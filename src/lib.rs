//! # lsb_keyhide 库
//!
//! 本库包含基于密钥的 LSB 隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod channel;
pub mod cli;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod handler;
pub mod key;
pub mod metadata;
pub mod steganography;

pub use error::StegError;
pub use steganography::StegCodec;
