//! # 错误类型模块
//!
//! 隐写核心的所有失败都归结为 [`StegError`] 的一个变体。
//! 这些错误对当前的编码/解码调用都是终止性的，不存在部分结果。

use thiserror::Error;

/// 隐写核心可能返回的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegError {
    /// 密钥为空，无法生成位流。
    #[error("InvalidKey: the key must not be empty")]
    InvalidKey,

    /// 图像宽度小于 64 或高度小于 2。
    #[error("ImageTooSmall: image is {width}x{height}, at least 64 pixels wide and 2 rows high are required")]
    ImageTooSmall { width: u32, height: u32 },

    /// 载荷 (含跳过的像素块) 超出了可编码区域。
    #[error("CapacityExceeded: ran out of pixel blocks at payload byte {byte_index}, bit {bit_index}")]
    CapacityExceeded { byte_index: usize, bit_index: u8 },

    /// 解码时在恢复到声明长度之前就用尽了像素块。
    #[error("TruncatedImage: recovered {recovered} of {expected} bytes before the image ran out of blocks")]
    TruncatedImage { recovered: u64, expected: u64 },

    /// 通道索引不在 {0, 1, 2} 之内。
    #[error("ChannelMappingError: channel index {channel} is out of range")]
    ChannelMapping { channel: usize },

    /// 游标已位于最后一个像素块，无法再前进。
    #[error("no pixel block left after ({row}, {col})")]
    RegionExhausted { row: u32, col: u32 },
}
