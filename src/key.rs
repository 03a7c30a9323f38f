//! # 密钥位流模块
//!
//! 把密钥展开成一个无限循环的位序列。每个字节按最高位优先贡献 8 位，
//! 读取时只移动环形索引，不会消耗数据。

use crate::constants::KEY_WINDOW_BITS;
use crate::error::StegError;

/// 一次取出的 3 位密钥窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyWindow(pub [bool; KEY_WINDOW_BITS]);

impl KeyWindow {
    /// 前两位组成的 2 位码，用于选择候选通道。
    pub fn code(&self) -> u8 {
        (u8::from(self.0[0]) << 1) | u8::from(self.0[1])
    }

    /// 第三位，参与通道交换的计算。
    pub fn swap_bit(&self) -> bool {
        self.0[2]
    }
}

/// 由密钥生成的循环位流。
#[derive(Debug, Clone)]
pub struct KeyBitStream {
    bits: Vec<bool>,
    pos: usize,
}

impl KeyBitStream {
    /// 从密钥字节构造位流。
    ///
    /// # Errors
    ///
    /// 密钥为空时返回 [`StegError::InvalidKey`]。
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, StegError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(StegError::InvalidKey);
        }

        let bits = key
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
            .collect();

        Ok(Self { bits, pos: 0 })
    }

    /// 取出队首的 3 位并把它们轮转到队尾。
    pub fn next_three_bits(&mut self) -> KeyWindow {
        let mut window = [false; KEY_WINDOW_BITS];
        for slot in window.iter_mut() {
            *slot = self.bits[self.pos];
            self.pos = (self.pos + 1) % self.bits.len();
        }
        KeyWindow(window)
    }

    /// 位流的周期，即密钥的总位数。
    pub fn period(&self) -> usize {
        self.bits.len()
    }
}
