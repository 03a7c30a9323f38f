//! # 通道选择与映射模块
//!
//! 候选通道由密钥窗口的前两位决定，`11` 表示跳过当前像素块。
//! 真正存放载荷位的通道再由候选通道的当前 LSB 与密钥第三位共同决定，
//! 剩下的那个通道存放空格标志。

use crate::constants::{CHANNELS, SKIP_CODE};
use crate::cursor::PixelCursor;
use crate::error::StegError;
use crate::key::KeyBitStream;

/// 一次通道选择的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub row: u32,
    pub col: u32,
    pub candidate: usize,
    pub swap_bit: bool,
    /// 在找到可用像素块之前跳过的块数。
    pub skipped: u32,
}

/// 一个像素块中三个通道各自的角色，三者互不相同。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRoles {
    pub candidate: usize,
    pub payload: usize,
    pub side: usize,
}

/// 为下一个像素块选择候选通道。
///
/// 每访问一个像素块 (包括被跳过的) 都消耗一个新的 3 位密钥窗口。
///
/// # Errors
///
/// 游标用尽时返回 [`StegError::RegionExhausted`]。
pub fn select_channel(
    key: &mut KeyBitStream,
    cursor: &mut PixelCursor,
) -> Result<Selection, StegError> {
    let mut skipped = 0;
    loop {
        let window = key.next_three_bits();
        let (row, col) = cursor.next_block()?;

        match window.code() {
            SKIP_CODE => {
                log::debug!("skipping block ({row}, {col})");
                skipped += 1;
            }
            code => {
                return Ok(Selection {
                    row,
                    col,
                    candidate: usize::from(code),
                    swap_bit: window.swap_bit(),
                    skipped,
                });
            }
        }
    }
}

/// 根据候选通道计算载荷通道和侧通道。
///
/// `candidate_value` 的 LSB 与 `swap_bit` 同为 1 时载荷通道为候选通道后移 1 位，
/// 否则后移 2 位 (模 3)。侧通道为剩下的那一个。
///
/// # Errors
///
/// `candidate` 不在 `0..3` 内时返回 [`StegError::ChannelMapping`]。
pub fn map_channels(
    candidate: usize,
    candidate_value: u8,
    swap_bit: bool,
) -> Result<ChannelRoles, StegError> {
    if candidate >= CHANNELS {
        return Err(StegError::ChannelMapping { channel: candidate });
    }

    let lsb_and_key = (candidate_value & 1 == 1) && swap_bit;
    let shift = if lsb_and_key { 1 } else { 2 };
    let payload = (candidate + shift) % CHANNELS;
    let side = (0..CHANNELS)
        .find(|&ch| ch != candidate && ch != payload)
        .ok_or(StegError::ChannelMapping { channel: payload })?;

    Ok(ChannelRoles {
        candidate,
        payload,
        side,
    })
}
