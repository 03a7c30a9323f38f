//! # 隐写核心模块
//!
//! [`StegCodec`] 逐字节驱动嵌入和提取。每个载荷位占用一个像素块：
//! 密钥决定候选通道 (或跳过该块)，候选通道的 LSB 决定载荷通道，剩下的通道保存
//! "下一个字节是空格" 标志。紧跟在某字节后的空格不会单独嵌入，而是由该标志隐式表示。
//!
//! 编码和解码必须以完全相同的顺序推进密钥和游标，因此每次调用都会新建一个
//! [`CodecState`]，由该调用独占。

use crate::channel::{ChannelRoles, map_channels, select_channel};
use crate::constants::SPACE;
use crate::cursor::PixelCursor;
use crate::error::StegError;
use crate::key::KeyBitStream;
use crate::metadata::{ensure_dimensions, read_length, store_length};
use image::RgbImage;

/// 一次编码或解码调用的可变状态：密钥轮转位置和像素游标。
#[derive(Debug, Clone)]
pub struct CodecState {
    key: KeyBitStream,
    cursor: PixelCursor,
}

/// 一个实际承载载荷位的像素块及其通道分配。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockVisit {
    pub row: u32,
    pub col: u32,
    pub roles: ChannelRoles,
    /// 到达该块之前跳过的块数。
    pub skipped: u32,
}

/// 从一个像素块中读出的两个位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedBit {
    pub bit: bool,
    pub space_flag: bool,
    pub visit: BlockVisit,
}

impl CodecState {
    /// # Errors
    ///
    /// 图像宽度小于 64 或高度小于 2 时返回 [`StegError::ImageTooSmall`]。
    pub fn new(key: KeyBitStream, image: &RgbImage) -> Result<Self, StegError> {
        ensure_dimensions(image)?;
        let (width, height) = image.dimensions();
        Ok(Self {
            key,
            cursor: PixelCursor::new(width, height),
        })
    }

    /// 找到下一个可用像素块并确定三个通道的角色。
    fn locate(&mut self, image: &RgbImage) -> Result<BlockVisit, StegError> {
        let selection = select_channel(&mut self.key, &mut self.cursor)?;
        let candidate_value = image.get_pixel(selection.col, selection.row).0[selection.candidate];
        let roles = map_channels(selection.candidate, candidate_value, selection.swap_bit)?;

        Ok(BlockVisit {
            row: selection.row,
            col: selection.col,
            roles,
            skipped: selection.skipped,
        })
    }
}

fn with_lsb(value: u8, bit: bool) -> u8 {
    (value & 0xFE) | u8::from(bit)
}

/// 把载荷位写入图像。
pub struct BitEmbedder<'a> {
    state: CodecState,
    image: &'a mut RgbImage,
}

impl<'a> BitEmbedder<'a> {
    /// # Errors
    ///
    /// 图像宽度小于 64 或高度小于 2 时返回 [`StegError::ImageTooSmall`]。
    pub fn new(key: KeyBitStream, image: &'a mut RgbImage) -> Result<Self, StegError> {
        let state = CodecState::new(key, image)?;
        Ok(Self { state, image })
    }

    /// 在下一个可用像素块中写入一个载荷位和一个空格标志位。
    ///
    /// 只修改该像素载荷通道和侧通道的 LSB，候选通道保持不变，
    /// 所以解码时能得到相同的通道分配。
    ///
    /// # Errors
    ///
    /// 可编码区域用尽时返回 [`StegError::RegionExhausted`]。
    pub fn embed_bit(&mut self, bit: bool, space_flag: bool) -> Result<BlockVisit, StegError> {
        let visit = self.state.locate(self.image)?;

        let pixel = self.image.get_pixel_mut(visit.col, visit.row);
        pixel.0[visit.roles.payload] = with_lsb(pixel.0[visit.roles.payload], bit);
        pixel.0[visit.roles.side] = with_lsb(pixel.0[visit.roles.side], space_flag);

        log::trace!(
            "embedded bit {} at ({}, {}) channel {}, space flag {} in channel {}",
            u8::from(bit),
            visit.row,
            visit.col,
            visit.roles.payload,
            u8::from(space_flag),
            visit.roles.side
        );
        Ok(visit)
    }
}

/// 从图像中读出载荷位，不修改图像。
pub struct BitExtractor<'a> {
    state: CodecState,
    image: &'a RgbImage,
}

impl<'a> BitExtractor<'a> {
    /// # Errors
    ///
    /// 图像宽度小于 64 或高度小于 2 时返回 [`StegError::ImageTooSmall`]。
    pub fn new(key: KeyBitStream, image: &'a RgbImage) -> Result<Self, StegError> {
        Ok(Self {
            state: CodecState::new(key, image)?,
            image,
        })
    }

    /// 读取下一个可用像素块中的载荷位和侧通道位。
    ///
    /// # Errors
    ///
    /// 可编码区域用尽时返回 [`StegError::RegionExhausted`]。
    pub fn extract_bit(&mut self) -> Result<ExtractedBit, StegError> {
        let visit = self.state.locate(self.image)?;
        let pixel = self.image.get_pixel(visit.col, visit.row);

        Ok(ExtractedBit {
            bit: pixel.0[visit.roles.payload] & 1 == 1,
            space_flag: pixel.0[visit.roles.side] & 1 == 1,
            visit,
        })
    }

    /// 按最高位优先读取一个字节，空格标志取自第 8 位所在块的侧通道。
    pub fn extract_byte(&mut self) -> Result<(u8, bool), StegError> {
        let mut byte = 0u8;
        let mut space_flag = false;
        for _ in 0..8 {
            let extracted = self.extract_bit()?;
            byte = (byte << 1) | u8::from(extracted.bit);
            space_flag = extracted.space_flag;
        }
        Ok((byte, space_flag))
    }
}

/// 列出需要实际嵌入的字节：`(载荷下标, 字节, 后面是否紧跟空格)`。
/// 被标志隐式表示的空格不会出现在结果中。
fn embedding_plan(payload: &[u8]) -> impl Iterator<Item = (usize, u8, bool)> + '_ {
    let mut index = 0;
    std::iter::from_fn(move || {
        let &byte = payload.get(index)?;
        let current = index;
        let space_follows = payload.get(index + 1) == Some(&SPACE);
        index += if space_follows { 2 } else { 1 };
        Some((current, byte, space_follows))
    })
}

/// 顶层编解码器，持有由密钥生成的位流。
#[derive(Debug, Clone)]
pub struct StegCodec {
    key: KeyBitStream,
}

impl StegCodec {
    /// 用密钥的原始字节构造编解码器。
    ///
    /// 字符串密钥按 UTF-8 字节展开，每个字节 8 位，因此非 ASCII 字符会贡献多于 8 位。
    ///
    /// # Errors
    ///
    /// 密钥为空时返回 [`StegError::InvalidKey`]。
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, StegError> {
        Ok(Self {
            key: KeyBitStream::new(key)?,
        })
    }

    /// 把载荷嵌入载体图像 (原地修改)。
    ///
    /// 失败时图像可能已被部分修改，调用方不应保存它。
    ///
    /// # Errors
    ///
    /// * [`StegError::ImageTooSmall`] - 图像宽度小于 64 或高度小于 2。
    /// * [`StegError::CapacityExceeded`] - 嵌入过程中像素块用尽，附带出错的字节和位下标。
    pub fn encode(&self, image: &mut RgbImage, payload: &[u8]) -> Result<(), StegError> {
        store_length(image, payload.len() as u64)?;

        let mut embedder = BitEmbedder::new(self.key.clone(), image)?;
        let mut skipped = 0u64;
        let mut embedded = 0usize;

        for (byte_index, byte, space_follows) in embedding_plan(payload) {
            for bit_index in 0..8u8 {
                let bit = (byte >> (7 - bit_index)) & 1 == 1;
                let visit = embedder
                    .embed_bit(bit, space_follows)
                    .map_err(|e| match e {
                        StegError::RegionExhausted { .. } => StegError::CapacityExceeded {
                            byte_index,
                            bit_index,
                        },
                        other => other,
                    })?;
                skipped += u64::from(visit.skipped);
            }
            embedded += 1;
        }

        log::info!(
            "encoded {} bytes ({} embedded, {} implied spaces), {} blocks skipped",
            payload.len(),
            embedded,
            payload.len() - embedded,
            skipped
        );
        Ok(())
    }

    /// 从图像中恢复载荷。
    ///
    /// # Errors
    ///
    /// * [`StegError::ImageTooSmall`] - 图像宽度小于 64 或高度小于 2。
    /// * [`StegError::TruncatedImage`] - 恢复到声明长度之前像素块就已用尽。
    pub fn decode(&self, image: &RgbImage) -> Result<Vec<u8>, StegError> {
        let expected = read_length(image)?;

        let mut extractor = BitExtractor::new(self.key.clone(), image)?;
        // 每个嵌入字节至少占 8 块，最多还原出 2 个字节
        let max_bytes = extractor.state.cursor.capacity() / 4;
        if expected > max_bytes {
            log::warn!(
                "length header claims {expected} bytes but the image holds at most {max_bytes}"
            );
        }

        let mut payload = Vec::with_capacity(expected.min(max_bytes) as usize);
        while (payload.len() as u64) < expected {
            let (byte, space_follows) = extractor.extract_byte().map_err(|e| match e {
                StegError::RegionExhausted { .. } => StegError::TruncatedImage {
                    recovered: payload.len() as u64,
                    expected,
                },
                other => other,
            })?;

            payload.push(byte);
            if space_follows && (payload.len() as u64) < expected {
                payload.push(SPACE);
            }
        }

        log::info!("decoded {} bytes", payload.len());
        Ok(payload)
    }
}
