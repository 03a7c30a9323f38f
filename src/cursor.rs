//! # 像素游标模块
//!
//! 在可编码区域 (第 1 行到最后一行) 中按行优先顺序移动，第 0 行永远不会被访问。

use crate::error::StegError;

/// 可编码区域中的当前像素块位置。
#[derive(Debug, Clone)]
pub struct PixelCursor {
    width: u32,
    height: u32,
    row: u32,
    col: u32,
    claimed: bool,
}

impl PixelCursor {
    /// 创建一个指向 `(1, 0)` 的游标。调用方需保证 `height >= 2` 且 `width >= 1`。
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            row: 1,
            col: 0,
            claimed: false,
        }
    }

    /// 当前位置 `(row, col)`。
    pub fn current(&self) -> (u32, u32) {
        (self.row, self.col)
    }

    /// 前进到下一个像素块，行末换行。
    ///
    /// # Errors
    ///
    /// 已经位于最后一个像素块 `(height-1, width-1)` 时返回 [`StegError::RegionExhausted`]。
    pub fn advance(&mut self) -> Result<(), StegError> {
        let last_row = self.height.saturating_sub(1);
        let last_col = self.width.saturating_sub(1);

        if self.row >= last_row && self.col >= last_col {
            return Err(StegError::RegionExhausted {
                row: self.row,
                col: self.col,
            });
        }

        if self.col == last_col {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Ok(())
    }

    /// 领取下一个像素块。
    ///
    /// 第一次调用返回起始位置，之后每次调用先前进一步。
    /// 因此最后一个像素块也能被使用，只有继续索取时才会失败。
    pub fn next_block(&mut self) -> Result<(u32, u32), StegError> {
        if self.claimed {
            self.advance()?;
        } else {
            self.claimed = true;
        }
        Ok(self.current())
    }

    /// 可编码区域的像素块总数。
    pub fn capacity(&self) -> u64 {
        u64::from(self.height.saturating_sub(1)) * u64::from(self.width)
    }
}
