//! # 元数据模块
//!
//! 载荷长度以 64 位大端序写入第 0 行前 64 个像素的红色通道 LSB，每个像素 1 位。
//! 与密钥和游标无关，总是直接寻址第 0 行。

use crate::constants::{LENGTH_HEADER_BITS, METADATA_CHANNEL, METADATA_ROW, MIN_HEIGHT};
use crate::error::StegError;
use image::RgbImage;

/// 检查图像能否容纳长度头以及至少一行载荷。
pub fn ensure_dimensions(image: &RgbImage) -> Result<(), StegError> {
    let (width, height) = image.dimensions();
    if width < LENGTH_HEADER_BITS || height < MIN_HEIGHT {
        return Err(StegError::ImageTooSmall { width, height });
    }
    Ok(())
}

/// 把载荷长度写入第 0 行。
///
/// # Errors
///
/// 图像宽度小于 64 或高度小于 2 时返回 [`StegError::ImageTooSmall`]。
pub fn store_length(image: &mut RgbImage, length: u64) -> Result<(), StegError> {
    ensure_dimensions(image)?;

    for col in 0..LENGTH_HEADER_BITS {
        let bit = ((length >> (LENGTH_HEADER_BITS - 1 - col)) & 1) as u8;
        let channel = &mut image.get_pixel_mut(col, METADATA_ROW).0[METADATA_CHANNEL];
        *channel = (*channel & 0xFE) | bit;
    }

    log::debug!("stored length header {length}");
    Ok(())
}

/// 从第 0 行读出载荷长度。
///
/// # Errors
///
/// 图像宽度小于 64 或高度小于 2 时返回 [`StegError::ImageTooSmall`]。
pub fn read_length(image: &RgbImage) -> Result<u64, StegError> {
    ensure_dimensions(image)?;

    let length = (0..LENGTH_HEADER_BITS).fold(0u64, |acc, col| {
        let bit = image.get_pixel(col, METADATA_ROW).0[METADATA_CHANNEL] & 1;
        (acc << 1) | u64::from(bit)
    });

    log::debug!("read length header {length}");
    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn carrier(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 + y) as u8, (x * 3) as u8, (y * 11 + x) as u8])
        })
    }

    #[test]
    fn header_round_trips_extreme_values() {
        let mut image = carrier(64, 2);
        for length in [0, 1, 0x20, 1 << 32, u64::MAX - 1, u64::MAX] {
            store_length(&mut image, length).unwrap();
            assert_eq!(read_length(&image).unwrap(), length);
        }
    }

    #[test]
    fn most_significant_bit_goes_first() {
        let mut image = carrier(64, 2);
        store_length(&mut image, 1 << 63).unwrap();
        assert_eq!(image.get_pixel(0, 0).0[0] & 1, 1);
        assert!((1..64).all(|col| image.get_pixel(col, 0).0[0] & 1 == 0));
    }

    #[test]
    fn only_red_lsbs_of_first_64_pixels_change() {
        let original = carrier(80, 3);
        let mut image = original.clone();
        store_length(&mut image, u64::MAX).unwrap();

        for (x, y, pixel) in image.enumerate_pixels() {
            let before = original.get_pixel(x, y);
            if y == 0 && x < 64 {
                assert_eq!(pixel.0[0] & 0xFE, before.0[0] & 0xFE);
                assert_eq!(&pixel.0[1..], &before.0[1..]);
            } else {
                assert_eq!(pixel, before);
            }
        }
    }

    #[test]
    fn narrow_or_short_images_are_rejected() {
        let mut narrow = carrier(63, 10);
        assert_eq!(
            store_length(&mut narrow, 5),
            Err(StegError::ImageTooSmall { width: 63, height: 10 })
        );
        let short = carrier(64, 1);
        assert_eq!(
            read_length(&short),
            Err(StegError::ImageTooSmall { width: 64, height: 1 })
        );
    }
}
