/// 保存载荷长度的保留行。
/// 第 0 行只用于元数据，载荷从第 1 行开始写入。
pub const METADATA_ROW: u32 = 0;

/// 保存长度头的颜色通道 (红色)。
pub const METADATA_CHANNEL: usize = 0;

/// 长度头的位宽。
/// 长度按 `u64` 存储，每个像素存 1 bit，因此第 0 行需要至少 64 个像素。
pub const LENGTH_HEADER_BITS: u32 = 64;

/// 图像最少需要的行数：第 0 行放元数据，其余行放载荷。
pub const MIN_HEIGHT: u32 = 2;

/// 每处理一个像素块从密钥中取出的位数。
pub const KEY_WINDOW_BITS: usize = 3;

/// 保留的 2 位密钥码，表示跳过当前像素块。
pub const SKIP_CODE: u8 = 0b11;

/// 每个像素的颜色通道数。
pub const CHANNELS: usize = 3;

/// 由侧通道标志隐式编码的字节 (ASCII 空格)。
pub const SPACE: u8 = b' ';
