//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。
//! 只有核心算法成功之后才会写出任何文件。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::steganography::StegCodec;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ColorType, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 读取载体图像，并确认它是 3 通道 8 位的 RGB 图像。
fn load_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        image.color() == ColorType::Rgb8,
        "Unsupported pixel format {} in {}. \nA 3-channel, 8-bit RGB image is required.",
        format!("{:?}", image.color()).red().bold(),
        path.to_string_lossy().red().bold()
    );

    Ok(image.into_rgb8())
}

/// 确定输出路径：优先使用用户给出的路径，否则使用默认路径。
/// 目标已存在且未指定 `--force` 时报错。
fn resolve_output(explicit: Option<PathBuf>, default: PathBuf, force: bool) -> Result<PathBuf> {
    let dest = explicit.unwrap_or(default);

    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    Ok(dest)
}

/// 在 `source` 同目录下生成 `<prefix><文件名>` 形式的路径。
fn sibling_path(source: &Path, file_name: String) -> PathBuf {
    source.with_file_name(file_name)
}

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责读取载体图像和载荷文件、调用隐写核心嵌入数据，最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和密钥的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 密钥为空。
/// * 无法读取输入的图像或载荷文件，或图像不是 RGB8 格式。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像太小或空间不足以隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let codec = StegCodec::new(&args.key).context("Unable to use the given key")?;

    let default_dest = sibling_path(
        &args.input,
        format!(
            "doctored_{}",
            args.input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "carrier.png".to_string())
        ),
    );
    let dest = resolve_output(args.output, default_dest, args.force)?;

    let mut picture = load_image(&args.input)?;

    let payload = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    log::info!(
        "hiding {} bytes in {}x{} carrier {}",
        payload.len(),
        picture.width(),
        picture.height(),
        args.input.display()
    );

    codec.encode(&mut picture, &payload).with_context(|| {
        format!(
            "Not enough space or unusable carrier: failed to hide {} bytes in {}. \nNothing was written.",
            payload.len().to_string().red().bold(),
            args.input.to_string_lossy().red().bold()
        )
    })?;

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数获取载荷，
/// 最后将恢复的内容原样写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和密钥的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 密钥为空。
/// * 无法读取输入的图像文件，或图像不是 RGB8 格式。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像在恢复出声明长度之前耗尽。
/// * 无法写入到目标文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let codec = StegCodec::new(&args.key).context("Unable to use the given key")?;

    let default_dest = sibling_path(
        &args.input,
        format!(
            "recovered_{}.bin",
            args.input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "payload".to_string())
        ),
    );
    let dest = resolve_output(args.output, default_dest, args.force)?;

    let picture = load_image(&args.input)?;

    let payload = codec.decode(&picture).with_context(|| {
        format!(
            "Failed to recover the payload from '{}'. \nThe image may not contain hidden data, the key may be wrong, or the image is corrupted.",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, &payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes have been successfully recovered and saved: {}",
        payload.len().to_string().green(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
