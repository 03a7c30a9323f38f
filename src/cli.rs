//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于密钥的 LSB (最低有效位) 隐写工具，用于在无损 RGB 图像 (如 PNG, BMP) 中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于密钥的 LSB (最低有效位) 隐写工具，用于在无损 RGB 图像 (如 PNG, BMP) 中隐藏或恢复任意文件。\n密钥决定数据写入哪些像素和通道，解码时必须使用同一个密钥。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏) 和 decode (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把文件内容隐藏到载体图像中。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 载体图像路径 (3 通道 8 位 RGB，无损格式)。
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// 结果图像的输出路径。默认为载体旁边的 `doctored_<文件名>`。
    #[arg(short, long = "out")]
    pub output: Option<PathBuf>,

    /// 决定嵌入位置的密钥。
    #[arg(short, long)]
    pub key: String,

    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏数据的图像路径。
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// 恢复出的文件的输出路径。默认为图像旁边的 `recovered_<文件名>.bin`。
    #[arg(short, long = "out")]
    pub output: Option<PathBuf>,

    /// 编码时使用的密钥。
    #[arg(short, long)]
    pub key: String,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}
