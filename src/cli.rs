//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在未压缩的 BMP 图像中隐藏或恢复任意秘密文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在未压缩的 BMP 图像中隐藏或恢复任意秘密文件。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (编码) 和 decode (解码)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将秘密文件嵌入未压缩的 BMP 图像中。
    Encode(EncodeArgs),

    /// 从经过隐写的 BMP 图像中恢复隐藏的文件。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 用作载体的 BMP 图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的秘密文件路径。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径 (默认为载体同目录下的 stego.bmp)。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已嵌入隐藏数据的 BMP 图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复后保存秘密文件内容的输出路径 (默认为图像同目录下的 decode.<扩展名>)。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
