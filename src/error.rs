//! # 错误类型模块
//!
//! 定义隐写操作中可能出现的各类错误。
//! 调用方可以通过错误种类区分参数、I/O、容量与格式四类问题。

use std::fmt;
use std::io;

/// 隐写操作的错误类型。
#[derive(Debug)]
pub enum StegoError {
    /// 无效的参数 (文件名或扩展名不合法)。
    Argument(String),

    /// 底层流的打开、读取或写入失败。
    Io(io::Error),

    /// 载体图像的容量不足以容纳数据帧。
    Capacity {
        /// 数据帧所需的比特数。
        required_bits: u64,
        /// 载体图像可提供的比特数。
        capacity_bits: u64,
    },

    /// 解码时数据帧不合法 (魔术字符串不匹配或字段越界)。
    Format(String),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StegoError::Argument(msg) => write!(f, "{msg}"),
            StegoError::Io(err) => write!(f, "I/O error: {err}"),
            StegoError::Capacity {
                required_bits,
                capacity_bits,
            } => write!(
                f,
                "Not enough space in the image to hide the secret file. \nRequired: {required_bits} bits, Available: {capacity_bits} bits"
            ),
            StegoError::Format(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StegoError {}

impl From<io::Error> for StegoError {
    fn from(err: io::Error) -> Self {
        StegoError::Io(err)
    }
}

/// 隐写操作的结果类型别名。
pub type Result<T> = std::result::Result<T, StegoError>;
