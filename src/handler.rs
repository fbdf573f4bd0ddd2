//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责校验参数、协调文件 I/O、按阶段驱动核心编码/解码器，
//! 以及向用户报告结果。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::constants::{
    DEFAULT_DECODE_STEM, DEFAULT_EXTENSION, DEFAULT_STEGO_NAME, MAX_EXTENSION_LEN,
};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::StegoError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责校验输入路径与扩展名、检查隐写空间是否足够、按阶段驱动编码器
/// 嵌入数据帧，最后向用户报告结果图像的保存位置。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与 `--force` 标志的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 载体不是 `.bmp` 文件，或秘密文件的扩展名不合法。
/// * 无法打开输入文件或创建输出文件。
/// * 图像没有足够的空间来隐藏秘密文件。
/// * 任何一个编码阶段在执行过程中失败。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    require_bmp(&args.image, "carrier image")?;
    let extension = secret_extension(&args.secret)?;

    let payload_len = fs::metadata(&args.secret)
        .with_context(|| {
            format!(
                "Unable to read secret file: {}",
                args.secret.to_string_lossy().red().bold()
            )
        })?
        .len();
    let payload_len = u32::try_from(payload_len).map_err(|_| {
        StegoError::Argument(format!(
            "the secret file is too large to hide ({payload_len} bytes; the size field is 32 bits)"
        ))
    })?;

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| args.image.with_file_name(DEFAULT_STEGO_NAME));
    ensure_writable(&dest, args.force)?;

    let carrier = File::open(&args.image).with_context(|| {
        format!(
            "Unable to open image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let secret = File::open(&args.secret).with_context(|| {
        format!(
            "Unable to open secret file: {}",
            args.secret.to_string_lossy().red().bold()
        )
    })?;
    let output = File::create(&dest).with_context(|| {
        format!(
            "Unable to create target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    let mut encoder = Encoder::new(BufReader::new(carrier), BufWriter::new(output));

    // 各编码阶段严格按顺序执行，任一阶段失败都会带着阶段信息向上返回
    encoder
        .check_capacity(extension.len(), payload_len)
        .context("Failed the capacity check. The image may be too small or not a valid BMP file.")?;
    encoder
        .copy_header()
        .context("Failed to copy the image header.")?;
    encoder
        .encode_magic()
        .context("Failed to encode the magic string.")?;
    encoder
        .encode_size(extension.len() as u32)
        .context("Failed to encode the secret file extension size.")?;
    encoder
        .encode_extension(extension.as_bytes())
        .context("Failed to encode the secret file extension.")?;
    encoder
        .encode_size(payload_len)
        .context("Failed to encode the secret file size.")?;
    encoder
        .encode_payload(BufReader::new(secret), payload_len)
        .context(
            "Failed to encode the secret file data. \nThe image might not have enough capacity or is corrupted.",
        )?;
    encoder
        .copy_remainder()
        .context("Failed to copy the remaining image data.")?;

    println!(
        "The secret file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责校验输入路径、按阶段驱动解码器取出数据帧，并根据解出的扩展名
/// 推导默认输出文件名，最后向用户报告恢复文件的保存位置。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与 `--force` 标志的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输入不是 `.bmp` 文件。
/// * 图像中没有隐藏数据 (魔术字符串不匹配)，或数据帧已损坏。
/// * 无法打开输入文件或创建输出文件。
/// * 任何一个解码阶段在执行过程中失败。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    require_bmp(&args.image, "stego image")?;

    let stego = File::open(&args.image).with_context(|| {
        format!(
            "Unable to open image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let mut decoder = Decoder::new(BufReader::new(stego));

    decoder.decode_magic().with_context(|| {
        format!(
            "Failed to decode the magic string from '{}'. \nThe image may not contain hidden data or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let extension_size = decoder
        .decode_size()
        .context("Failed to decode the secret file extension size.")?;
    let extension = decoder
        .decode_extension(extension_size)
        .context("Failed to decode the secret file extension.")?;

    // 默认输出文件名依赖解出的扩展名，因此输出文件此时才创建
    let dest = args.dest.clone().unwrap_or_else(|| {
        args.image
            .with_file_name(format!("{DEFAULT_DECODE_STEM}.{extension}"))
    });
    ensure_writable(&dest, args.force)?;
    let output = File::create(&dest).with_context(|| {
        format!(
            "Unable to create target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    let mut writer = BufWriter::new(output);

    let payload_len = decoder
        .decode_size()
        .context("Failed to decode the secret file size.")?;
    decoder
        .decode_payload(&mut writer, payload_len)
        .context("Failed to decode the secret file data. \nThe image appears to be truncated or corrupted.")?;

    println!(
        "The hidden file has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 校验路径的扩展名是 `.bmp`。
fn require_bmp(path: &Path, role: &str) -> Result<(), StegoError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("bmp") => Ok(()),
        _ => Err(StegoError::Argument(format!(
            "the {role} must be a .bmp file: {}",
            path.to_string_lossy()
        ))),
    }
}

/// 从秘密文件路径中推导要嵌入的扩展名。
/// 缺少扩展名时退回到默认值；超长或含非字母数字字符的扩展名被拒绝。
fn secret_extension(path: &Path) -> Result<String, StegoError> {
    let extension = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext.to_string(),
        None => DEFAULT_EXTENSION.to_string(),
    };

    if extension.is_empty() || extension.len() > MAX_EXTENSION_LEN {
        return Err(StegoError::Argument(format!(
            "the secret file extension '{extension}' must be 1 to {MAX_EXTENSION_LEN} bytes long"
        )));
    }
    if !extension.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
        return Err(StegoError::Argument(format!(
            "the secret file extension '{extension}' must be ASCII alphanumeric"
        )));
    }

    Ok(extension)
}

/// 覆盖保护：目标文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<(), StegoError> {
    if path.exists() && !force {
        return Err(StegoError::Argument(format!(
            "Output file already exists: {} (pass --force to overwrite)",
            path.to_string_lossy()
        )));
    }

    Ok(())
}
