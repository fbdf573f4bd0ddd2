//! # 解码器模块
//!
//! 从经过隐写的图像中按位取出数据帧：先校验魔术字符串，
//! 再依次解出扩展名长度、扩展名、数据长度与数据本体。
//! 任一阶段读取失败都会立即终止整个操作。

use std::io::{Read, Seek, SeekFrom, Write};

use crate::bitpack::{unpack_byte, unpack_u32};
use crate::constants::{
    BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32, MAGIC_STRING,
    MAX_EXTENSION_LEN,
};
use crate::error::{Result, StegoError};

/// 面向流的隐写解码器。
///
/// 持有隐写图像的输入流；除了起始处跳过头部的一次定位外，
/// 游标只会单调前进。
pub struct Decoder<R> {
    stego: R,
}

impl<R: Read + Seek> Decoder<R> {
    pub fn new(stego: R) -> Self {
        Self { stego }
    }

    /// 定位到数据帧起始处并校验魔术字符串。
    /// 不匹配说明图像中没有隐藏数据，或数据已损坏。
    pub fn decode_magic(&mut self) -> Result<()> {
        self.stego.seek(SeekFrom::Start(BMP_HEADER_SIZE as u64))?;

        let mut magic = [0u8; MAGIC_STRING.len()];
        for slot in magic.iter_mut() {
            *slot = self.decode_byte()?;
        }

        if magic != MAGIC_STRING {
            return Err(StegoError::Format(
                "the image does not contain a hidden data frame (magic string mismatch)".into(),
            ));
        }

        Ok(())
    }

    /// 解出一个 32 位长度字段，消耗 32 个载体字节。
    /// 扩展名长度与数据长度两个阶段都通过本方法完成。
    pub fn decode_size(&mut self) -> Result<u32> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_U32];
        self.stego.read_exact(&mut chunk)?;

        Ok(unpack_u32(&chunk))
    }

    /// 解出扩展名字符串。长度与字符集都有明确的边界，
    /// 越界即判定为数据帧损坏。
    pub fn decode_extension(&mut self, extension_len: u32) -> Result<String> {
        if extension_len == 0 || extension_len as usize > MAX_EXTENSION_LEN {
            return Err(StegoError::Format(format!(
                "invalid extension length {extension_len} in the hidden data frame (expected 1 to {MAX_EXTENSION_LEN})"
            )));
        }

        let mut extension = Vec::with_capacity(extension_len as usize);
        for _ in 0..extension_len {
            extension.push(self.decode_byte()?);
        }

        if !extension.iter().all(u8::is_ascii_alphanumeric) {
            return Err(StegoError::Format(
                "the decoded extension contains non-alphanumeric characters".into(),
            ));
        }

        Ok(extension.iter().map(|&byte| byte as char).collect())
    }

    /// 逐字节解出数据本体并立即写入输出流，最后刷新输出。
    pub fn decode_payload<W: Write>(&mut self, output: &mut W, payload_len: u32) -> Result<()> {
        for _ in 0..payload_len {
            let byte = self.decode_byte()?;
            output.write_all(&[byte])?;
        }
        output.flush()?;

        Ok(())
    }

    fn decode_byte(&mut self) -> Result<u8> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_BYTE];
        self.stego.read_exact(&mut chunk)?;

        Ok(unpack_byte(&chunk))
    }
}
