//! # 编码器模块
//!
//! 将数据帧 (魔术字符串、扩展名长度、扩展名、数据长度、数据本体)
//! 按位嵌入载体图像的像素字节中。各阶段严格按声明顺序执行，
//! 任一阶段失败都会立即终止整个操作。

use std::io::{Read, Seek, SeekFrom, Write};

use crate::bitpack::{pack_byte, pack_u32};
use crate::constants::{
    BMP_HEADER_SIZE, BMP_WIDTH_OFFSET, BYTES_PER_PIXEL, CARRIER_BYTES_PER_BYTE,
    CARRIER_BYTES_PER_U32, MAGIC_STRING, MAX_EXTENSION_LEN, SIZE_FIELD_BYTES,
};
use crate::error::{Result, StegoError};

/// 面向流的隐写编码器。
///
/// 持有载体输入流与隐写输出流，两个游标单调前进；
/// 唯一的随机访问是容量检查阶段对宽高字段的定位。
pub struct Encoder<R, W> {
    carrier: R,
    output: W,
}

impl<R: Read + Seek, W: Write> Encoder<R, W> {
    pub fn new(carrier: R, output: W) -> Self {
        Self { carrier, output }
    }

    /// 容量检查：载体可提供的比特数必须严格大于数据帧所需的比特数。
    ///
    /// 宽度与高度从 BMP 头部的固定偏移处按小端序读出。
    pub fn check_capacity(&mut self, extension_len: usize, payload_len: u32) -> Result<()> {
        self.carrier.seek(SeekFrom::Start(BMP_WIDTH_OFFSET))?;

        let mut field = [0u8; 4];
        self.carrier.read_exact(&mut field)?;
        let width = u32::from_le_bytes(field);
        self.carrier.read_exact(&mut field)?;
        let height = u32::from_le_bytes(field);

        let capacity_bits = u64::from(width) * u64::from(height) * BYTES_PER_PIXEL * 8;
        let frame_bytes = (BMP_HEADER_SIZE
            + MAGIC_STRING.len()
            + SIZE_FIELD_BYTES
            + extension_len
            + SIZE_FIELD_BYTES) as u64
            + u64::from(payload_len);
        let required_bits = frame_bytes * 8;

        if capacity_bits <= required_bits {
            return Err(StegoError::Capacity {
                required_bits,
                capacity_bits,
            });
        }

        Ok(())
    }

    /// 将载体头部原样复制到输出，不做任何位替换。
    pub fn copy_header(&mut self) -> Result<()> {
        self.carrier.seek(SeekFrom::Start(0))?;

        let mut header = [0u8; BMP_HEADER_SIZE];
        self.carrier.read_exact(&mut header)?;
        self.output.write_all(&header)?;

        Ok(())
    }

    pub fn encode_magic(&mut self) -> Result<()> {
        self.encode_bytes(&MAGIC_STRING)
    }

    /// 嵌入一个 32 位长度字段，消耗 32 个载体字节。
    /// 扩展名长度与数据长度两个阶段都通过本方法完成。
    pub fn encode_size(&mut self, size: u32) -> Result<()> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_U32];
        self.carrier.read_exact(&mut chunk)?;
        pack_u32(size, &mut chunk);
        self.output.write_all(&chunk)?;

        Ok(())
    }

    pub fn encode_extension(&mut self, extension: &[u8]) -> Result<()> {
        if extension.is_empty() || extension.len() > MAX_EXTENSION_LEN {
            return Err(StegoError::Argument(format!(
                "the secret file extension must be 1 to {MAX_EXTENSION_LEN} bytes long"
            )));
        }

        self.encode_bytes(extension)
    }

    /// 从秘密文件流中逐字节读入并嵌入，每个字节消耗 8 个载体字节。
    /// 数据帧始终以流式方式写出，不会整体驻留内存。
    pub fn encode_payload<S: Read>(&mut self, mut secret: S, payload_len: u32) -> Result<()> {
        let mut byte = [0u8; 1];
        for _ in 0..payload_len {
            secret.read_exact(&mut byte)?;
            self.encode_bytes(&byte)?;
        }

        Ok(())
    }

    /// 将载体中剩余的字节原样复制到输出并刷新输出流，
    /// 保证结果仍是一幅可正常显示的图像。返回复制的字节数。
    pub fn copy_remainder(&mut self) -> Result<u64> {
        let copied = std::io::copy(&mut self.carrier, &mut self.output)?;
        self.output.flush()?;

        Ok(copied)
    }

    fn encode_bytes(&mut self, data: &[u8]) -> Result<()> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_BYTE];
        for &value in data {
            self.carrier.read_exact(&mut chunk)?;
            pack_byte(value, &mut chunk);
            self.output.write_all(&chunk)?;
        }

        Ok(())
    }
}
