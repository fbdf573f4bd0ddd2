/// BMP 文件的标准头部大小 (字节)。
/// 隐写操作将跳过这个头部，从像素数据开始。
pub const BMP_HEADER_SIZE: usize = 54;

/// 用于标记图像中含有隐藏数据帧的魔术字符串 (2 字节)。
/// 编码时紧随头部写入，解码时用于校验输入图像。
pub const MAGIC_STRING: [u8; 2] = *b"#*";

/// BMP 头部中图像宽度字段的偏移量 (字节)。
/// 宽度与高度各占 4 字节小端序整数，高度紧随宽度之后。
pub const BMP_WIDTH_OFFSET: u64 = 18;

/// 每个像素占用的字节数 (24 位色 BMP)。
pub const BYTES_PER_PIXEL: u64 = 3;

/// 隐写单个数据字节所需的载体字节数。
/// 每个载体字节的最低有效位存储 1 bit，一个字节需要 8 个载体字节。
pub const CARRIER_BYTES_PER_BYTE: usize = 8;

/// 隐写一个 32 位长度字段所需的载体字节数。
pub const CARRIER_BYTES_PER_U32: usize = 32;

/// 数据帧中长度字段本身的字节数 (u32)。
pub const SIZE_FIELD_BYTES: usize = 4;

/// 秘密文件扩展名允许的最大长度 (字节)。
pub const MAX_EXTENSION_LEN: usize = 7;

/// 秘密文件缺少扩展名时使用的默认扩展名。
pub const DEFAULT_EXTENSION: &str = "txt";

/// 编码输出图像的默认文件名。
pub const DEFAULT_STEGO_NAME: &str = "stego.bmp";

/// 解码输出文件的默认主文件名 (扩展名取自解码结果)。
pub const DEFAULT_DECODE_STEM: &str = "decode";
