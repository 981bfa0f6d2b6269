//! Frame Container - 长度前缀帧容器编解码
//!
//! 磁盘格式（DCA raw）：重复的 `[u16 小端长度][长度字节的帧数据]`，
//! 在长度前缀边界处以 EOF 结束。没有魔数、版本号或尾部元数据。

use std::io::{ErrorKind, Read, Write};

use super::{DecodeError, Frame};

/// 长度前缀字节数
const PREFIX_LEN: usize = 2;

/// 从字节流解码全部帧
///
/// 流恰好在前缀边界结束时返回已收集的帧（空流得到空列表）。
/// 长度前缀只剩一个字节时同样视为结束，丢弃该字节。
/// 声明长度超过剩余字节时返回 `TruncatedFrame`，不会产生被截短的帧。
/// 调用方负责打开和关闭底层文件。
pub fn decode_frames<R: Read>(mut reader: R) -> Result<Vec<Frame>, DecodeError> {
    let mut frames = Vec::new();

    loop {
        let index = frames.len();

        let mut prefix = [0u8; PREFIX_LEN];
        match read_full(&mut reader, &mut prefix)? {
            0 => return Ok(frames),
            PREFIX_LEN => {}
            _ => {
                tracing::warn!(frames = index, "Dangling length prefix byte ignored");
                return Ok(frames);
            }
        }

        let declared = u16::from_le_bytes(prefix) as usize;
        let mut payload = vec![0u8; declared];
        let available = read_full(&mut reader, &mut payload)?;
        if available < declared {
            return Err(DecodeError::TruncatedFrame {
                index,
                declared,
                available,
            });
        }

        frames.push(Frame::new(payload));
    }
}

/// 将帧编码为容器格式
pub fn encode_frames<'a, W, I>(frames: I, mut writer: W) -> Result<(), DecodeError>
where
    W: Write,
    I: IntoIterator<Item = &'a Frame>,
{
    for (index, frame) in frames.into_iter().enumerate() {
        let len = u16::try_from(frame.len()).map_err(|_| DecodeError::FrameTooLarge {
            index,
            len: frame.len(),
        })?;
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(frame.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// 尽量填满 buf，返回实际读取的字节数（遇到 EOF 时可能小于 buf.len()）
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, DecodeError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecodeError::Io(e)),
        }
    }
    Ok(filled)
}
