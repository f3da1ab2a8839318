//! 内置魔数签名表。

use crate::internal::classify::traits::TypeClassifier;

use super::detected_type::DetectedType;

/// 内置的魔数识别器，覆盖常见的图片、文档、压缩包、音视频与可执行格式。
///
/// 只看字节前缀，输入长度不足某个签名时该签名视为不匹配。
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureClassifier;

impl SignatureClassifier {
    pub fn new() -> Self {
        Self
    }

    fn lookup(bytes: &[u8]) -> Option<(&'static str, &'static str)> {
        let found = match bytes {
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => ("image/png", "png"),
            [0xFF, 0xD8, 0xFF, ..] => ("image/jpeg", "jpg"),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => ("image/gif", "gif"),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => ("image/webp", "webp"),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => ("audio/vnd.wave", "wav"),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'A', b'V', b'I', b' ', ..] => ("video/vnd.avi", "avi"),
            [b'B', b'M', ..] => ("image/bmp", "bmp"),
            [0x00, 0x00, 0x01, 0x00, ..] => ("image/x-icon", "ico"),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => ("image/tiff", "tif"),
            [b'8', b'B', b'P', b'S', ..] => ("image/vnd.adobe.photoshop", "psd"),
            [b'%', b'P', b'D', b'F', b'-', ..] => ("application/pdf", "pdf"),
            [b'P', b'K', 0x03, 0x04, ..] => ("application/zip", "zip"),
            [0x1F, 0x8B, ..] => ("application/gzip", "gz"),
            [b'B', b'Z', b'h', ..] => ("application/x-bzip2", "bz2"),
            [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C, ..] => ("application/x-7z-compressed", "7z"),
            [b'R', b'a', b'r', b'!', 0x1A, 0x07, ..] => ("application/vnd.rar", "rar"),
            [0xFD, b'7', b'z', b'X', b'Z', 0x00, ..] => ("application/x-xz", "xz"),
            [0x28, 0xB5, 0x2F, 0xFD, ..] => ("application/zstd", "zst"),
            [b'I', b'D', b'3', ..] | [0xFF, 0xFB, ..] => ("audio/mpeg", "mp3"),
            [b'O', b'g', b'g', b'S', ..] => ("audio/ogg", "ogg"),
            [b'f', b'L', b'a', b'C', ..] => ("audio/x-flac", "flac"),
            [_, _, _, _, b'f', b't', b'y', b'p', b'q', b't', ..] => ("video/quicktime", "mov"),
            [_, _, _, _, b'f', b't', b'y', b'p', ..] => ("video/mp4", "mp4"),
            [0x1A, 0x45, 0xDF, 0xA3, ..] => ("video/webm", "webm"),
            [0x00, b'a', b's', b'm', ..] => ("application/wasm", "wasm"),
            [0x7F, b'E', b'L', b'F', ..] => ("application/x-elf", "elf"),
            [b'M', b'Z', ..] => ("application/x-msdownload", "exe"),
            [b'w', b'O', b'F', b'F', ..] => ("font/woff", "woff"),
            [b'w', b'O', b'F', b'2', ..] => ("font/woff2", "woff2"),
            [b'S', b'Q', b'L', b'i', b't', b'e', b' ', b'f', b'o', b'r', b'm', b'a', b't', b' ', b'3', 0x00, ..] => {
                ("application/x-sqlite3", "sqlite")
            }
            _ => return None,
        };
        Some(found)
    }
}

impl TypeClassifier for SignatureClassifier {
    fn detect(&self, bytes: &[u8]) -> Option<DetectedType> {
        Self::lookup(bytes).map(|(mime, ext)| DetectedType::new(mime, ext))
    }
}
