//! Placeholder icons.
//!
//! An `ICON:` target the repository does not provide gets a small
//! placeholder image (a white 16x16 outline on a transparent or black
//! background) so toolbars still load. Placeholders are recognized by their
//! exact bytes, which keeps repeated runs byte-identical.

use std::fs;
use std::path::Path;

use crate::core::target::ends_with_ignore_case;
use crate::core::{NormalizedTarget, RepoLayout};
use crate::resolver::errors::ResolveError;

const SIZE: u32 = 16;

/// 16x16 RGBA PNG with a one-pixel white border.
const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0xf3, 0xff, 0x61, 0x00, 0x00, 0x00,
    0x1b, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0xf8, 0x4f, 0x21, 0x60,
    0x00, 0x13, 0x64, 0x82, 0x51, 0x03, 0x46, 0x0d, 0x18, 0x35, 0x80, 0xda,
    0x06, 0x50, 0x02, 0x00, 0xb8, 0xfb, 0xef, 0x11, 0x11, 0x9d, 0x86, 0x43,
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// Placeholder bytes for a file name, chosen by extension.
///
/// JPEG names have no placeholder format and return `None`.
pub fn placeholder_bytes(file_name: &str) -> Option<Vec<u8>> {
    if ends_with_ignore_case(file_name, ".png") {
        Some(PLACEHOLDER_PNG.to_vec())
    } else if ends_with_ignore_case(file_name, ".ico") {
        Some(ico())
    } else if ends_with_ignore_case(file_name, ".bmp") {
        Some(bmp())
    } else {
        None
    }
}

/// Whether the file at `path` is a placeholder written by [`write_placeholder`].
pub fn is_placeholder_icon(path: &Path) -> bool {
    let Some(expected) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(placeholder_bytes)
    else {
        return false;
    };
    fs::read(path).is_ok_and(|bytes| bytes == expected)
}

/// Write `bytes` at the target's location below the layout root.
pub fn write_placeholder(
    layout: &RepoLayout,
    target: &NormalizedTarget,
    bytes: &[u8],
) -> Result<(), ResolveError> {
    let path = layout.abs(target.as_str());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ResolveError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&path, bytes).map_err(|source| ResolveError::WriteIcon { path, source })
}

fn on_border(x: u32, y: u32) -> bool {
    x == 0 || y == 0 || x == SIZE - 1 || y == SIZE - 1
}

/// ICO container holding the PNG placeholder.
fn ico() -> Vec<u8> {
    let mut out = Vec::with_capacity(22 + PLACEHOLDER_PNG.len());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());

    out.push(SIZE as u8);
    out.push(SIZE as u8);
    out.push(0);
    out.push(0);
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&(PLACEHOLDER_PNG.len() as u32).to_le_bytes());
    out.extend_from_slice(&22u32.to_le_bytes());

    out.extend_from_slice(PLACEHOLDER_PNG);
    out
}

/// Uncompressed 24-bit bottom-up BMP.
fn bmp() -> Vec<u8> {
    // 16 pixels * 3 bytes per row is already 4-byte aligned.
    let pixel_bytes = SIZE * SIZE * 3;
    let file_size = 14 + 40 + pixel_bytes;

    let mut out = Vec::with_capacity(file_size as usize);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(SIZE as i32).to_le_bytes());
    out.extend_from_slice(&(SIZE as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&pixel_bytes.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for y in 0..SIZE {
        for x in 0..SIZE {
            let v = if on_border(x, y) { 0xff } else { 0x00 };
            out.extend_from_slice(&[v, v, v]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RepoFixture;

    #[test]
    fn test_formats_by_extension() {
        let png = placeholder_bytes("fader.PNG").unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));

        let ico = placeholder_bytes("a.ico").unwrap();
        assert_eq!(&ico[..4], &[0, 0, 1, 0]);
        assert_eq!(&ico[22..], PLACEHOLDER_PNG);

        let bmp = placeholder_bytes("a.bmp").unwrap();
        assert_eq!(&bmp[..2], b"BM");
        assert_eq!(bmp.len(), 14 + 40 + 16 * 16 * 3);
        assert_eq!(u32::from_le_bytes([bmp[2], bmp[3], bmp[4], bmp[5]]) as usize, bmp.len());

        assert!(placeholder_bytes("a.jpg").is_none());
        assert!(placeholder_bytes("a.jpeg").is_none());
    }

    #[test]
    fn test_write_and_detect() {
        let fx = RepoFixture::new().file("Data/toolbar_icons/real.png", "real art");
        let layout = fx.layout();
        let target = NormalizedTarget::new("Data/toolbar_icons/new.png");

        let bytes = placeholder_bytes(target.file_name()).unwrap();
        write_placeholder(&layout, &target, &bytes).unwrap();

        assert!(is_placeholder_icon(&fx.path("Data/toolbar_icons/new.png")));
        assert!(!is_placeholder_icon(&fx.path("Data/toolbar_icons/real.png")));
        assert!(!is_placeholder_icon(&fx.path("Data/toolbar_icons/none.png")));
    }
}
