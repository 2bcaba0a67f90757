//! Fixtures shared by the unit tests.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Cursor;
use tar::{Builder, EntryType, Header};

/// A small valid PNG.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// A tar.gz holding the given entries in order.
///
/// Names are written into the header verbatim so `\` separators survive on
/// every platform.
pub fn bundle(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, data) in entries {
        let raw = name.as_bytes();
        assert!(raw.len() < 100, "entry name too long for a plain header");

        let mut header = Header::new_gnu();
        header.as_old_mut().name[..raw.len()].copy_from_slice(raw);
        header.set_entry_type(EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
