extern crate logoico;

use std::io::{Cursor, ErrorKind};

//===========================================================================//

fn fake_png(len: usize) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.resize(len, 0);
    for (index, byte) in data.iter_mut().enumerate().skip(8) {
        *byte = (index % 251) as u8;
    }
    data
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..][..4]);
    u32::from_le_bytes(bytes)
}

//===========================================================================//

#[test]
fn encode_eight_byte_image_at_64() {
    let png = fake_png(8);
    let ico = logoico::encode(&png, 64).unwrap();
    assert_eq!(ico.len(), 30);
    assert_eq!(&ico[0..6], b"\x00\x00\x01\x00\x01\x00");
    assert_eq!(ico[6], 64);
    assert_eq!(ico[7], 64);
    assert_eq!(&ico[18..22], b"\x16\x00\x00\x00");
}

#[test]
fn encode_2048_byte_image_at_256() {
    let png = fake_png(2048);
    let ico = logoico::encode(&png, 256).unwrap();
    assert_eq!(ico.len(), 2070);
    assert_eq!(&ico[6..8], b"\x00\x00");
    assert_eq!(&ico[14..18], b"\x00\x08\x00\x00");
    assert_eq!(&ico[22..], png.as_slice());
}

#[test]
fn header_and_entry_fields_for_every_size() {
    let png = fake_png(100);
    for size in 1..=256u32 {
        let ico = logoico::encode(&png, size).unwrap();
        assert_eq!(ico.len(), 22 + png.len());
        assert_eq!(&ico[0..2], b"\x00\x00");
        assert_eq!(&ico[2..4], b"\x01\x00");
        assert_eq!(&ico[4..6], b"\x01\x00");
        let size_byte = if size == 256 { 0 } else { size as u8 };
        assert_eq!(ico[6], size_byte, "width byte for size {}", size);
        assert_eq!(ico[7], size_byte, "height byte for size {}", size);
        assert_eq!(ico[8], 0); // color count
        assert_eq!(ico[9], 0); // reserved
        assert_eq!(&ico[10..12], b"\x01\x00"); // planes
        assert_eq!(&ico[12..14], b"\x20\x00"); // bits per pixel
        assert_eq!(read_u32_le(&ico, 14), png.len() as u32);
        assert_eq!(read_u32_le(&ico, 18), 22);
        assert_eq!(&ico[22..], png.as_slice());
    }
}

#[test]
fn encode_is_deterministic() {
    let png = fake_png(333);
    let first = logoico::encode(&png, 32).unwrap();
    let second = logoico::encode(&png, 32).unwrap();
    assert_eq!(first, second);
}

#[test]
fn data_is_copied_without_inspection() {
    // Not a PNG at all; the encoder copies it anyway.
    let data = b"definitely not an image".to_vec();
    let ico = logoico::encode(&data, 16).unwrap();
    assert_eq!(&ico[22..], data.as_slice());
    let container = logoico::IcoContainer::read(Cursor::new(&ico)).unwrap();
    assert!(!container.entry().is_png());
}

#[test]
fn oversized_declared_size_is_clamped() {
    let png = fake_png(64);
    let clamped = logoico::encode(&png, 257).unwrap();
    assert_eq!(clamped, logoico::encode(&png, 256).unwrap());
    let huge = logoico::encode(&png, 4096).unwrap();
    assert_eq!(huge, clamped);
}

#[test]
fn zero_size_and_empty_data_are_rejected() {
    let error = logoico::encode(&fake_png(16), 0).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidInput);
    let error = logoico::encode(&[], 16).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidInput);
}

#[test]
fn container_new_matches_encode() {
    let png = fake_png(40);
    let container = logoico::IcoContainer::new(&png, 48).unwrap();
    assert_eq!(container.resource_type(), logoico::ResourceType::Icon);
    assert_eq!(container.total_len(), 62);
    let mut written = Vec::new();
    container.write(&mut written).unwrap();
    assert_eq!(written, logoico::encode(&png, 48).unwrap());
    let read = logoico::IcoContainer::read(Cursor::new(&written)).unwrap();
    assert_eq!(read, container);
}

//===========================================================================//
