//! Sample file contents with known signatures

/// Minimal DOS header of a Windows executable
pub fn pe_executable() -> Vec<u8> {
    let mut data = vec![0x4D, 0x5A, 0x90, 0x00, 0x03, 0x00, 0x00, 0x00];
    data.resize(128, 0x00);
    data
}

pub fn pdf_document() -> Vec<u8> {
    b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n".to_vec()
}

pub fn jpeg_image() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46]
}

pub fn batch_script() -> Vec<u8> {
    b"@echo off\r\nrem cleanup\r\n".to_vec()
}

pub fn javascript() -> Vec<u8> {
    b"function main() { return 1; }\n".to_vec()
}

pub fn plain_text() -> Vec<u8> {
    b"Quarterly numbers attached.\n".to_vec()
}
