//! Minimal ZIP container writer, stored entries only.
//!
//! Office packages accept uncompressed members, which keeps this to the bare
//! local-header / central-directory format with a CRC-32 over each payload.
//! Only what the deck exporter needs is implemented; there is no reader.

/// Standard CRC-32 (IEEE), bitwise reflected form.
fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= b as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

struct Entry {
    name: String,
    crc: u32,
    size: u32,
    offset: u32,
}

pub struct ZipWriter {
    out: Vec<u8>,
    entries: Vec<Entry>,
}

impl ZipWriter {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Append one stored (uncompressed) file entry.
    pub fn add_file(&mut self, name: &str, data: &[u8]) {
        let offset = self.out.len() as u32;
        let crc = crc32(data);
        let size = data.len() as u32;

        // Local file header.
        self.out.extend_from_slice(&0x0403_4B50u32.to_le_bytes());
        self.out.extend_from_slice(&20u16.to_le_bytes()); // version needed
        self.out.extend_from_slice(&0u16.to_le_bytes()); // flags
        self.out.extend_from_slice(&0u16.to_le_bytes()); // method: stored
        self.out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        self.out.extend_from_slice(&0u16.to_le_bytes()); // mod date
        self.out.extend_from_slice(&crc.to_le_bytes());
        self.out.extend_from_slice(&size.to_le_bytes()); // compressed
        self.out.extend_from_slice(&size.to_le_bytes()); // uncompressed
        self.out
            .extend_from_slice(&(name.len() as u16).to_le_bytes());
        self.out.extend_from_slice(&0u16.to_le_bytes()); // extra len
        self.out.extend_from_slice(name.as_bytes());
        self.out.extend_from_slice(data);

        self.entries.push(Entry {
            name: name.to_owned(),
            crc,
            size,
            offset,
        });
    }

    /// Write the central directory and return the finished archive bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let dir_offset = self.out.len() as u32;
        for e in &self.entries {
            self.out.extend_from_slice(&0x0201_4B50u32.to_le_bytes());
            self.out.extend_from_slice(&20u16.to_le_bytes()); // made by
            self.out.extend_from_slice(&20u16.to_le_bytes()); // needed
            self.out.extend_from_slice(&0u16.to_le_bytes()); // flags
            self.out.extend_from_slice(&0u16.to_le_bytes()); // method
            self.out.extend_from_slice(&0u16.to_le_bytes()); // time
            self.out.extend_from_slice(&0u16.to_le_bytes()); // date
            self.out.extend_from_slice(&e.crc.to_le_bytes());
            self.out.extend_from_slice(&e.size.to_le_bytes());
            self.out.extend_from_slice(&e.size.to_le_bytes());
            self.out
                .extend_from_slice(&(e.name.len() as u16).to_le_bytes());
            self.out.extend_from_slice(&0u16.to_le_bytes()); // extra
            self.out.extend_from_slice(&0u16.to_le_bytes()); // comment
            self.out.extend_from_slice(&0u16.to_le_bytes()); // disk
            self.out.extend_from_slice(&0u16.to_le_bytes()); // int attrs
            self.out.extend_from_slice(&0u32.to_le_bytes()); // ext attrs
            self.out.extend_from_slice(&e.offset.to_le_bytes());
            self.out.extend_from_slice(e.name.as_bytes());
        }
        let dir_size = self.out.len() as u32 - dir_offset;
        let count = self.entries.len() as u16;

        // End of central directory.
        self.out.extend_from_slice(&0x0605_4B50u32.to_le_bytes());
        self.out.extend_from_slice(&0u16.to_le_bytes()); // disk
        self.out.extend_from_slice(&0u16.to_le_bytes()); // dir disk
        self.out.extend_from_slice(&count.to_le_bytes());
        self.out.extend_from_slice(&count.to_le_bytes());
        self.out.extend_from_slice(&dir_size.to_le_bytes());
        self.out.extend_from_slice(&dir_offset.to_le_bytes());
        self.out.extend_from_slice(&0u16.to_le_bytes()); // comment len
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc32_matches_known_vectors() {
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn archive_has_signatures_in_order() {
        let mut w = ZipWriter::new();
        w.add_file("a.txt", b"hello");
        w.add_file("dir/b.txt", b"world");
        let bytes = w.finish();
        assert_eq!(&bytes[0..4], &0x0403_4B50u32.to_le_bytes());
        // End record sits at the tail: 22 bytes with no comment.
        let tail = &bytes[bytes.len() - 22..];
        assert_eq!(&tail[0..4], &0x0605_4B50u32.to_le_bytes());
        // Two entries recorded.
        assert_eq!(u16::from_le_bytes([tail[10], tail[11]]), 2);
    }

    #[test]
    fn stored_payload_is_verbatim() {
        let mut w = ZipWriter::new();
        w.add_file("x", b"payload");
        let bytes = w.finish();
        let header_len = 30 + 1; // fixed header + name
        assert_eq!(&bytes[header_len..header_len + 7], b"payload");
    }
}
