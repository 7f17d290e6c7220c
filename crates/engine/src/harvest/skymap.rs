// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sky map packaging

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};
use std::path::Path;

/// Gzip `source` into `dest`, returning the compressed bytes
pub fn compress(source: &Path, dest: &Path) -> io::Result<Vec<u8>> {
    let raw = std::fs::read(source)?;
    let mut encoder = GzEncoder::new(Vec::with_capacity(raw.len() / 2), Compression::default());
    encoder.write_all(&raw)?;
    let compressed = encoder.finish()?;
    std::fs::write(dest, &compressed)?;
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn compressed_copy_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("skymap_0.fits");
        let dest = dir.path().join("bayeswave.fits.gz");
        std::fs::write(&source, b"SIMPLE  =                    T").unwrap();

        let bytes = compress(&source, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), bytes);
        assert!(source.exists(), "source must be kept");

        let mut decoded = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, b"SIMPLE  =                    T");
    }
}
