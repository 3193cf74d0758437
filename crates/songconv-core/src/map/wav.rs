//! Sample rate lookup from the map audio.

use std::io::Read;
use std::path::Path;

use hound::WavReader;

/// Sample rate declared in the `fmt ` chunk of a WAVE stream.
pub fn sample_rate<R: Read>(reader: R) -> hound::Result<u32> {
    Ok(WavReader::new(reader)?.spec().sample_rate)
}

pub fn read_sample_rate(path: &Path) -> hound::Result<u32> {
    Ok(WavReader::open(path)?.spec().sample_rate)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use hound::{SampleFormat, WavSpec, WavWriter};

    use super::*;

    fn wav(sample_rate: u32, channels: u16) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..channels {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_reads_fmt_rate() {
        assert_eq!(sample_rate(Cursor::new(wav(44_100, 2))).unwrap(), 44_100);
        assert_eq!(sample_rate(Cursor::new(wav(48_000, 1))).unwrap(), 48_000);
    }

    #[test]
    fn test_not_a_wave_file() {
        let data = b"OggS\0\0\0\0garbage".to_vec();
        assert!(sample_rate(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_reads_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), wav(32_000, 2)).unwrap();
        assert_eq!(read_sample_rate(file.path()).unwrap(), 32_000);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_sample_rate(Path::new("does/not/exist.wav")).is_err());
    }
}
