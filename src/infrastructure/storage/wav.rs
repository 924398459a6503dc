//! WAV Encoding - PCM 数据封装为 WAV 容器
//!
//! Gemini TTS 输出为 24kHz, 16-bit, 单声道的原始小端 PCM，
//! 这里只负责加上标准 44 字节 RIFF 头，不做任何重采样或转码

/// Gemini TTS 输出采样率
pub const SAMPLE_RATE: u32 = 24_000;

/// Gemini TTS 输出位深
pub const BITS_PER_SAMPLE: u16 = 16;

/// Gemini TTS 输出声道数
pub const CHANNELS: u16 = 1;

/// 将原始 PCM 字节封装为 WAV 容器
pub fn encode_pcm_as_wav(
    pcm: &[u8],
    sample_rate: u32,
    bits_per_sample: u16,
    channels: u16,
) -> Vec<u8> {
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample / 8) as u32;
    let block_align = channels * (bits_per_sample / 8);

    let data_size = pcm.len();
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());
    wav.extend_from_slice(pcm);

    wav
}

/// 按 Gemini TTS 的固定输出格式封装
pub fn encode_default(pcm: &[u8]) -> Vec<u8> {
    encode_pcm_as_wav(pcm, SAMPLE_RATE, BITS_PER_SAMPLE, CHANNELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header_markers() {
        let wav = encode_default(&[0u8; 1000]);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), 44 + 1000);
    }

    #[test]
    fn test_wav_header_fields() {
        let wav = encode_default(&[0u8; 480]);

        let channels = u16::from_le_bytes([wav[22], wav[23]]);
        let sample_rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        let bits_per_sample = u16::from_le_bytes([wav[34], wav[35]]);
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);

        assert_eq!(channels, 1);
        assert_eq!(sample_rate, 24_000);
        assert_eq!(bits_per_sample, 16);
        assert_eq!(data_size, 480);
    }

    #[test]
    fn test_wav_payload_is_unchanged() {
        let pcm: Vec<u8> = (0..=255).collect();
        let wav = encode_default(&pcm);
        assert_eq!(&wav[44..], pcm.as_slice());
    }
}
