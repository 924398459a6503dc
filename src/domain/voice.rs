//! Voice Catalog - 声音与语言目录
//!
//! Gemini TTS 的预置声音和支持语言列表，以及语音选择器类型

/// Gemini TTS 预置声音列表
pub const SUPPORTED_VOICES: &[&str] = &[
    "Zephyr",
    "Puck",
    "Charon",
    "Kore",
    "Fenrir",
    "Leda",
    "Orus",
    "Aoede",
    "Callirrhoe",
    "Autonoe",
    "Enceladus",
    "Iapetus",
    "Umbriel",
    "Algieba",
    "Despina",
    "Erinome",
    "Algenib",
    "Rasalgethi",
    "Laomedeia",
    "Achernar",
    "Alnilam",
    "Schedar",
    "Gacrux",
    "Pulcherrima",
    "Achird",
    "Zubenelgenubi",
    "Vindemiatrix",
    "Sadachbia",
    "Sadaltager",
    "Sulafat",
];

/// Gemini TTS 支持的语言代码（BCP-47）
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar-EG", "en-US", "fr-FR", "hi-IN", "id-ID", "it-IT", "ja-JP", "ko-KR", "pt-BR", "ru-RU",
    "nl-NL", "pl-PL", "th-TH", "tr-TR", "vi-VN", "ro-RO", "uk-UA", "bn-BD", "en-IN", "mr-IN",
    "ta-IN", "te-IN", "de-DE", "es-US",
];

/// 默认声音
pub const DEFAULT_VOICE: &str = "Kore";

/// 检查声音名称是否在预置列表中
pub fn is_supported_voice(name: &str) -> bool {
    SUPPORTED_VOICES.contains(&name)
}

/// 说话人配置（多说话人合成）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerConfig {
    /// 文本中的说话人标记
    pub speaker: String,
    /// 分配给该说话人的声音
    pub voice_name: String,
}

/// 语音选择器
///
/// 单声音合成使用一个预置声音名；多说话人合成使用有序的
/// (说话人, 声音) 配置列表，顺序由调用方给定且参与缓存 key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelector {
    /// 单个预置声音
    Single(String),
    /// 多说话人配置，保持调用方顺序
    Multi(Vec<SpeakerConfig>),
}

impl VoiceSelector {
    /// 规范化的声音描述串，作为缓存 key 的一部分
    ///
    /// 单声音: `Kore`
    /// 多说话人: `Joe_Kore_Jane_Puck`（按调用方顺序拼接，不排序）
    pub fn descriptor(&self) -> String {
        match self {
            VoiceSelector::Single(name) => name.clone(),
            VoiceSelector::Multi(configs) => configs
                .iter()
                .map(|c| format!("{}_{}", c.speaker, c.voice_name))
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}
