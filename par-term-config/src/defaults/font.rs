//! Default values for font and text-layout settings.

pub fn font_size() -> f32 {
    13.0 // Pixels
}

pub fn font_family() -> String {
    "JetBrains Mono".to_string()
}

pub fn line_spacing() -> f32 {
    1.0 // Default line height multiplier
}

pub fn enable_ligatures() -> bool {
    true
}

pub fn emoji_fallbacks() -> Vec<String> {
    [
        "Apple Color Emoji",
        "Noto Color Emoji",
        "Segoe UI Emoji",
        "Twemoji",
    ]
    .map(String::from)
    .to_vec()
}

pub fn cjk_fallbacks() -> Vec<String> {
    [
        "Apple SD Gothic Neo",
        "Noto Sans CJK KR",
        "Noto Sans CJK SC",
        "Noto Sans CJK JP",
        "Source Han Sans",
        "Malgun Gothic",
        "Microsoft YaHei",
        "PingFang SC",
    ]
    .map(String::from)
    .to_vec()
}

pub fn general_fallbacks() -> Vec<String> {
    [
        "Baskerville",
        "Noto Serif",
        "DejaVu Serif",
        "Times New Roman",
        "Noto Sans",
        "DejaVu Sans",
        "Symbola",
    ]
    .map(String::from)
    .to_vec()
}
