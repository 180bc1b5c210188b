//! Linux-safe filename sanitization.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Longest suffix (dot included) treated as an extension when truncating.
const MAX_EXTENSION: usize = 16;

/// Makes a URL-derived name safe to join onto a working folder.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Limits length to 255 bytes on a char boundary, keeping the extension
///
/// Everything else is kept as-is, so distinct segment names stay distinct.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.len() <= NAME_MAX {
        return out;
    }
    // cleanup_segments matches by suffix; keep the extension intact.
    let ext = match out.rfind('.') {
        Some(dot) if dot > 0 && out.len() - dot <= MAX_EXTENSION => &out[dot..],
        _ => "",
    };
    let stem = &out[..out.len() - ext.len()];
    let mut take = NAME_MAX - ext.len();
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &stem[..take], ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_segment_names_unchanged() {
        assert_eq!(sanitize_filename_for_linux("seg_001.ts"), "seg_001.ts");
        assert_eq!(sanitize_filename_for_linux("media 2.ts"), "media 2.ts");
    }

    #[test]
    fn replaces_separators_and_control_chars() {
        assert_eq!(sanitize_filename_for_linux("a\\b.ts"), "a_b.ts");
        assert_eq!(sanitize_filename_for_linux("seg\x00\n1.ts"), "seg__1.ts");
    }

    #[test]
    fn caps_length_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_filename_for_linux(&long);
        assert!(out.len() <= 255);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn truncation_keeps_extension() {
        let long = format!("{}.ts", "a".repeat(300));
        let out = sanitize_filename_for_linux(&long);
        assert_eq!(out.len(), 255);
        assert!(out.ends_with("aaa.ts"));

        let multibyte = format!("{}.ts", "é".repeat(200));
        let out = sanitize_filename_for_linux(&multibyte);
        assert!(out.len() <= 255);
        assert!(out.ends_with("é.ts"));
    }

    #[test]
    fn truncation_without_short_extension_cuts_plainly() {
        let long = format!("seg.{}", "x".repeat(300));
        let out = sanitize_filename_for_linux(&long);
        assert_eq!(out.len(), 255);
        assert!(out.starts_with("seg.xxx"));
    }
}
