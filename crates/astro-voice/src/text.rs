//! Text cleanup before synthesis

/// Remove markdown heading and emphasis markers (`#`, `*`) so they are not read aloud
pub fn clean_for_speech(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '#' | '*')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markdown_markers() {
        assert_eq!(
            clean_for_speech("## Jupiter\n**Largest** planet, *mostly* gas."),
            " Jupiter\nLargest planet, mostly gas."
        );
    }

    #[test]
    fn test_leaves_other_punctuation() {
        let text = "Mars - the _red_ planet (1.5 AU)!";
        assert_eq!(clean_for_speech(text), text);
    }

    #[test]
    fn test_empty() {
        assert_eq!(clean_for_speech(""), "");
        assert_eq!(clean_for_speech("#*#"), "");
    }
}
