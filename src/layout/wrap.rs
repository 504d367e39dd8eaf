/// Greedy word wrap.
///
/// Splits `text` into lines no wider than `max_width` as reported by `measure`. Explicit newlines
/// always break. Words wider than a full line are split between characters. Runs of whitespace
/// collapse to a single space. Blank input yields a single empty line so it still occupies
/// vertical space.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_word(word, max_width, &measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    lines
}

fn split_word<F>(word: &str, max_width: f32, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if measure(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }

    pieces.push(piece);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> f32 {
        text.chars().count() as f32
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("Go", 10.0, chars), ["Go"]);
    }

    #[test]
    fn breaks_between_words() {
        let lines = wrap_text("the quick brown fox jumps", 10.0, chars);
        assert_eq!(lines, ["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn long_word_is_split() {
        let lines = wrap_text("abcdefghijkl xy", 5.0, chars);
        assert_eq!(lines, ["abcde", "fghij", "kl xy"]);
    }

    #[test]
    fn blank_text_keeps_one_line() {
        assert_eq!(wrap_text("", 10.0, chars), [""]);
        assert_eq!(wrap_text("   ", 10.0, chars), [""]);
    }

    #[test]
    fn newlines_force_breaks() {
        assert_eq!(wrap_text("one\ntwo", 50.0, chars), ["one", "two"]);
    }

    #[test]
    fn no_line_exceeds_width() {
        let text = "Led migration of payment services to a distributed architecture \
                    serving millions of requests per day";
        for line in wrap_text(text, 20.0, chars) {
            assert!(chars(&line) <= 20.0, "{line:?} is too wide");
        }
    }
}
