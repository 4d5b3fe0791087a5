//! Token-level rewriting of raw type strings.
//!
//! Generic parameters are substituted on whole word tokens, never on
//! substrings, so `T` inside `Token` or `string#T` is left alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Maximal run of non-whitespace, non-punctuation characters.
    Word(&'a str),
    Punct(char),
}

fn is_punct(c: char) -> bool {
    matches!(c, '<' | '>' | ',' | '[' | ']' | '#')
}

/// Split a type string into words and punctuation. Whitespace is dropped.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut word_start: Option<usize> = None;
    for (idx, c) in src.char_indices() {
        if c.is_whitespace() || is_punct(c) {
            if let Some(start) = word_start.take() {
                out.push(Token::Word(&src[start..idx]));
            }
            if is_punct(c) {
                out.push(Token::Punct(c));
            }
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    if let Some(start) = word_start {
        out.push(Token::Word(&src[start..]));
    }
    out
}

/// Re-serialize tokens with `, ` after every comma.
pub fn render(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Word(w) => out.push_str(w),
            Token::Punct(',') => out.push_str(", "),
            Token::Punct(c) => out.push(*c),
        }
    }
    out
}

/// Replace type-position words for which `lookup` returns a replacement.
///
/// Words touching a `#` are a primitive keyword or a format suffix and are
/// never replaced.
pub fn substitute_words<'a, F>(src: &'a str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let tokens = tokenize(src);
    let rewritten: Vec<Token<'a>> = tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| match *token {
            Token::Word(word) => {
                let near_hash = |t: Option<&Token<'_>>| matches!(t, Some(Token::Punct('#')));
                let before = idx.checked_sub(1).and_then(|i| tokens.get(i));
                if near_hash(before) || near_hash(tokens.get(idx + 1)) {
                    return *token;
                }
                lookup(word).map(Token::Word).unwrap_or(*token)
            }
            punct => punct,
        })
        .collect();
    render(&rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_whitespace() {
        assert_eq!(
            tokenize(" Map< K ,V >[]"),
            vec![
                Token::Word("Map"),
                Token::Punct('<'),
                Token::Word("K"),
                Token::Punct(','),
                Token::Word("V"),
                Token::Punct('>'),
                Token::Punct('['),
                Token::Punct(']'),
            ]
        );
    }

    #[test]
    fn render_normalizes_commas() {
        assert_eq!(render(&tokenize("Map<K,V>")), "Map<K, V>");
        assert_eq!(render(&tokenize("Map<K ,   V>")), "Map<K, V>");
    }

    #[test]
    fn substitutes_whole_words_only() {
        let lookup = |w: &str| (w == "T").then_some("«T»");
        assert_eq!(substitute_words("T", lookup), "«T»");
        assert_eq!(substitute_words("T[]", lookup), "«T»[]");
        assert_eq!(substitute_words("Wrap<T,Token>", lookup), "Wrap<«T», Token>");
        assert_eq!(substitute_words("TT", lookup), "TT");
        assert_eq!(substitute_words("Pair<T, T>", lookup), "Pair<«T», «T»>");
    }

    #[test]
    fn words_next_to_hash_are_left_alone() {
        let lookup = |w: &str| (w == "date").then_some("«date»");
        assert_eq!(substitute_words("string#date", lookup), "string#date");
        assert_eq!(substitute_words("date#x", lookup), "date#x");
        assert_eq!(substitute_words("Wrap<date>", lookup), "Wrap<«date»>");
    }
}
