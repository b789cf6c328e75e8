/// Split text into diffable chunks.
///
/// Words (runs of non-space, non-quote characters) form one token each, every
/// whitespace character is its own token, and a quoted literal is kept whole
/// from its opening quote through the matching closing quote. An unterminated
/// quote swallows the rest of the input.
///
/// Tokens borrow from `input` and concatenate back to it exactly.
pub fn tokenize(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut quote: Option<char> = None;

    for (idx, ch) in input.char_indices() {
        match quote {
            Some(open) => {
                if ch == open {
                    let end = idx + ch.len_utf8();
                    tokens.push(&input[start..end]);
                    start = end;
                    quote = None;
                }
            }
            None if is_quote(ch) => {
                flush(&mut tokens, input, start, idx);
                start = idx;
                quote = Some(ch);
            }
            None if ch.is_whitespace() => {
                flush(&mut tokens, input, start, idx);
                let end = idx + ch.len_utf8();
                tokens.push(&input[idx..end]);
                start = end;
            }
            None => {}
        }
    }

    flush(&mut tokens, input, start, input.len());
    tokens
}

/// Whitespace tokens don't count toward context budgets.
pub fn is_whitespace_token(token: &str) -> bool {
    token.chars().all(char::is_whitespace)
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

fn flush<'a>(tokens: &mut Vec<&'a str>, input: &'a str, start: usize, end: usize) {
    if start < end {
        tokens.push(&input[start..end]);
    }
}
