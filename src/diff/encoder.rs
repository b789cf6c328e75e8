use std::collections::HashMap;

/// Token sequences rewritten as integer codes over a shared table.
///
/// Codes are assigned in first-seen order across `old` then `new`, so
/// `table[code]` is the token a code stands for.
#[derive(Debug, Clone, Default)]
pub struct Encoded<'a> {
    pub old: Vec<u32>,
    pub new: Vec<u32>,
    pub table: Vec<&'a str>,
}

pub fn encode<'a>(old: &[&'a str], new: &[&'a str]) -> Encoded<'a> {
    let mut index: HashMap<&'a str, u32> = HashMap::new();
    let mut table: Vec<&'a str> = Vec::new();

    let mut code_of = |token: &'a str| -> u32 {
        *index.entry(token).or_insert_with(|| {
            table.push(token);
            (table.len() - 1) as u32
        })
    };

    let old = old.iter().map(|&t| code_of(t)).collect();
    let new = new.iter().map(|&t| code_of(t)).collect();

    Encoded { old, new, table }
}

/// Map codes back to their tokens.
pub fn decode_tokens<'a>(codes: &[u32], table: &[&'a str]) -> Vec<&'a str> {
    codes.iter().map(|&c| table[c as usize]).collect()
}

pub fn decode(codes: &[u32], table: &[&str]) -> String {
    codes.iter().map(|&c| table[c as usize]).collect()
}
