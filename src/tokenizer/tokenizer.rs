use crate::codec;
use crate::config::AnalyzerOptions;
use crate::stemmer;

/// Line tokenizer producing lowercased lexical tokens
///
/// Works on decoded codepoints, one at a time with a single codepoint of
/// lookahead. Input is raw bytes; malformed UTF-8 decodes to `U+FFFD`, which
/// classifies as a separator. Emitted tokens are always valid UTF-8.
pub struct Tokenizer {
    stem: bool,
}

impl Tokenizer {
    pub fn new(options: &AnalyzerOptions) -> Self {
        Self { stem: options.stem }
    }

    /// Tokenize one line of raw bytes into terms, in order of appearance.
    pub fn tokenize_line(&self, line: &[u8]) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut cur = String::new();

        let mut i = 0;
        while i < line.len() {
            let (cp, width) = codec::decode(line, i);
            let next_at = i + width;
            let next = if next_at < line.len() {
                Some(codec::decode(line, next_at).0)
            } else {
                None
            };

            if codec::is_alnum(cp) {
                push_cp(&mut cur, codec::fold(cp));
                i = next_at;
                continue;
            }
            if codec::is_hyphen(cp) && !cur.is_empty() && next.is_some_and(codec::is_alnum) {
                push_cp(&mut cur, cp);
                i = next_at;
                continue;
            }
            if cp == '+' as u32 && !cur.is_empty() && next.is_some_and(codec::is_alnum) {
                push_cp(&mut cur, cp);
                i = next_at;
                continue;
            }
            if cp == '.' as u32 {
                let prev_digit = cur.as_bytes().last().is_some_and(u8::is_ascii_digit);
                if prev_digit && next.is_some_and(codec::is_digit) {
                    push_cp(&mut cur, cp);
                    i = next_at;
                    continue;
                }
            }
            if codec::is_apostrophe(cp) && !cur.is_empty() && next.is_some_and(codec::is_letter) {
                push_cp(&mut cur, cp);
                i = next_at;
                continue;
            }

            self.flush(&mut cur, &mut tokens);
            i = next_at;
        }
        self.flush(&mut cur, &mut tokens);
        tokens
    }

    /// Normalize a query word the same way indexed tokens are normalized.
    pub fn normalize_term(&self, word: &str) -> String {
        let folded = codec::fold_str(word);
        if self.stem {
            stemmer::stem(&folded)
        } else {
            folded
        }
    }

    fn flush(&self, cur: &mut String, out: &mut Vec<String>) {
        if cur.is_empty() {
            return;
        }
        let token = std::mem::take(cur);
        out.push(if self.stem {
            stemmer::stem(&token)
        } else {
            token
        });
    }
}

fn push_cp(buf: &mut String, cp: u32) {
    // every appended codepoint is from a classified range, all valid scalars
    if let Some(ch) = char::from_u32(cp) {
        buf.push(ch);
    }
}
