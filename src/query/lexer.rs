//! Lexer for boolean query expressions

use crate::codec;

/// Token kinds produced by the query lexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A word that is not an operator, carried with its original spelling.
    Term(String),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Eof,
}

/// Lexer over a query string.
///
/// Skips ASCII whitespace; `(`, `)`, and a leading `-` are single-character
/// tokens; anything else is a maximal run of non-whitespace, non-paren
/// characters. Words matching `and` / `or` / `not` after ASCII + Cyrillic
/// case folding become operators.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        if self.position >= self.input.len() {
            return Token::Eof;
        }
        match self.input[self.position] {
            '(' => {
                self.position += 1;
                Token::LeftParen
            }
            ')' => {
                self.position += 1;
                Token::RightParen
            }
            '-' => {
                self.position += 1;
                Token::Not
            }
            _ => self.read_word(),
        }
    }

    fn read_word(&mut self) -> Token {
        let start = self.position;
        while self.position < self.input.len() {
            let ch = self.input[self.position];
            if ch.is_ascii_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            self.position += 1;
        }
        let word: String = self.input[start..self.position].iter().collect();
        match codec::fold_str(&word).as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            _ => Token::Term(word),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && self.input[self.position].is_ascii_whitespace()
        {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token == Token::Eof;
            out.push(token);
            if done {
                return out;
            }
        }
    }

    #[test]
    fn test_terms_and_operators() {
        assert_eq!(
            lex_all("alpha AND beta OR not gamma"),
            vec![
                Token::Term("alpha".to_string()),
                Token::And,
                Token::Term("beta".to_string()),
                Token::Or,
                Token::Not,
                Token::Term("gamma".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_parens_and_minus() {
        assert_eq!(
            lex_all("(a) -b"),
            vec![
                Token::LeftParen,
                Token::Term("a".to_string()),
                Token::RightParen,
                Token::Not,
                Token::Term("b".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_operator_fold_is_ascii_and_cyrillic() {
        assert_eq!(lex_all("AnD")[0], Token::And);
        assert_eq!(lex_all("NOT")[0], Token::Not);
        // Cyrillic folding applies, but Cyrillic words are not operators
        assert_eq!(lex_all("ИЛИ")[0], Token::Term("ИЛИ".to_string()));
    }

    #[test]
    fn test_interior_minus_stays_in_word() {
        assert_eq!(
            lex_all("stop-now"),
            vec![Token::Term("stop-now".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_term_keeps_original_case() {
        assert_eq!(lex_all("Alpha")[0], Token::Term("Alpha".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex_all("   "), vec![Token::Eof]);
    }
}
