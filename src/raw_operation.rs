use std::fmt::Debug;

use crate::tokenizer::token::Token;

/// A token-level diff entry: a run of tokens that were matched, removed, or
/// added. This is the intermediate representation the generators work in
/// before coalescing token runs into the coarser character-counted `Op`
/// sequence the facade exposes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOperation<T>
where
    T: PartialEq + Clone + Debug,
{
    Insert(Vec<Token<T>>),
    Delete(Vec<Token<T>>),
    Equal(Vec<Token<T>>),
}

impl<T> RawOperation<T>
where
    T: PartialEq + Clone + Debug,
{
    pub fn tokens(&self) -> &Vec<Token<T>> {
        match self {
            RawOperation::Insert(tokens)
            | RawOperation::Delete(tokens)
            | RawOperation::Equal(tokens) => tokens,
        }
    }

    pub fn original_text_length(&self) -> usize {
        self.tokens().iter().map(Token::get_original_length).sum()
    }

    pub fn get_original_text(&self) -> String {
        self.tokens().iter().map(Token::original).collect()
    }
}
