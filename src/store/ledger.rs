use crate::history::token::Token;
use crate::types::identifiers::{RevisionId, TokenId};

/// Append-only ledger of every token ever created for the article.
///
/// A token's id equals its position, so ids are dense and strictly
/// increasing in creation order. Truncation is only ever performed by the
/// rollback path, back to a watermark taken before any of the truncated
/// tokens existed.
#[derive(Debug, Default)]
pub struct TokenLedger {
    tokens: Vec<Token>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mint(&mut self, value: String, origin: RevisionId) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(Token::new(id, value, origin));
        id
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.tokens.truncate(len);
    }
}
