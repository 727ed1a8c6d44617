use crate::analysis::english::tagger::PosTagger;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Attaches a coarse part-of-speech tag to every token.
#[derive(Clone, Debug, Default)]
pub struct PosTagFilter {
    tagger: PosTagger,
}

impl PosTagFilter {
    pub fn new() -> Self {
        PosTagFilter {
            tagger: PosTagger::new(),
        }
    }
}

impl Filter for PosTagFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tagger = self.tagger;
        Ok(Box::new(tokens.map(move |token| {
            let pos = tagger.tag(&token.text);
            token.with_pos(pos)
        })))
    }

    fn name(&self) -> &'static str {
        "pos_tag"
    }
}
