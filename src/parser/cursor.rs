//! Character cursor used by the shape matcher.
//!
//! Every method either consumes what it matched and returns `Some`, or
//! returns `None`. A failed shape is abandoned, so no backtracking state
//! is kept.

pub(crate) struct Cursor<'s> {
    source: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self { source, pos: 0 }
    }

    /// Bytes consumed so far.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    /// Consumes `text` exactly.
    pub(crate) fn literal(&mut self, text: &str) -> Option<()> {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            Some(())
        } else {
            None
        }
    }

    /// Consumes an ASCII keyword, ignoring case.
    pub(crate) fn keyword(&mut self, word: &str) -> Option<()> {
        let candidate = self.rest().get(..word.len())?;
        if candidate.eq_ignore_ascii_case(word) {
            self.pos += word.len();
            Some(())
        } else {
            None
        }
    }

    /// Consumes one or more word characters and returns them.
    pub(crate) fn word(&mut self) -> Option<&'s str> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !is_word_char(ch))
            .map_or(rest.len(), |(idx, _)| idx);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Consumes everything up to a final `terminator` that ends the input.
    ///
    /// The body must be non-empty and must not contain a line break.
    pub(crate) fn body_until(&mut self, terminator: &str) -> Option<&'s str> {
        let body = self.rest().strip_suffix(terminator)?;
        if body.is_empty() || body.contains('\n') {
            return None;
        }
        self.pos = self.source.len();
        Some(body)
    }

    /// Succeeds only when the whole input has been consumed.
    pub(crate) fn finish(&self) -> Option<()> {
        (self.pos == self.source.len()).then_some(())
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
