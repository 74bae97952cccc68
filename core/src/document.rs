use std::borrow::Cow;

/// A record that can be placed in a [`SearchIndex`](crate::SearchIndex).
///
/// The index keeps the record itself as the display payload of a hit; only
/// `text()` is analyzed.
pub trait Indexable {
    type Id;

    fn id(&self) -> &Self::Id;

    /// The content to index, e.g. a title and author joined by a space.
    fn text(&self) -> Cow<'_, str>;
}

/// `(id, text)` pairs, handy for ad-hoc collections.
impl<I> Indexable for (I, String) {
    type Id = I;

    fn id(&self) -> &I { &self.0 }

    fn text(&self) -> Cow<'_, str> { Cow::Borrowed(&self.1) }
}

impl<'a, I> Indexable for (I, &'a str) {
    type Id = I;

    fn id(&self) -> &I { &self.0 }

    fn text(&self) -> Cow<'_, str> { Cow::Borrowed(self.1) }
}
