//! Cosmetic cell tags.
//!
//! Every occupied cell carries a [`ContentTag`] chosen when its block was
//! spawned. Tags have no effect on game logic; they exist so presenters can
//! draw each block in a color and so that a restored board looks the same as
//! the one that was saved. The [`Palette`] gives each tag a stable string id
//! used by the persisted format.

use serde::{Deserialize, Serialize};

/// A palette index attached to an occupied cell.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("tag#{_0}")]
pub struct ContentTag(u8);

impl ContentTag {
    /// Creates a tag from a palette index.
    #[must_use]
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the palette index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Errors returned when building a [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PaletteError {
    /// A palette needs at least one entry.
    #[display("palette is empty")]
    Empty,
    /// Palettes are limited to 256 entries.
    #[display("palette has {len} entries, at most 256 are supported")]
    TooLarge {
        /// Number of entries requested.
        len: usize,
    },
    /// Two entries share the same id.
    #[display("palette id {id:?} appears more than once")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

/// Ordered list of tag ids.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{ContentTag, Palette};
///
/// let palette = Palette::default();
/// let tag = palette.tag_for_id("green").unwrap();
/// assert_eq!(palette.id_of(tag), Some("green"));
/// assert_eq!(palette.tag_for_id("ultraviolet"), None);
/// assert_eq!(palette.id_of(ContentTag::new(200)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    ids: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        let ids = ["red", "orange", "yellow", "green", "cyan", "blue", "purple"]
            .into_iter()
            .map(String::from)
            .collect();
        Self { ids }
    }
}

impl Palette {
    /// Creates a palette from tag ids in index order.
    ///
    /// # Errors
    ///
    /// Returns an error if `ids` is empty, longer than 256, or has duplicates.
    pub fn new(ids: Vec<String>) -> Result<Self, PaletteError> {
        if ids.is_empty() {
            return Err(PaletteError::Empty);
        }
        if ids.len() > usize::from(u8::MAX) + 1 {
            return Err(PaletteError::TooLarge { len: ids.len() });
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(PaletteError::DuplicateId { id: id.clone() });
            }
        }
        Ok(Self { ids })
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false` for palettes built through [`Palette::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns every tag in index order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn tags(&self) -> impl ExactSizeIterator<Item = ContentTag> + use<> {
        (0..self.ids.len()).map(|i| ContentTag::new(i as u8))
    }

    /// Returns the id of a tag, or `None` if the tag is not in this palette.
    #[must_use]
    pub fn id_of(&self, tag: ContentTag) -> Option<&str> {
        self.ids.get(usize::from(tag.index())).map(String::as_str)
    }

    /// Looks up the tag with the given id.
    #[must_use]
    pub fn tag_for_id(&self, id: &str) -> Option<ContentTag> {
        let index = self.ids.iter().position(|candidate| candidate == id)?;
        u8::try_from(index).ok().map(ContentTag::new)
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = PaletteError;

    fn try_from(ids: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(ids)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_ids() {
        assert_eq!(Palette::new(vec![]), Err(PaletteError::Empty));
        assert_eq!(
            Palette::new(vec!["a".into(), "b".into(), "a".into()]),
            Err(PaletteError::DuplicateId { id: "a".into() })
        );
        let too_many = (0..300).map(|i| i.to_string()).collect();
        assert_eq!(
            Palette::new(too_many),
            Err(PaletteError::TooLarge { len: 300 })
        );
    }

    #[test]
    fn test_tags_round_trip_through_ids() {
        let palette = Palette::default();
        assert_eq!(palette.tags().len(), 7);
        for tag in palette.tags() {
            let id = palette.id_of(tag).unwrap();
            assert_eq!(palette.tag_for_id(id), Some(tag));
        }
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let palette: Palette = serde_json::from_str(r#"["x", "y"]"#).unwrap();
        assert_eq!(palette.len(), 2);
        assert!(serde_json::from_str::<Palette>(r#"["x", "x"]"#).is_err());
        assert_eq!(serde_json::to_string(&palette).unwrap(), r#"["x","y"]"#);
    }
}
