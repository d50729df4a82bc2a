//! Song catalog record.
//!
//! # Invariants
//! - `key` is one of the 12 pitch-class labels.
//! - `tempo`, when set, is a positive BPM value.
//! - Arrangements are owned by their song and never shared.

use crate::model::validation::{require_text, ValidationError};
use crate::model::{CollectionKind, Draft, Patch, Record};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub type SongId = Uuid;
pub type ArrangementId = Uuid;

/// Pitch class a song or arrangement is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicalKey {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "B")]
    B,
}

impl MusicalKey {
    /// All keys in chromatic order starting at C.
    pub const ALL: [MusicalKey; 12] = [
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
        Self::A,
        Self::ASharp,
        Self::B,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::A => "A",
            Self::ASharp => "A#",
            Self::B => "B",
        }
    }
}

impl Display for MusicalKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MusicalKey {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownKey(trimmed.to_string()))
    }
}

/// Alternate performance variant of a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    pub id: ArrangementId,
    pub name: String,
    pub key: MusicalKey,
    pub notes: Option<String>,
}

impl Arrangement {
    pub fn new(name: impl Into<String>, key: MusicalKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            key,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    /// Author names in credit order.
    pub authors: Vec<String>,
    pub key: MusicalKey,
    /// Beats per minute.
    pub tempo: Option<u32>,
    pub lyrics: Option<String>,
    pub copyright: Option<String>,
    pub arrangements: Vec<Arrangement>,
}

impl Record for Song {
    const COLLECTION: CollectionKind = CollectionKind::Songs;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("song", "title", &self.title)?;
        if self.tempo == Some(0) {
            return Err(ValidationError::ZeroTempo);
        }
        for arrangement in &self.arrangements {
            require_text("arrangement", "name", &arrangement.name)?;
        }
        Ok(())
    }
}

/// Creation input for [`Song`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub authors: Vec<String>,
    pub key: MusicalKey,
    pub tempo: Option<u32>,
    pub lyrics: Option<String>,
    pub copyright: Option<String>,
    pub arrangements: Vec<Arrangement>,
}

impl NewSong {
    pub fn new(title: impl Into<String>, key: MusicalKey) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            key,
            tempo: None,
            lyrics: None,
            copyright: None,
            arrangements: Vec::new(),
        }
    }

    /// Sets authors, dropping blank entries left over from form rows.
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = clean_authors(authors);
        self
    }
}

impl Draft for NewSong {
    type Output = Song;

    fn into_record(self, id: Uuid) -> Song {
        Song {
            id,
            title: self.title,
            authors: clean_authors(self.authors),
            key: self.key,
            tempo: self.tempo,
            lyrics: self.lyrics,
            copyright: self.copyright,
            arrangements: self.arrangements,
        }
    }
}

/// Partial update for [`Song`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub key: Option<MusicalKey>,
    pub tempo: Option<Option<u32>>,
    pub lyrics: Option<Option<String>>,
    pub copyright: Option<Option<String>>,
    pub arrangements: Option<Vec<Arrangement>>,
}

impl Patch<Song> for SongPatch {
    fn apply_to(self, record: &mut Song) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(authors) = self.authors {
            record.authors = clean_authors(authors);
        }
        if let Some(key) = self.key {
            record.key = key;
        }
        if let Some(tempo) = self.tempo {
            record.tempo = tempo;
        }
        if let Some(lyrics) = self.lyrics {
            record.lyrics = lyrics;
        }
        if let Some(copyright) = self.copyright {
            record.copyright = copyright;
        }
        if let Some(arrangements) = self.arrangements {
            record.arrangements = arrangements;
        }
    }
}

fn clean_authors<I, S>(authors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    authors
        .into_iter()
        .map(Into::into)
        .filter(|author: &String| !author.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{MusicalKey, NewSong, SongPatch};
    use crate::model::validation::ValidationError;
    use crate::model::{Draft, Patch, Record};
    use uuid::Uuid;

    #[test]
    fn key_parses_every_label() {
        for key in MusicalKey::ALL {
            assert_eq!(key.as_str().parse::<MusicalKey>().unwrap(), key);
        }
        assert_eq!(
            "H".parse::<MusicalKey>().unwrap_err(),
            ValidationError::UnknownKey("H".to_string())
        );
    }

    #[test]
    fn blank_author_rows_are_dropped() {
        let draft = NewSong::new("Amazing Grace", MusicalKey::G).with_authors(["John Newton", " "]);
        assert_eq!(draft.authors, vec!["John Newton".to_string()]);
    }

    #[test]
    fn blank_authors_from_struct_literal_are_dropped_on_create() {
        let draft = NewSong {
            authors: vec![" ".to_string(), "Ed Cash".to_string(), String::new()],
            ..NewSong::new("Goodness of God", MusicalKey::A)
        };
        let song = draft.into_record(Uuid::new_v4());
        assert_eq!(song.authors, vec!["Ed Cash".to_string()]);
    }

    #[test]
    fn zero_tempo_is_rejected() {
        let mut song = NewSong::new("Amazing Grace", MusicalKey::G).into_record(Uuid::new_v4());
        SongPatch {
            tempo: Some(Some(0)),
            ..SongPatch::default()
        }
        .apply_to(&mut song);

        assert_eq!(song.validate().unwrap_err(), ValidationError::ZeroTempo);
    }
}
