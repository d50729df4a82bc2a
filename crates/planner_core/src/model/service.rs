//! Service run-sheet record and the blocks it owns.
//!
//! # Responsibility
//! - Model one scheduled gathering with its ordered block sequence.
//! - Keep block ownership exclusive: a block lives in exactly one service.
//!
//! # Invariants
//! - `blocks[i].order == i + 1` for every index.
//! - Block ids are unique within their service.
//! - Only song-kind blocks may carry a `song_id`.

use crate::model::song::SongId;
use crate::model::team::TeamId;
use crate::model::validation::{require_text, time_of_day, ValidationError};
use crate::model::volunteer::VolunteerId;
use crate::model::{CollectionKind, Draft, Patch, Record};
use crate::ordering;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub type ServiceId = Uuid;
pub type BlockId = Uuid;

/// Discriminates song performances from other run-sheet items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Song,
    Custom,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Custom => "custom",
        }
    }
}

/// Volunteer scheduled on a block in a given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub volunteer_id: VolunteerId,
    pub role: String,
}

impl Assignment {
    pub fn new(volunteer_id: VolunteerId, role: impl Into<String>) -> Self {
        Self {
            volunteer_id,
            role: role.into(),
        }
    }
}

/// One ordered entry in a service run-sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Serialized as `type` to match the run-sheet wire shape.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub title: String,
    /// Catalog song performed by this block; song-kind blocks only.
    pub song_id: Option<SongId>,
    pub assignments: Vec<Assignment>,
    pub notes: Option<String>,
    pub duration_minutes: Option<u32>,
    /// 1-based position inside the owning service.
    pub order: u32,
}

impl Block {
    pub fn is_assigned(&self, volunteer_id: VolunteerId) -> bool {
        self.assignments
            .iter()
            .any(|assignment| assignment.volunteer_id == volunteer_id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("block", "title", &self.title)?;
        if self.kind == BlockKind::Custom && self.song_id.is_some() {
            return Err(ValidationError::SongReferenceOnCustomBlock);
        }
        for assignment in &self.assignments {
            require_text("assignment", "role", &assignment.role)?;
        }
        Ok(())
    }
}

/// Creation input for [`Block`]. `order` is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlock {
    pub kind: BlockKind,
    pub title: String,
    pub song_id: Option<SongId>,
    pub assignments: Vec<Assignment>,
    pub notes: Option<String>,
    pub duration_minutes: Option<u32>,
}

impl NewBlock {
    /// Empty block of `kind` with the default run-sheet title.
    pub fn placeholder(kind: BlockKind) -> Self {
        let title = match kind {
            BlockKind::Song => "Select Song",
            BlockKind::Custom => "New Block",
        };
        Self {
            kind,
            title: title.to_string(),
            song_id: None,
            assignments: Vec::new(),
            notes: None,
            duration_minutes: None,
        }
    }

    pub fn custom(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::placeholder(BlockKind::Custom)
        }
    }

    pub fn song(title: impl Into<String>, song_id: SongId) -> Self {
        Self {
            title: title.into(),
            song_id: Some(song_id),
            ..Self::placeholder(BlockKind::Song)
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_assignment(mut self, volunteer_id: VolunteerId, role: impl Into<String>) -> Self {
        self.assignments.push(Assignment::new(volunteer_id, role));
        self
    }

    /// Builds the block; `order` is a placeholder until inserted.
    pub fn into_block(self, id: BlockId) -> Block {
        Block {
            id,
            kind: self.kind,
            title: self.title,
            song_id: self.song_id,
            assignments: self.assignments,
            notes: self.notes,
            duration_minutes: self.duration_minutes,
            order: 0,
        }
    }
}

/// Partial update for one block. Position is changed only by reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub kind: Option<BlockKind>,
    pub title: Option<String>,
    pub song_id: Option<Option<SongId>>,
    pub assignments: Option<Vec<Assignment>>,
    pub notes: Option<Option<String>>,
    pub duration_minutes: Option<Option<u32>>,
}

impl Patch<Block> for BlockPatch {
    fn apply_to(self, record: &mut Block) {
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(song_id) = self.song_id {
            record.song_id = song_id;
        }
        if let Some(assignments) = self.assignments {
            record.assignments = assignments;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            record.duration_minutes = duration_minutes;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub team_id: Option<TeamId>,
    pub blocks: Vec<Block>,
}

impl Service {
    pub fn block(&self, block_id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == block_id)
    }

    pub fn block_index(&self, block_id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == block_id)
    }

    /// Sum of known block durations in minutes.
    pub fn planned_minutes(&self) -> u32 {
        self.blocks
            .iter()
            .filter_map(|block| block.duration_minutes)
            .sum()
    }
}

impl Record for Service {
    const COLLECTION: CollectionKind = CollectionKind::Services;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("service", "name", &self.name)?;
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !seen.insert(block.id) {
                return Err(ValidationError::DuplicateBlockId);
            }
            block.validate()?;
        }
        if !ordering::is_contiguous(&self.blocks) {
            return Err(ValidationError::BrokenBlockOrder);
        }
        Ok(())
    }
}

/// Creation input for [`Service`].
///
/// Blocks given here keep their positional order; `order` fields are
/// rewritten on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub team_id: Option<TeamId>,
    pub blocks: Vec<Block>,
}

impl NewService {
    pub fn new(name: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            name: name.into(),
            date,
            time,
            team_id: None,
            blocks: Vec::new(),
        }
    }
}

impl Draft for NewService {
    type Output = Service;

    fn into_record(self, id: Uuid) -> Service {
        let mut blocks = self.blocks;
        ordering::renumber(&mut blocks);
        Service {
            id,
            name: self.name,
            date: self.date,
            time: self.time,
            team_id: self.team_id,
            blocks,
        }
    }
}

/// Partial update for [`Service`].
///
/// A `blocks` value replaces the whole sequence and is renumbered by
/// position, so a patch can never persist a gap or duplicate `order`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub team_id: Option<Option<TeamId>>,
    pub blocks: Option<Vec<Block>>,
}

impl Patch<Service> for ServicePatch {
    fn apply_to(self, record: &mut Service) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(time) = self.time {
            record.time = time;
        }
        if let Some(team_id) = self.team_id {
            record.team_id = team_id;
        }
        if let Some(mut blocks) = self.blocks {
            ordering::renumber(&mut blocks);
            record.blocks = blocks;
        }
    }
}
