//! Demo data a fresh store is seeded with.
//!
//! Ids are fixed so hosts and tests can address the seed records directly.

use crate::config::ReferencePolicy;
use crate::model::service::{Assignment, Block, BlockId, BlockKind, Service, ServiceId};
use crate::model::song::{MusicalKey, Song, SongId};
use crate::model::team::{Team, TeamId};
use crate::model::volunteer::{Volunteer, VolunteerId};
use crate::store::{PlannerStore, StoreResult};
use chrono::{NaiveDate, NaiveTime};
use log::info;
use uuid::Uuid;

pub const SARAH_JOHNSON: VolunteerId = Uuid::from_u128(0x5eed_0001_0000_0000_0000_0000_0000_0001);
pub const MIKE_DAVIS: VolunteerId = Uuid::from_u128(0x5eed_0001_0000_0000_0000_0000_0000_0002);

pub const AMAZING_GRACE: SongId = Uuid::from_u128(0x5eed_0002_0000_0000_0000_0000_0000_0001);
pub const HOW_GREAT_IS_OUR_GOD: SongId = Uuid::from_u128(0x5eed_0002_0000_0000_0000_0000_0000_0002);

pub const SUNDAY_MORNING: ServiceId = Uuid::from_u128(0x5eed_0003_0000_0000_0000_0000_0000_0001);
pub const WELCOME_BLOCK: BlockId = Uuid::from_u128(0x5eed_0004_0000_0000_0000_0000_0000_0001);
pub const AMAZING_GRACE_BLOCK: BlockId = Uuid::from_u128(0x5eed_0004_0000_0000_0000_0000_0000_0002);

pub const WORSHIP_TEAM_A: TeamId = Uuid::from_u128(0x5eed_0005_0000_0000_0000_0000_0000_0001);
pub const WORSHIP_TEAM_B: TeamId = Uuid::from_u128(0x5eed_0005_0000_0000_0000_0000_0000_0002);

impl PlannerStore {
    /// Store pre-populated with the demo church's data.
    pub fn with_fixtures(reference_policy: ReferencePolicy) -> StoreResult<Self> {
        let mut store = Self::new(reference_policy);
        seed(&mut store)?;
        Ok(store)
    }
}

/// Inserts the demo records into `store`.
///
/// Fails with `DuplicateId` when run twice against the same store.
pub fn seed(store: &mut PlannerStore) -> StoreResult<()> {
    for volunteer in volunteers() {
        store.volunteers.insert_record(volunteer)?;
    }
    for song in songs() {
        store.songs.insert_record(song)?;
    }
    for service in services() {
        store.services.insert_record(service)?;
    }
    for team in teams() {
        store.teams.insert_record(team)?;
    }

    info!(
        "event=fixtures_seed module=fixtures status=ok volunteers={} songs={} services={} teams={}",
        store.volunteers.len(),
        store.songs.len(),
        store.services.len(),
        store.teams.len()
    );
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn volunteers() -> Vec<Volunteer> {
    vec![
        Volunteer {
            id: SARAH_JOHNSON,
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            phone: Some("(555) 123-4567".to_string()),
            roles: strings(&["Vocals", "Piano"]),
            team_ids: vec![WORSHIP_TEAM_A],
            blockout_dates: vec![date(2024, 1, 15), date(2024, 2, 10)],
        },
        Volunteer {
            id: MIKE_DAVIS,
            name: "Mike Davis".to_string(),
            email: "mike@example.com".to_string(),
            phone: Some("(555) 987-6543".to_string()),
            roles: strings(&["Guitar", "Bass"]),
            team_ids: vec![WORSHIP_TEAM_B],
            blockout_dates: vec![date(2024, 1, 22)],
        },
    ]
}

fn songs() -> Vec<Song> {
    vec![
        Song {
            id: AMAZING_GRACE,
            title: "Amazing Grace".to_string(),
            authors: strings(&["John Newton"]),
            key: MusicalKey::G,
            tempo: Some(80),
            lyrics: Some("Amazing grace, how sweet the sound...".to_string()),
            copyright: Some("Public Domain".to_string()),
            arrangements: Vec::new(),
        },
        Song {
            id: HOW_GREAT_IS_OUR_GOD,
            title: "How Great Is Our God".to_string(),
            authors: strings(&["Chris Tomlin", "Jesse Reeves", "Ed Cash"]),
            key: MusicalKey::C,
            tempo: Some(76),
            lyrics: None,
            copyright: Some("\u{a9} 2004 Worship Together Music".to_string()),
            arrangements: Vec::new(),
        },
    ]
}

fn services() -> Vec<Service> {
    let welcome = Block {
        id: WELCOME_BLOCK,
        kind: BlockKind::Custom,
        title: "Welcome & Announcements".to_string(),
        song_id: None,
        assignments: Vec::new(),
        notes: None,
        duration_minutes: Some(5),
        order: 1,
    };
    let amazing_grace = Block {
        id: AMAZING_GRACE_BLOCK,
        kind: BlockKind::Song,
        title: "Amazing Grace".to_string(),
        song_id: Some(AMAZING_GRACE),
        assignments: vec![
            Assignment::new(SARAH_JOHNSON, "Vocals"),
            Assignment::new(MIKE_DAVIS, "Guitar"),
        ],
        notes: None,
        duration_minutes: Some(4),
        order: 2,
    };

    vec![Service {
        id: SUNDAY_MORNING,
        name: "Sunday Morning Service".to_string(),
        date: date(2024, 1, 21),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        team_id: None,
        blocks: vec![welcome, amazing_grace],
    }]
}

fn teams() -> Vec<Team> {
    vec![
        Team {
            id: WORSHIP_TEAM_A,
            name: "Worship Team A".to_string(),
            member_ids: vec![SARAH_JOHNSON],
            roles: strings(&["Vocals", "Piano", "Guitar", "Bass", "Drums"]),
        },
        Team {
            id: WORSHIP_TEAM_B,
            name: "Worship Team B".to_string(),
            member_ids: vec![MIKE_DAVIS],
            roles: strings(&["Vocals", "Guitar", "Bass", "Drums", "Keys"]),
        },
    ]
}
