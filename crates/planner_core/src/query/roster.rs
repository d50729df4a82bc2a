//! Catalog and roster lookups used by list views.

use crate::model::song::{MusicalKey, Song};
use crate::model::team::Team;
use crate::model::volunteer::Volunteer;
use chrono::NaiveDate;

/// Song library filter: case-insensitive match on title or any author,
/// optionally narrowed to one key. A blank term matches every song.
pub fn search_songs<'a>(
    songs: &'a [Song],
    term: &str,
    key: Option<MusicalKey>,
) -> Vec<&'a Song> {
    let needle = term.trim().to_lowercase();
    songs
        .iter()
        .filter(|song| key.map_or(true, |key| song.key == key))
        .filter(|song| {
            needle.is_empty()
                || song.title.to_lowercase().contains(&needle)
                || song
                    .authors
                    .iter()
                    .any(|author| author.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Finds the roster entry for a signed-in user's email.
pub fn find_volunteer_by_email<'a>(
    volunteers: &'a [Volunteer],
    email: &str,
) -> Option<&'a Volunteer> {
    let email = email.trim();
    volunteers
        .iter()
        .find(|volunteer| volunteer.email.trim().eq_ignore_ascii_case(email))
}

pub fn is_available(volunteer: &Volunteer, date: NaiveDate) -> bool {
    !volunteer.is_blocked_out(date)
}

/// Volunteers without a blockout on `date`, in roster order.
pub fn available_volunteers(volunteers: &[Volunteer], date: NaiveDate) -> Vec<&Volunteer> {
    volunteers
        .iter()
        .filter(|volunteer| is_available(volunteer, date))
        .collect()
}

/// Roster entries listed as members of `team`; dangling ids are skipped.
pub fn team_members<'a>(team: &Team, volunteers: &'a [Volunteer]) -> Vec<&'a Volunteer> {
    team.member_ids
        .iter()
        .filter_map(|id| volunteers.iter().find(|volunteer| volunteer.id == *id))
        .collect()
}
