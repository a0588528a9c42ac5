//! View-models served by the routes. Each one is built per request from
//! the profile and tournament stores.

pub mod club;
pub mod directory;
pub mod editor;
pub mod medal;
pub mod player;

use crate::{
    core::utils::{date_to_string_opt, datetime_to_string},
    model::{profile::Profile, tournament_history::TournamentHistory},
    schema::profile::{ProfileDetail, ResultDetail, TournamentDetail},
};

pub fn profile_detail(profile: &Profile) -> ProfileDetail {
    ProfileDetail {
        id: profile.id.to_string(),
        name: profile.name.clone(),
        age: profile.age,
        gender: profile.gender,
        dominant_hand: profile.dominant_hand,
        dupr_id: profile.dupr_id.clone(),
        bio: profile.bio.clone(),
        city: profile.city.clone(),
        state: profile.state.clone(),
        country: profile.country.clone(),
        has_sponsorship: profile.has_sponsorship,
        sponsorship_details: profile.sponsorship_details.clone(),
        next_tournament: profile.next_tournament.clone(),
        avatar_url: profile.avatar_url.clone(),
        created_at: datetime_to_string(profile.created_at),
        updated_at: datetime_to_string(profile.updated_at),
    }
}

fn result_detail(result: &Option<String>) -> Option<ResultDetail> {
    result.as_ref().map(|x| ResultDetail {
        result: x.clone(),
        medal: medal::classify(x),
    })
}

pub fn tournament_detail(entry: &TournamentHistory) -> TournamentDetail {
    TournamentDetail {
        id: entry.id.to_string(),
        profile_id: entry.profile_id.to_string(),
        tournament_name: entry.tournament_name.clone(),
        tournament_date: date_to_string_opt(entry.tournament_date),
        location: entry.location.clone(),
        singles_result: result_detail(&entry.singles_result),
        doubles_result: result_detail(&entry.doubles_result),
        mixed_doubles_result: result_detail(&entry.mixed_doubles_result),
        notes: entry.notes.clone(),
        created_at: datetime_to_string(entry.created_at),
    }
}
