use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::{profile_detail, tournament_detail};
use crate::{
    core::error::AppResult,
    model::tournament_history::TournamentHistory,
    repository::{profile::get_profile, tournament_history::list_by_profile},
    schema::player::PlayerDetailResponse,
};

/// Number of entries with a singles, doubles and mixed doubles result.
pub fn result_counts(tournaments: &[TournamentHistory]) -> (u32, u32, u32) {
    let count = |f: fn(&TournamentHistory) -> &Option<String>| {
        tournaments.iter().filter(|x| f(x).is_some()).count() as u32
    };
    (
        count(|x| &x.singles_result),
        count(|x| &x.doubles_result),
        count(|x| &x.mixed_doubles_result),
    )
}

pub async fn build_player_detail(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> AppResult<PlayerDetailResponse> {
    let profile = get_profile(tx, id).await?;
    let tournaments = list_by_profile(tx, id, None).await?;
    let (singles_results, doubles_results, mixed_results) = result_counts(&tournaments);
    Ok(PlayerDetailResponse {
        profile: profile_detail(&profile),
        tournaments: tournaments.iter().map(tournament_detail).collect(),
        singles_results,
        doubles_results,
        mixed_results,
    })
}
