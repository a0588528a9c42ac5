use sqlx::{Postgres, Transaction};

use super::{profile_detail, tournament_detail};
use crate::{
    core::error::AppResult,
    model::profile::Profile,
    repository::{
        profile::list_profiles,
        tournament_history::{count_by_profile, list_by_profile},
    },
    schema::player::{
        DirectoryFilter, DirectoryResponse, DirectoryStats, PlayerSummary, UpcomingTournament,
    },
};

pub const LATEST_TOURNAMENTS_LIMIT: u32 = 3;

fn has_upcoming(profile: &Profile) -> bool {
    profile.next_tournament.as_ref().is_some_and(|x| !x.is_empty())
}

/// Case-insensitive substring match over name, city, state and DUPR id.
/// An empty search matches everyone.
pub fn matches_search(profile: &Profile, search: &str) -> bool {
    let needle = search.to_lowercase();
    [
        Some(&profile.name),
        profile.city.as_ref(),
        profile.state.as_ref(),
        profile.dupr_id.as_ref(),
    ]
    .into_iter()
    .flatten()
    .any(|x| x.to_lowercase().contains(&needle))
}

pub fn matches_filter(profile: &Profile, filter: DirectoryFilter) -> bool {
    match filter {
        DirectoryFilter::All => true,
        DirectoryFilter::Sponsored => profile.has_sponsorship,
        DirectoryFilter::Upcoming => has_upcoming(profile),
    }
}

pub fn filter_players<'a>(
    profiles: &'a [Profile],
    search: &str,
    filter: DirectoryFilter,
) -> Vec<&'a Profile> {
    profiles
        .iter()
        .filter(|x| matches_search(x, search) && matches_filter(x, filter))
        .collect()
}

pub fn directory_stats(profiles: &[Profile]) -> DirectoryStats {
    let count = |f: fn(&Profile) -> bool| profiles.iter().filter(|x| f(x)).count() as u32;
    DirectoryStats {
        total_players: profiles.len() as u32,
        sponsored_count: count(|x| x.has_sponsorship),
        upcoming_count: count(has_upcoming),
    }
}

pub fn upcoming_tournaments(profiles: &[Profile]) -> Vec<UpcomingTournament> {
    profiles
        .iter()
        .filter_map(|x| {
            let tournament = x.next_tournament.as_ref().filter(|t| !t.is_empty())?;
            Some(UpcomingTournament {
                player_id: x.id.to_string(),
                player_name: x.name.clone(),
                tournament: tournament.clone(),
                city: x.city.clone(),
            })
        })
        .collect()
}

pub async fn build_directory(
    tx: &mut Transaction<'_, Postgres>,
    search: Option<&str>,
    filter: DirectoryFilter,
) -> AppResult<DirectoryResponse> {
    let profiles = list_profiles(tx, true).await?;
    let stats = directory_stats(&profiles);
    let upcoming = upcoming_tournaments(&profiles);

    let mut players: Vec<PlayerSummary> = vec![];
    for profile in filter_players(&profiles, search.unwrap_or_default(), filter) {
        let tournament_count = count_by_profile(tx, &profile.id).await?;
        let latest = list_by_profile(tx, &profile.id, Some(LATEST_TOURNAMENTS_LIMIT)).await?;
        players.push(PlayerSummary {
            profile: profile_detail(profile),
            tournament_count,
            latest_tournaments: latest.iter().map(tournament_detail).collect(),
        });
    }

    Ok(DirectoryResponse {
        stats,
        upcoming_tournaments: upcoming,
        players,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use uuid::Uuid;

    use super::*;

    fn profile(name: &str, city: Option<&str>) -> Profile {
        let now = Local::now().fixed_offset();
        Profile {
            id: Uuid::now_v7(),
            name: name.to_string(),
            age: None,
            gender: None,
            dominant_hand: None,
            dupr_id: None,
            bio: None,
            city: city.map(str::to_string),
            state: None,
            country: None,
            has_sponsorship: false,
            sponsorship_details: None,
            next_tournament: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let asha = profile("Asha", Some("Pune"));
        assert!(matches_search(&asha, "pune"));
        assert!(matches_search(&asha, "PUNE"));
        assert!(matches_search(&asha, "as"));
        assert!(matches_search(&asha, ""));
        assert!(!matches_search(&asha, "mumbai"));
    }

    #[test]
    fn test_search_covers_state_and_dupr_id() {
        let mut ravi = profile("Ravi", None);
        ravi.state = Some("Telangana".to_string());
        ravi.dupr_id = Some("DUPR-8841".to_string());
        assert!(matches_search(&ravi, "telan"));
        assert!(matches_search(&ravi, "dupr-88"));
        assert!(!matches_search(&ravi, "kerala"));
    }

    #[test]
    fn test_filter_players() {
        let asha = profile("Asha", Some("Pune"));
        let mut ravi = profile("Ravi", Some("Hyderabad"));
        ravi.has_sponsorship = true;
        let mut meera = profile("Meera", Some("Pune"));
        meera.next_tournament = Some("Nationals 2026".to_string());
        let mut blank = profile("Kiran", None);
        blank.next_tournament = Some(String::new());
        let profiles = vec![asha, ravi, meera, blank];

        let names = |players: Vec<&Profile>| -> Vec<String> {
            players.into_iter().map(|x| x.name.clone()).collect()
        };
        assert_eq!(
            names(filter_players(&profiles, "", DirectoryFilter::All)),
            vec!["Asha", "Ravi", "Meera", "Kiran"]
        );
        assert_eq!(
            names(filter_players(&profiles, "", DirectoryFilter::Sponsored)),
            vec!["Ravi"]
        );
        assert_eq!(
            names(filter_players(&profiles, "", DirectoryFilter::Upcoming)),
            vec!["Meera"]
        );
        assert_eq!(
            names(filter_players(&profiles, "pune", DirectoryFilter::All)),
            vec!["Asha", "Meera"]
        );
        assert!(filter_players(&profiles, "chennai", DirectoryFilter::All).is_empty());
        assert!(filter_players(&profiles, "asha", DirectoryFilter::Sponsored).is_empty());
    }

    #[test]
    fn test_stats_and_upcoming_ignore_search() {
        let mut asha = profile("Asha", Some("Pune"));
        asha.has_sponsorship = true;
        asha.next_tournament = Some("Goa Open".to_string());
        let ravi = profile("Ravi", None);
        let profiles = vec![asha, ravi];

        let stats = directory_stats(&profiles);
        assert_eq!(stats.total_players, 2);
        assert_eq!(stats.sponsored_count, 1);
        assert_eq!(stats.upcoming_count, 1);

        let upcoming = upcoming_tournaments(&profiles);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].player_name, "Asha");
        assert_eq!(upcoming[0].tournament, "Goa Open");
        assert_eq!(upcoming[0].city, Some("Pune".to_string()));
    }
}
