use crate::cli::{
    BoardFilters, Commands, GamesCommands, LeaderboardCommands, RunsCommands, SeriesCommands,
    UsersCommands,
};
use crate::output::{format_seconds, render, Listing, OutputFormat};
use chrono::{DateTime, Utc};
use srcom::models::{
    Category, CategoryType, Embeddable, Game, IdOr, Leaderboard, LeaderboardEmbed, PersonalBest,
    PersonalBestEmbed, Player, PlayerCountType, Run, RunPlayer, Series, User, UserRole,
};
use srcom::query::{
    GameQuery, LeaderboardQuery, PaginationParameters, PersonalBestsQuery, RunQuery,
    SeriesQuery, SortOrder, UserQuery,
};
use srcom::{dates, Client};

pub type CommandResult = Result<String, Box<dyn std::error::Error>>;

pub async fn handle(client: &Client, command: Commands, format: OutputFormat) -> CommandResult {
    match command {
        Commands::Games(cmd) => games(client, cmd, format).await,
        Commands::Leaderboard(cmd) => leaderboard(client, cmd, format).await,
        Commands::Runs(cmd) => runs(client, cmd, format).await,
        Commands::Users(cmd) => users(client, cmd, format).await,
        Commands::Series(cmd) => series(client, cmd, format).await,
    }
}

fn first_page(max: u32) -> PaginationParameters {
    PaginationParameters {
        max: Some(max),
        offset: None,
    }
}

async fn games(client: &Client, cmd: GamesCommands, format: OutputFormat) -> CommandResult {
    match cmd {
        GamesCommands::Search { name, max } => {
            let query = GameQuery {
                page: first_page(max),
                ..GameQuery::named(name)
            };
            let games = client.games().list(&query, &[]).await?;
            Ok(render(format, &games.data, &game_listing(&games.data))?)
        }
        GamesCommands::Get { id } => {
            let game = client.games().get(&id, &[]).await?;
            Ok(render(format, &game, &game_listing(std::slice::from_ref(&game)))?)
        }
        GamesCommands::Categories { id, miscellaneous } => {
            let categories = client
                .games()
                .categories(&id, miscellaneous, SortOrder::default())
                .await?;
            Ok(render(format, &categories, &category_listing(&categories))?)
        }
    }
}

async fn leaderboard(
    client: &Client,
    cmd: LeaderboardCommands,
    format: OutputFormat,
) -> CommandResult {
    let embeds = [LeaderboardEmbed::Players];
    let board = match cmd {
        LeaderboardCommands::Game {
            game,
            category,
            filters,
        } => {
            client
                .leaderboards()
                .full_game(&game, &category, &board_query(filters), &embeds)
                .await?
        }
        LeaderboardCommands::Level {
            game,
            level,
            category,
            filters,
        } => {
            client
                .leaderboards()
                .level(&game, &level, &category, &board_query(filters), &embeds)
                .await?
        }
    };
    Ok(render(format, &board, &board_listing(&board))?)
}

fn board_query(filters: BoardFilters) -> LeaderboardQuery {
    LeaderboardQuery {
        top: filters.top,
        platform: filters.platform,
        region: filters.region,
        video_only: filters.video_only.then_some(true),
        variables: filters.variables,
        ..LeaderboardQuery::default()
    }
}

async fn runs(client: &Client, cmd: RunsCommands, format: OutputFormat) -> CommandResult {
    match cmd {
        RunsCommands::List {
            game,
            user,
            status,
            max,
        } => {
            let query = RunQuery {
                game,
                user,
                status: status.map(Into::into),
                page: first_page(max),
                ..RunQuery::default()
            };
            let runs = client.runs().list(&query, &[]).await?;
            Ok(render(format, &runs.data, &run_listing(&runs.data))?)
        }
        RunsCommands::Get { id } => {
            let run = client.runs().get(&id, &[]).await?;
            Ok(render(format, &run, &run_listing(std::slice::from_ref(&run)))?)
        }
    }
}

async fn users(client: &Client, cmd: UsersCommands, format: OutputFormat) -> CommandResult {
    match cmd {
        UsersCommands::Search { name, max } => {
            let query = UserQuery {
                page: first_page(max),
                ..UserQuery::named(name)
            };
            let users = client.users().list(&query).await?;
            Ok(render(format, &users.data, &user_listing(&users.data))?)
        }
        UsersCommands::Get { id } => {
            let user = client.users().get(&id).await?;
            Ok(render(format, &user, &user_listing(std::slice::from_ref(&user)))?)
        }
        UsersCommands::Pbs { id, game, top } => {
            let query = PersonalBestsQuery {
                top,
                game,
                ..PersonalBestsQuery::default()
            };
            let embeds = [PersonalBestEmbed::Game, PersonalBestEmbed::Category];
            let pbs = client.users().personal_bests(&id, &query, &embeds).await?;
            Ok(render(format, &pbs, &personal_best_listing(&pbs))?)
        }
    }
}

async fn series(client: &Client, cmd: SeriesCommands, format: OutputFormat) -> CommandResult {
    match cmd {
        SeriesCommands::List { name, max } => {
            let query = SeriesQuery {
                name,
                page: first_page(max),
                ..SeriesQuery::default()
            };
            let series = client.series().list(&query, &[]).await?;
            Ok(render(format, &series.data, &series_listing(&series.data))?)
        }
        SeriesCommands::Get { id } => {
            let series = client.series().get(&id, &[]).await?;
            Ok(render(format, &series, &series_listing(std::slice::from_ref(&series)))?)
        }
    }
}

fn day(date: Option<&DateTime<Utc>>) -> String {
    date.map(dates::format_date).unwrap_or_default()
}

/// The ID, or the display name once embedded.
fn label<T>(reference: &IdOr<T>, name: impl Fn(&T) -> String) -> String {
    match reference {
        Embeddable::Plain(id) => id.clone(),
        Embeddable::Embedded(data) => name(&*data.data),
    }
}

fn game_listing(games: &[Game]) -> Listing {
    let mut listing = Listing::new(&["ID", "Abbreviation", "Name", "Released", "Link"]);
    for game in games {
        listing.row(vec![
            game.id.clone(),
            game.abbreviation.clone(),
            game.names.international.clone(),
            game.released.map(|year| year.to_string()).unwrap_or_default(),
            game.weblink.clone(),
        ]);
    }
    listing
}

fn category_listing(categories: &[Category]) -> Listing {
    let mut listing = Listing::new(&["ID", "Name", "Type", "Players", "Misc"]);
    for category in categories {
        let kind = match category.kind {
            CategoryType::PerGame => "per-game",
            CategoryType::PerLevel => "per-level",
        };
        let players = match category.players.kind {
            PlayerCountType::Exactly => category.players.value.to_string(),
            PlayerCountType::UpTo => format!("up to {}", category.players.value),
        };
        listing.row(vec![
            category.id.clone(),
            category.name.clone(),
            kind.to_string(),
            players,
            if category.miscellaneous { "yes" } else { "" }.to_string(),
        ]);
    }
    listing
}

/// Resolves a run's player references against the board's embedded players.
fn board_player(board: &Leaderboard, player: &RunPlayer) -> String {
    let key = player.id.as_deref().or(player.name.as_deref()).unwrap_or("?");
    match board.player(key) {
        Some(Player::User(user)) => user.names.international.clone(),
        Some(Player::Guest(guest)) => guest.name.clone(),
        None => key.to_string(),
    }
}

fn board_listing(board: &Leaderboard) -> Listing {
    let mut listing = Listing::new(&["Place", "Players", "Time", "Date", "Video"]);
    for ranked in &board.runs {
        let run = &ranked.run;
        let players: Vec<String> = match &run.players {
            Embeddable::Plain(players) => players
                .iter()
                .map(|player| board_player(board, player))
                .collect(),
            Embeddable::Embedded(_) => run.player_names(),
        };
        let video = run
            .videos
            .as_ref()
            .and_then(|videos| videos.links.as_ref()?.first())
            .map(|link| link.uri.clone())
            .unwrap_or_default();
        listing.row(vec![
            ranked.place.to_string(),
            players.join(", "),
            format_seconds(run.times.primary_t),
            day(run.date.as_ref()),
            video,
        ]);
    }
    listing
}

fn run_listing(runs: &[Run]) -> Listing {
    let mut listing = Listing::new(&[
        "ID", "Game", "Category", "Players", "Time", "Status", "Submitted",
    ]);
    for run in runs {
        listing.row(vec![
            run.id.clone(),
            label(&run.game, |game| game.names.international.clone()),
            label(&run.category, |category| category.name.clone()),
            run.player_names().join(", "),
            format_seconds(run.times.primary_t),
            run.status.status.as_str().to_string(),
            day(run.submitted.as_ref()),
        ]);
    }
    listing
}

fn user_listing(users: &[User]) -> Listing {
    let mut listing = Listing::new(&["ID", "Name", "Role", "Country", "Signed up"]);
    for user in users {
        let country = user
            .location
            .as_ref()
            .and_then(|location| location.country.as_ref())
            .map(|country| country.names.international.clone())
            .unwrap_or_default();
        let role = match user.role {
            UserRole::Banned => "banned",
            UserRole::User => "user",
            UserRole::Trusted => "trusted",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
            UserRole::Programmer => "programmer",
        };
        listing.row(vec![
            user.id.clone(),
            user.names.international.clone(),
            role.to_string(),
            country,
            day(user.signup.as_ref()),
        ]);
    }
    listing
}

fn personal_best_listing(pbs: &[PersonalBest]) -> Listing {
    let mut listing = Listing::new(&["Place", "Game", "Category", "Time", "Date"]);
    for pb in pbs {
        listing.row(vec![
            pb.place.to_string(),
            label(&pb.run.game, |game| game.names.international.clone()),
            label(&pb.run.category, |category| category.name.clone()),
            format_seconds(pb.run.times.primary_t),
            day(pb.run.date.as_ref()),
        ]);
    }
    listing
}

fn series_listing(series: &[Series]) -> Listing {
    let mut listing = Listing::new(&["ID", "Abbreviation", "Name", "Link"]);
    for entry in series {
        listing.row(vec![
            entry.id.clone(),
            entry.abbreviation.clone(),
            entry.names.international.clone(),
            entry.weblink.clone(),
        ]);
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"{
        "weblink": "https://www.speedrun.com/sm64#120_Star",
        "game": "o1y9wo6q",
        "category": "wkpoo02r",
        "values": {},
        "runs": [{
            "place": 1,
            "run": {
                "id": "90y6pm7e",
                "weblink": "https://www.speedrun.com/sm64/run/90y6pm7e",
                "game": "o1y9wo6q",
                "category": "wkpoo02r",
                "videos": {"links": [{"uri": "https://youtu.be/abc"}]},
                "status": {"status": "verified"},
                "players": [
                    {"rel": "user", "id": "zxzno3jq"},
                    {"rel": "guest", "name": "Couch Coop"}
                ],
                "date": "2021-06-15",
                "times": {"primary": "PT1H38M3S", "primary_t": 5883.0},
                "system": {"platform": "w89rwelk", "emulated": false}
            }
        }],
        "players": {"data": [
            {"rel": "user", "id": "zxzno3jq", "names": {"international": "cheese"},
             "weblink": "https://www.speedrun.com/user/cheese", "role": "user"},
            {"rel": "guest", "name": "Couch Coop"}
        ]}
    }"#;

    #[test]
    fn board_rows_use_embedded_player_names() {
        let board: Leaderboard = serde_json::from_str(BOARD).unwrap();
        let listing = board_listing(&board);

        let mut expected = Listing::new(&["Place", "Players", "Time", "Date", "Video"]);
        expected.row(vec![
            "1".into(),
            "cheese, Couch Coop".into(),
            "1:38:03".into(),
            "2021-06-15".into(),
            "https://youtu.be/abc".into(),
        ]);
        assert_eq!(listing, expected);
    }

    #[test]
    fn unset_flag_is_not_sent_as_false() {
        let query = board_query(BoardFilters::default());
        assert_eq!(query.video_only, None);
        assert!(query.variables.is_empty());
    }
}
