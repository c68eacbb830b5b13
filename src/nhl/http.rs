//! HTTP access to the NHL web API.

use reqwest::Client;
use serde_json::Value;

use crate::cli::types::{GameDate, GameId};
use crate::core::cache::{PlayByPlayCacheKey, ScheduleCacheKey, GLOBAL_CACHE};
use crate::Result;

/// Base path for the NHL web API.
pub const API_WEB_BASE_URL: &str = "https://api-web.nhle.com/v1";

/// How a cached fetch was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

/// Fetch the full play-by-play event log for one game.
///
/// Returns the raw payload; callers deserialize into
/// [`crate::nhl::types::PlayByPlay`] so the cache can hold the untyped JSON.
pub async fn get_play_by_play(client: &Client, game_id: GameId) -> Result<Value> {
    let url = format!("{API_WEB_BASE_URL}/gamecenter/{}/play-by-play", game_id);

    let res = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(res)
}

/// Fetch play-by-play through the two-tier cache.
///
/// `refresh` bypasses the cache and rewrites it with the fresh payload.
/// Finished games never change upstream, so cached entries have no TTL.
pub async fn get_play_by_play_cached(
    client: &Client,
    game_id: GameId,
    refresh: bool,
) -> Result<(Value, CacheStatus)> {
    let key = PlayByPlayCacheKey { game_id };

    if !refresh {
        if let Some(cached) = GLOBAL_CACHE.play_by_play.get(&key) {
            return Ok((cached, CacheStatus::Hit));
        }
    }

    let payload = get_play_by_play(client, game_id).await?;
    GLOBAL_CACHE.play_by_play.put(key, payload.clone());

    let status = if refresh {
        CacheStatus::Refreshed
    } else {
        CacheStatus::Miss
    };
    Ok((payload, status))
}

/// Fetch the league schedule for the week containing `date`.
pub async fn get_schedule(client: &Client, date: &GameDate) -> Result<Value> {
    let url = format!("{API_WEB_BASE_URL}/schedule/{}", date);

    let res = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(res)
}

/// Fetch a schedule through the two-tier cache.
pub async fn get_schedule_cached(
    client: &Client,
    date: &GameDate,
    refresh: bool,
) -> Result<(Value, CacheStatus)> {
    let key = ScheduleCacheKey { date: date.clone() };

    if !refresh {
        if let Some(cached) = GLOBAL_CACHE.schedule.get(&key) {
            return Ok((cached, CacheStatus::Hit));
        }
    }

    let payload = get_schedule(client, date).await?;
    GLOBAL_CACHE.schedule.put(key, payload.clone());

    let status = if refresh {
        CacheStatus::Refreshed
    } else {
        CacheStatus::Miss
    };
    Ok((payload, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_by_play_url_shape() {
        let url = format!(
            "{API_WEB_BASE_URL}/gamecenter/{}/play-by-play",
            GameId::new(2025020204)
        );
        assert_eq!(
            url,
            "https://api-web.nhle.com/v1/gamecenter/2025020204/play-by-play"
        );
    }

    #[test]
    fn test_schedule_url_shape() {
        let date: GameDate = "2025-11-09".parse().unwrap();
        let url = format!("{API_WEB_BASE_URL}/schedule/{}", date);
        assert_eq!(url, "https://api-web.nhle.com/v1/schedule/2025-11-09");
    }
}
