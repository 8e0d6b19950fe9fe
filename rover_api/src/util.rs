use std::fmt::Display;

/// Join `segments` onto `base` with exactly one `/` between each part.
pub fn build_url<S: Display>(base: &str, segments: &[S]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for seg in segments {
        let seg = seg.to_string();
        url.push('/');
        url.push_str(seg.trim_matches('/'));
    }
    url
}

/// Path of the guild-scoped endpoints: `/guilds/{guild_id}/{action}/{id}`.
pub fn guild_url(base: &str, guild_id: u64, action: &str, id: u64) -> String {
    build_url(
        base,
        &[
            "guilds".to_string(),
            guild_id.to_string(),
            action.to_string(),
            id.to_string(),
        ],
    )
}
