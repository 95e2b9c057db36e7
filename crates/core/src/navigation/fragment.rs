//! URL-fragment adapter for the navigation state.
//!
//! The visible page is addressed by a shareable `page[/subId]` token
//! carried in the URL fragment. This module is the only place that knows
//! the token syntax; the state machine itself never touches strings.

use uuid::Uuid;

use super::guard::Page;

/// Project a page to its fragment token (without the leading '#').
#[must_use]
pub fn format(page: &Page) -> String {
    match page {
        Page::Landing => "landing".to_string(),
        Page::Login => "login".to_string(),
        Page::Signup => "signup".to_string(),
        Page::Simulation => "simulation".to_string(),
        Page::Analysis => "analysis".to_string(),
        Page::Strategy => "strategy".to_string(),
        Page::Education => "education".to_string(),
        Page::Tenders => "tenders".to_string(),
        Page::Leaderboard => "leaderboard".to_string(),
        Page::Admin => "admin".to_string(),
        Page::Profile(id) => format!("profile/{id}"),
    }
}

/// Parse a fragment token back to a page.
///
/// Total: unknown or malformed tokens (including a profile token with a
/// bad id) fall back to `Landing` — a shared URL can never crash the app,
/// and the guard re-routes from there.
#[must_use]
pub fn parse(token: &str) -> Page {
    let token = token.trim_start_matches('#');
    let (page, sub_id) = match token.split_once('/') {
        Some((page, sub_id)) => (page, Some(sub_id)),
        None => (token, None),
    };

    match page {
        "" | "landing" => Page::Landing,
        "login" => Page::Login,
        "signup" => Page::Signup,
        "simulation" => Page::Simulation,
        "analysis" => Page::Analysis,
        "strategy" => Page::Strategy,
        "education" => Page::Education,
        "tenders" => Page::Tenders,
        "leaderboard" => Page::Leaderboard,
        "admin" => Page::Admin,
        "profile" => sub_id
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .map_or(Page::Landing, Page::Profile),
        _ => Page::Landing,
    }
}
